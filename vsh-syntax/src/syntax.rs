// This file is part of vsh, a POSIX-style interactive shell.
// Copyright (C) 2026 the vsh authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Abstract syntax tree of the shell language.
//!
//! Every node, word, and redirection is owned by the parse
//! [`Arena`](crate::arena::Arena): lists are arena slices, children are
//! arena references, and the whole tree dies at the next arena reset. All
//! node types are `Copy` plain data plus borrows.
//!
//! Each node implements `Display` as a canonical printer: the output is
//! valid input that parses back to a structurally equal tree. The printer is
//! what the function table stores, so a function body survives arena resets
//! as its printed source. Words are re-quoted with [`quoted`] where their
//! content would otherwise change meaning.

mod impl_display;

pub use self::impl_display::quoted;

/// Kind of a [`Redir`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RedirOp {
    /// `< target`: open the target read-only
    Input,
    /// `> target`: create or truncate the target
    Output,
    /// `>> target`: create or append to the target
    Append,
    /// `<< delimiter`: here-document (recognized but not executed)
    HereDoc,
    /// `>& fd`: duplicate an output descriptor
    DupOut,
    /// `<& fd`: duplicate an input descriptor
    DupIn,
}

impl RedirOp {
    /// The descriptor the redirection applies to when no fd prefix was
    /// given: 0 for the input kinds, 1 for the output kinds.
    #[must_use]
    pub const fn default_fd(self) -> i32 {
        use RedirOp::*;
        match self {
            Input | HereDoc | DupIn => 0,
            Output | Append | DupOut => 1,
        }
    }

    /// The operator as written in the input.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        use RedirOp::*;
        match self {
            Input => "<",
            Output => ">",
            Append => ">>",
            HereDoc => "<<",
            DupOut => ">&",
            DupIn => "<&",
        }
    }
}

/// One redirection of a simple command.
///
/// Redirections form an arena-linked chain in source order; iterating from
/// the head applies them in the order they were written.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Redir<'a> {
    pub op: RedirOp,
    /// Explicit fd prefix, or `None` for [`RedirOp::default_fd`].
    pub fd: Option<i32>,
    /// File name, here-doc delimiter, or source descriptor number.
    pub target: &'a str,
    pub next: Option<&'a Redir<'a>>,
}

impl<'a> Redir<'a> {
    /// The descriptor this redirection rewires.
    #[must_use]
    pub fn target_fd(&self) -> i32 {
        self.fd.unwrap_or_else(|| self.op.default_fd())
    }

    /// Iterates this redirection and its successors in application order.
    pub fn chain(&'a self) -> RedirChain<'a> {
        RedirChain(Some(self))
    }
}

/// Iterator over a redirection chain. See [`Redir::chain`].
#[derive(Clone, Copy, Debug)]
pub struct RedirChain<'a>(Option<&'a Redir<'a>>);

impl<'a> Iterator for RedirChain<'a> {
    type Item = &'a Redir<'a>;

    fn next(&mut self) -> Option<&'a Redir<'a>> {
        let current = self.0?;
        self.0 = current.next;
        Some(current)
    }
}

/// A `NAME=value` word preceding the command name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Assign<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

/// A simple command: assignments, argument words, and redirections.
///
/// The words are unexpanded; parameter, tilde, and glob expansion happen at
/// execution time.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SimpleCommand<'a> {
    pub assigns: &'a [Assign<'a>],
    pub words: &'a [&'a str],
    pub redirs: Option<&'a Redir<'a>>,
}

impl<'a> SimpleCommand<'a> {
    /// Iterates the redirections in application (source) order.
    pub fn redirs(&self) -> RedirChain<'a> {
        RedirChain(self.redirs)
    }
}

/// Two or more commands connected by `|`, optionally negated with `!`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pipeline<'a> {
    pub commands: &'a [&'a Node<'a>],
    pub negated: bool,
}

/// `if … then … [elif …] [else …] fi`. An `elif` chain is a nested `If` in
/// `else_body`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct If<'a> {
    pub condition: Option<&'a Node<'a>>,
    pub then_body: Option<&'a Node<'a>>,
    pub else_body: Option<&'a Node<'a>>,
}

/// `while … do … done`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct While<'a> {
    pub condition: Option<&'a Node<'a>>,
    pub body: Option<&'a Node<'a>>,
}

/// `for name [in words…] ; do … done`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct For<'a> {
    pub name: &'a str,
    pub words: &'a [&'a str],
    pub body: Option<&'a Node<'a>>,
}

/// `name() { … }` or `function name { … }`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FunctionDef<'a> {
    pub name: &'a str,
    pub body: Option<&'a Node<'a>>,
}

/// A node of the syntax tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Node<'a> {
    /// A simple command
    Simple(SimpleCommand<'a>),
    /// `a | b | c`, possibly `!`-negated
    Pipeline(Pipeline<'a>),
    /// `left && right`
    And(&'a Node<'a>, &'a Node<'a>),
    /// `left || right`
    Or(&'a Node<'a>, &'a Node<'a>),
    /// `left ; right`
    Sequence(&'a Node<'a>, &'a Node<'a>),
    /// `child &`
    Background(&'a Node<'a>),
    /// `! child` (single command; a negated multi-command pipeline uses
    /// [`Pipeline::negated`])
    Negate(&'a Node<'a>),
    /// `( child )`
    Subshell(Option<&'a Node<'a>>),
    /// `{ child }`, run in the current shell
    Block(Option<&'a Node<'a>>),
    /// `if` command
    If(If<'a>),
    /// `while` loop
    While(While<'a>),
    /// `for` loop
    For(For<'a>),
    /// Function definition
    FunctionDef(FunctionDef<'a>),
}
