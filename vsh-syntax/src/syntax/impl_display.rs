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

//! Canonical printing of the syntax tree.
//!
//! `Display` output is valid shell input: lexing and parsing it again yields
//! a structurally equal tree. `elif` chains print as nested `else if` and
//! both function-definition forms print as `name()`, which preserves
//! structure if not spelling.

use super::*;
use std::fmt;

/// Characters that force a word to be quoted when printed.
///
/// These are the word-breaking characters of the lexer plus the quoting
/// characters themselves and `!`, which would lex as a negation at the start
/// of a word.
fn char_needs_quoting(c: char) -> bool {
    match c {
        ' ' | '\t' | '\n' | '|' | '&' | ';' | '>' | '<' | '(' | ')' | '{' | '}' | '#' => true,
        '\\' | '\'' | '"' | '!' => true,
        _ => c.is_whitespace(),
    }
}

fn str_needs_quoting(s: &str) -> bool {
    s.is_empty() || s.chars().any(char_needs_quoting)
}

/// Wrapper for printing a word with just enough quoting to survive the
/// lexer unchanged.
///
/// Words that need no quoting print verbatim. A word without single quotes
/// is single-quoted; otherwise it is double-quoted with `$`, backtick, `"`,
/// and `\` backslash-escaped.
#[derive(Clone, Copy, Debug)]
#[must_use = "`Quoted` does nothing unless printed"]
pub struct Quoted<'a>(&'a str);

/// Wraps a word for quoted printing.
pub fn quoted(raw: &str) -> Quoted<'_> {
    Quoted(raw)
}

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = self.0;
        if !str_needs_quoting(raw) {
            return f.write_str(raw);
        }
        if !raw.contains('\'') {
            return write!(f, "'{raw}'");
        }
        f.write_str("\"")?;
        for c in raw.chars() {
            if matches!(c, '$' | '`' | '"' | '\\') {
                f.write_str("\\")?;
            }
            write!(f, "{c}")?;
        }
        f.write_str("\"")
    }
}

impl fmt::Display for RedirOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Redir<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.op {
            // Dup operators require the fd digit to lex at all.
            RedirOp::DupOut | RedirOp::DupIn => {
                write!(f, "{}{}{}", self.target_fd(), self.op, self.target)
            }
            _ => {
                if let Some(fd) = self.fd {
                    write!(f, "{fd}")?;
                }
                write!(f, "{}{}", self.op, quoted(self.target))
            }
        }
    }
}

impl fmt::Display for Assign<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, quoted(self.value))
    }
}

impl fmt::Display for SimpleCommand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        let mut space = |f: &mut fmt::Formatter<'_>| {
            if std::mem::take(&mut first) {
                Ok(())
            } else {
                f.write_str(" ")
            }
        };
        for assign in self.assigns {
            space(f)?;
            write!(f, "{assign}")?;
        }
        for word in self.words {
            space(f)?;
            write!(f, "{}", quoted(word))?;
        }
        for redir in self.redirs() {
            space(f)?;
            write!(f, "{redir}")?;
        }
        Ok(())
    }
}

/// Prints `"{node}; "`, or nothing when the node is absent.
///
/// This is the shape every clause of a compound command takes, so that
/// `if c; then t; fi` and the empty `if then fi` both re-parse.
fn fmt_clause(f: &mut fmt::Formatter<'_>, node: Option<&Node<'_>>) -> fmt::Result {
    match node {
        Some(node) => write!(f, "{node}; "),
        None => Ok(()),
    }
}

impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Simple(simple) => simple.fmt(f),
            Node::Pipeline(pipeline) => {
                if pipeline.negated {
                    f.write_str("! ")?;
                }
                let mut first = true;
                for command in pipeline.commands {
                    if !std::mem::take(&mut first) {
                        f.write_str(" | ")?;
                    }
                    command.fmt(f)?;
                }
                Ok(())
            }
            Node::And(left, right) => write!(f, "{left} && {right}"),
            Node::Or(left, right) => write!(f, "{left} || {right}"),
            // `a &` terminates the left part by itself, so a background
            // left side must not be followed by the `;` separator.
            Node::Sequence(Node::Background(left), right) => write!(f, "{left} & {right}"),
            Node::Sequence(left, right) => write!(f, "{left}; {right}"),
            Node::Background(child) => write!(f, "{child} &"),
            Node::Negate(child) => write!(f, "! {child}"),
            Node::Subshell(child) => match child {
                Some(child) => write!(f, "({child})"),
                None => f.write_str("()"),
            },
            Node::Block(child) => match child {
                Some(child) => write!(f, "{{ {child} }}"),
                None => f.write_str("{ }"),
            },
            Node::If(if_node) => {
                f.write_str("if ")?;
                fmt_clause(f, if_node.condition)?;
                f.write_str("then ")?;
                fmt_clause(f, if_node.then_body)?;
                if if_node.else_body.is_some() {
                    f.write_str("else ")?;
                    fmt_clause(f, if_node.else_body)?;
                }
                f.write_str("fi")
            }
            Node::While(while_node) => {
                f.write_str("while ")?;
                fmt_clause(f, while_node.condition)?;
                f.write_str("do ")?;
                fmt_clause(f, while_node.body)?;
                f.write_str("done")
            }
            Node::For(for_node) => {
                write!(f, "for {}", for_node.name)?;
                if !for_node.words.is_empty() {
                    f.write_str(" in")?;
                    for word in for_node.words {
                        write!(f, " {}", quoted(word))?;
                    }
                }
                f.write_str("; do ")?;
                fmt_clause(f, for_node.body)?;
                f.write_str("done")
            }
            Node::FunctionDef(def) => {
                write!(f, "{}() {{ ", def.name)?;
                fmt_clause(f, def.body)?;
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_words_print_verbatim() {
        assert_eq!(quoted("foo").to_string(), "foo");
        assert_eq!(quoted("/usr/bin/env").to_string(), "/usr/bin/env");
        assert_eq!(quoted("$HOME").to_string(), "$HOME");
        assert_eq!(quoted("*.txt").to_string(), "*.txt");
    }

    #[test]
    fn words_with_breakers_are_single_quoted() {
        assert_eq!(quoted("").to_string(), "''");
        assert_eq!(quoted("a b").to_string(), "'a b'");
        assert_eq!(quoted("a|b").to_string(), "'a|b'");
        assert_eq!(quoted("a#b").to_string(), "'a#b'");
    }

    #[test]
    fn words_with_single_quotes_are_double_quoted() {
        assert_eq!(quoted("it's").to_string(), "\"it's\"");
        assert_eq!(quoted("'$x'").to_string(), "\"'\\$x'\"");
    }

    #[test]
    fn simple_command_display() {
        let redir = Redir {
            op: RedirOp::Output,
            fd: None,
            target: "out.txt",
            next: None,
        };
        let simple = SimpleCommand {
            assigns: &[Assign {
                name: "FOO",
                value: "bar baz",
            }],
            words: &["echo", "hello"],
            redirs: Some(&redir),
        };
        assert_eq!(simple.to_string(), "FOO='bar baz' echo hello >out.txt");
    }

    #[test]
    fn dup_redir_display() {
        let redir = Redir {
            op: RedirOp::DupOut,
            fd: Some(2),
            target: "1",
            next: None,
        };
        assert_eq!(redir.to_string(), "2>&1");
    }

    #[test]
    fn background_sequence_display() {
        let sleep = Node::Simple(SimpleCommand {
            assigns: &[],
            words: &["sleep", "5"],
            redirs: None,
        });
        let jobs = Node::Simple(SimpleCommand {
            assigns: &[],
            words: &["jobs"],
            redirs: None,
        });
        let background = Node::Background(&sleep);
        let sequence = Node::Sequence(&background, &jobs);
        assert_eq!(background.to_string(), "sleep 5 &");
        assert_eq!(sequence.to_string(), "sleep 5 & jobs");
    }

    #[test]
    fn if_display() {
        let cond = Node::Simple(SimpleCommand {
            assigns: &[],
            words: &["true"],
            redirs: None,
        });
        let then = Node::Simple(SimpleCommand {
            assigns: &[],
            words: &["echo", "yes"],
            redirs: None,
        });
        let if_node = Node::If(If {
            condition: Some(&cond),
            then_body: Some(&then),
            else_body: None,
        });
        assert_eq!(if_node.to_string(), "if true; then echo yes; fi");
    }
}
