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

//! This crate defines the shell language of vsh: the tokenizer, the
//! recursive-descent parser, and the abstract syntax tree they produce.
//!
//! Everything a single command line allocates (token text, AST nodes, word
//! lists, redirection chains) lives in an [`Arena`](arena::Arena) owned by
//! the caller. The borrowed lifetimes on [`Token`](parser::lex::Token) and
//! [`Node`](syntax::Node) tie the token stream and the tree to that arena;
//! resetting the arena for the next command line statically invalidates both.
//!
//! The usual entry points are [`parser::lex::Lexer`] to turn a line into
//! tokens and [`parser::parse`] to turn the tokens into a tree:
//!
//! ```
//! use vsh_syntax::arena::Arena;
//! use vsh_syntax::parser;
//! use vsh_syntax::parser::lex::Lexer;
//!
//! let arena = Arena::new();
//! let tokens = Lexer::new("echo hello | wc -c", &arena).tokenize().unwrap();
//! let ast = parser::parse(tokens, &arena).unwrap();
//! assert!(ast.is_some());
//! ```

pub mod arena;
pub mod parser;
pub mod source;
pub mod syntax;
