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

//! Lex-parse-execute of one command line.
//!
//! This is the stage after line acquisition: the read-eval loop calls it
//! with its per-line arena (freshly reset), and the `source` builtin calls
//! it for each script line with an arena of its own. History and alias
//! treatment happen before this point.
//!
//! Lex and parse failures are reported on stderr and yield exit status 2
//! without executing anything.

use crate::command;
use std::ops::ControlFlow::Continue;
use vsh_env::semantics::{ExitStatus, Result};
use vsh_env::Env;
use vsh_syntax::arena::Arena;
use vsh_syntax::parser;
use vsh_syntax::parser::lex::Lexer;

/// Tokenizes, parses, and executes one line.
pub fn run_line<'a>(env: &mut Env, arena: &'a Arena, line: &str) -> Result {
    let tokens = match Lexer::new(line, arena).tokenize() {
        Ok(tokens) => tokens,
        Err(error) => {
            eprintln!("vsh: syntax error: {error}");
            env.exit_status = ExitStatus::ERROR;
            return Continue(ExitStatus::ERROR);
        }
    };

    let node = match parser::parse(tokens, arena) {
        Ok(node) => node,
        Err(error) => {
            eprintln!("vsh: parse error: {error}");
            env.exit_status = ExitStatus::ERROR;
            return Continue(ExitStatus::ERROR);
        }
    };

    command::execute_optional(env, arena, node)
}
