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

//! Source built-in
//!
//! # Synopsis
//!
//! ```sh
//! source file
//! . file
//! ```
//!
//! # Description
//!
//! Reads `file` line by line and executes each line in the current shell
//! environment, so assignments, aliases, and function definitions take
//! effect in the running shell. Blank lines and `#` comment lines are
//! skipped. A `return` in the file stops it; `exit` exits the shell.
//! Nesting is bounded to stop recursive sourcing.

use crate::common::failure;
use std::ops::ControlFlow::{Break, Continue};
use vsh_env::semantics::{Divert, ExitStatus, Result};
use vsh_env::Env;
use vsh_semantics::runner;
use vsh_syntax::arena::Arena;

/// Maximum `source` nesting depth.
const MAX_DEPTH: u32 = 64;

/// Entry point of the `source` (and `.`) built-in.
pub fn main(env: &mut Env, args: &[String]) -> Result {
    let utility = args.first().map(String::as_str).unwrap_or("source");
    let Some(filename) = args.get(1) else {
        return failure(utility, "filename argument required");
    };

    if env.script_depth >= MAX_DEPTH {
        return failure(
            utility,
            format_args!("maximum source depth ({MAX_DEPTH}) exceeded"),
        );
    }

    let contents = match std::fs::read_to_string(filename) {
        Ok(contents) => contents,
        Err(error) => return failure(utility, format_args!("{filename}: {error}")),
    };

    env.script_depth += 1;
    let mut arena = Arena::new();
    let mut status = ExitStatus::SUCCESS;
    let mut divert = None;

    for line in contents.lines() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        arena.reset();
        let line = env.aliases.substitute(line);
        match runner::run_line(env, &arena, &line) {
            Continue(line_status) => status = line_status,
            Break(d) => {
                divert = Some(d);
                break;
            }
        }
        if !env.running {
            break;
        }
    }

    env.script_depth -= 1;

    match divert {
        // `return` in a sourced file ends the file, not the shell.
        Some(Divert::Return(return_status)) => Continue(return_status.unwrap_or(status)),
        Some(exit) => Break(exit),
        None => Continue(status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env_for_tests() -> Env {
        Env::with_no_variables("vsh")
    }

    fn source_file(env: &mut Env, contents: &str) -> Result {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        let args = vec![
            "source".to_string(),
            file.path().to_string_lossy().into_owned(),
        ];
        main(env, &args)
    }

    #[test]
    fn assignments_affect_the_current_shell() {
        let mut env = env_for_tests();
        let result = source_file(&mut env, "FOO=from_script\nBAR=$FOO\n");
        assert_eq!(result, Continue(ExitStatus::SUCCESS));
        assert_eq!(env.variables.get("FOO"), Some("from_script"));
        assert_eq!(env.variables.get("BAR"), Some("from_script"));
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let mut env = env_for_tests();
        let result = source_file(&mut env, "# comment\n\n   \nX=1\n");
        assert_eq!(result, Continue(ExitStatus::SUCCESS));
        assert_eq!(env.variables.get("X"), Some("1"));
    }

    #[test]
    fn function_definitions_survive_the_script() {
        let mut env = env_for_tests();
        source_file(&mut env, "greet() { echo hi; }\n");
        assert!(env.functions.get("greet").is_some());
    }

    #[test]
    fn missing_file_fails() {
        let mut env = env_for_tests();
        let args = vec![
            "source".to_string(),
            "/nonexistent-vsh/script".to_string(),
        ];
        assert_eq!(main(&mut env, &args), Continue(ExitStatus::FAILURE));
    }

    #[test]
    fn missing_operand_fails() {
        let mut env = env_for_tests();
        let args = vec![".".to_string()];
        assert_eq!(main(&mut env, &args), Continue(ExitStatus::FAILURE));
    }
}
