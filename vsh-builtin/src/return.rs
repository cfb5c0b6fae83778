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

//! Return built-in
//!
//! # Synopsis
//!
//! ```sh
//! return [n]
//! ```
//!
//! # Description
//!
//! Returns from the currently executing function or sourced script with
//! status `n` (default: the current `$?`), by diverting with
//! [`Divert::Return`]. The executor catches the divert at the function
//! call or `source` boundary. Outside both, `return` is an error.

use crate::common::failure;
use std::ops::ControlFlow::{Break, Continue};
use vsh_env::semantics::{Divert, ExitStatus, Result};
use vsh_env::Env;

/// Entry point of the `return` built-in.
pub fn main(env: &mut Env, args: &[String]) -> Result {
    if env.script_depth == 0 {
        return failure(
            "return",
            "can only `return' from a function or sourced script",
        );
    }

    let status = match args.get(1) {
        None => None,
        Some(arg) => match arg.parse::<i32>() {
            Ok(n) => Some(ExitStatus(n & 0xff)),
            Err(_) => {
                eprintln!("vsh: return: {arg}: numeric argument required");
                return Continue(ExitStatus::ERROR);
            }
        },
    };

    Break(Divert::Return(status))
}
