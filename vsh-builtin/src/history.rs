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

//! History built-in
//!
//! # Synopsis
//!
//! ```sh
//! history [-c] [n]
//! ```
//!
//! # Description
//!
//! Lists the command history with event numbers (the numbers `!N`
//! references use). With a count `n`, lists only the last `n` entries.
//! `-c` clears the history.

use crate::common::failure;
use std::ops::ControlFlow::Continue;
use vsh_env::semantics::{ExitStatus, Result};
use vsh_env::Env;

/// Entry point of the `history` built-in.
pub fn main(env: &mut Env, args: &[String]) -> Result {
    let mut limit = None;
    for arg in &args[1..] {
        if arg == "-c" {
            env.history.clear();
            return Continue(ExitStatus::SUCCESS);
        }
        match arg.parse::<usize>() {
            Ok(n) => limit = Some(n),
            Err(_) => return failure("history", format_args!("{arg}: invalid argument")),
        }
    }

    let count = env.history.len();
    let skip = limit.map_or(0, |n| count.saturating_sub(n));
    for entry in env.history.iter().skip(skip) {
        println!("{:5}  {}", entry.index, entry.line);
    }
    Continue(ExitStatus::SUCCESS)
}
