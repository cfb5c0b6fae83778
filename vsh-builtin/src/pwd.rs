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

//! Pwd built-in: prints the current working directory.

use crate::common::failure;
use std::ops::ControlFlow::Continue;
use vsh_env::semantics::{ExitStatus, Result};
use vsh_env::Env;

/// Entry point of the `pwd` built-in.
pub fn main(_env: &mut Env, _args: &[String]) -> Result {
    match std::env::current_dir() {
        Ok(dir) => {
            println!("{}", dir.display());
            Continue(ExitStatus::SUCCESS)
        }
        Err(error) => failure("pwd", error),
    }
}
