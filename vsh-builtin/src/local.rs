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

//! Local built-in
//!
//! Declares variables inside a function. True per-call scoping would need
//! a call-frame stack, which vsh does not keep; the variables behave as
//! ordinary unexported assignments. Using `local` outside a function is
//! an error.

use crate::common::failure;
use std::ops::ControlFlow::Continue;
use vsh_env::semantics::{ExitStatus, Result};
use vsh_env::Env;

/// Entry point of the `local` built-in.
pub fn main(env: &mut Env, args: &[String]) -> Result {
    if env.script_depth == 0 {
        return failure("local", "can only be used in a function");
    }

    for arg in &args[1..] {
        match arg.split_once('=') {
            Some((name, value)) => env.variables.set(name, value, false),
            None => env.variables.set(arg, "", false),
        }
    }
    Continue(ExitStatus::SUCCESS)
}
