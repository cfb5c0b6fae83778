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

//! Export built-in
//!
//! # Synopsis
//!
//! ```sh
//! export [name[=value]…]
//! ```
//!
//! # Description
//!
//! With operands, assigns and/or marks each named variable as exported.
//! Without operands, lists every exported variable in `declare -x` form.

use std::ops::ControlFlow::Continue;
use vsh_env::semantics::{ExitStatus, Result};
use vsh_env::Env;

/// Entry point of the `export` built-in.
pub fn main(env: &mut Env, args: &[String]) -> Result {
    if args.len() < 2 {
        let mut exported: Vec<(String, String)> = env
            .variables
            .iter()
            .filter(|(_, variable)| variable.exported)
            .map(|(name, variable)| (name.to_string(), variable.value.clone()))
            .collect();
        exported.sort();
        for (name, value) in exported {
            println!("declare -x {name}=\"{value}\"");
        }
        return Continue(ExitStatus::SUCCESS);
    }

    for arg in &args[1..] {
        match arg.split_once('=') {
            Some((name, value)) => env.variables.set(name, value, true),
            None => env.variables.export(arg),
        }
    }
    Continue(ExitStatus::SUCCESS)
}
