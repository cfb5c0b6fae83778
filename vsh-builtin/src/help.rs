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

//! Help built-in: lists the registered built-ins with their synopses, or
//! describes one of them.

use crate::common::failure;
use std::ops::ControlFlow::Continue;
use vsh_env::semantics::{ExitStatus, Result};
use vsh_env::Env;

/// Entry point of the `help` built-in.
pub fn main(env: &mut Env, args: &[String]) -> Result {
    if let Some(name) = args.get(1) {
        let Some(builtin) = env.builtin(name) else {
            return failure("help", format_args!("{name}: no such builtin"));
        };
        println!("{:<24}{}", builtin.synopsis, builtin.description);
        return Continue(ExitStatus::SUCCESS);
    }

    println!("vsh builtins:");
    let mut names: Vec<&str> = env.builtins.keys().copied().collect();
    names.sort_unstable();
    for name in names {
        if let Some(builtin) = env.builtin(name) {
            println!("  {:<24}{}", builtin.synopsis, builtin.description);
        }
    }
    Continue(ExitStatus::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_builtin_fails() {
        let mut env = Env::with_no_variables("vsh");
        let args = vec!["help".to_string(), "frobnicate".to_string()];
        assert_eq!(main(&mut env, &args), Continue(ExitStatus::FAILURE));
    }
}
