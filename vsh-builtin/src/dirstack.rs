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

//! Directory stack built-ins: `pushd`, `popd`, and `dirs`.
//!
//! `pushd dir` pushes the current directory and changes to `dir`; with no
//! operand it swaps the current directory with the stack top. `popd`
//! returns to the most recently pushed directory. `dirs` lists the stack,
//! current directory first.

use crate::common::failure;
use std::ops::ControlFlow::Continue;
use std::path::PathBuf;
use vsh_env::semantics::{ExitStatus, Result};
use vsh_env::Env;

fn current_dir(utility: &str) -> std::result::Result<PathBuf, Result> {
    std::env::current_dir().map_err(|error| failure(utility, error))
}

fn change_dir(env: &mut Env, utility: &str, target: &PathBuf) -> Option<Result> {
    let old = std::env::current_dir().ok();
    if let Err(error) = std::env::set_current_dir(target) {
        return Some(failure(
            utility,
            format_args!("{}: {error}", target.display()),
        ));
    }
    if let Ok(new) = std::env::current_dir() {
        env.variables.set("PWD", &new.to_string_lossy(), true);
    }
    if let Some(old) = old {
        env.variables.set("OLDPWD", &old.to_string_lossy(), true);
    }
    None
}

fn print_stack(env: &Env) {
    let mut line = String::new();
    if let Ok(cwd) = std::env::current_dir() {
        line.push_str(&cwd.to_string_lossy());
    }
    for dir in env.dir_stack.iter().rev() {
        line.push(' ');
        line.push_str(&dir.to_string_lossy());
    }
    println!("{line}");
}

/// Entry point of the `pushd` built-in.
pub fn pushd(env: &mut Env, args: &[String]) -> Result {
    let cwd = match current_dir("pushd") {
        Ok(cwd) => cwd,
        Err(result) => return result,
    };

    match args.get(1) {
        Some(dir) => {
            let target = PathBuf::from(dir);
            if let Some(error) = change_dir(env, "pushd", &target) {
                return error;
            }
            env.dir_stack.push(cwd);
        }
        None => {
            // Swap the current directory with the stack top.
            let Some(top) = env.dir_stack.pop() else {
                return failure("pushd", "no other directory");
            };
            if let Some(error) = change_dir(env, "pushd", &top) {
                env.dir_stack.push(top);
                return error;
            }
            env.dir_stack.push(cwd);
        }
    }

    print_stack(env);
    Continue(ExitStatus::SUCCESS)
}

/// Entry point of the `popd` built-in.
pub fn popd(env: &mut Env, args: &[String]) -> Result {
    let _ = args;
    let Some(top) = env.dir_stack.pop() else {
        return failure("popd", "directory stack empty");
    };
    if let Some(error) = change_dir(env, "popd", &top) {
        return error;
    }
    print_stack(env);
    Continue(ExitStatus::SUCCESS)
}

/// Entry point of the `dirs` built-in.
pub fn dirs(env: &mut Env, _args: &[String]) -> Result {
    print_stack(env);
    Continue(ExitStatus::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popd_on_an_empty_stack_fails() {
        let mut env = Env::with_no_variables("vsh");
        let args = vec!["popd".to_string()];
        assert_eq!(popd(&mut env, &args), Continue(ExitStatus::FAILURE));
    }

    #[test]
    fn pushd_without_operand_needs_a_stack_entry() {
        let mut env = Env::with_no_variables("vsh");
        let args = vec!["pushd".to_string()];
        assert_eq!(pushd(&mut env, &args), Continue(ExitStatus::FAILURE));
    }

    #[test]
    fn pushd_to_a_missing_directory_fails() {
        let mut env = Env::with_no_variables("vsh");
        let args = vec!["pushd".to_string(), "/nonexistent-vsh/dir".to_string()];
        assert_eq!(pushd(&mut env, &args), Continue(ExitStatus::FAILURE));
        assert!(env.dir_stack.is_empty());
    }
}
