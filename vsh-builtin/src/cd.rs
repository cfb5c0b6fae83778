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

//! Cd built-in
//!
//! The **`cd`** built-in changes the working directory.
//!
//! # Synopsis
//!
//! ```sh
//! cd [directory]
//! ```
//!
//! # Description
//!
//! With no operand the target is `$HOME`. The single operand `-` targets
//! `$OLDPWD` and prints the directory changed to. After a successful
//! change, `$PWD` and `$OLDPWD` are updated as exported variables.

use crate::common::failure;
use std::ops::ControlFlow::Continue;
use vsh_env::semantics::{ExitStatus, Result};
use vsh_env::Env;

/// Entry point of the `cd` built-in.
pub fn main(env: &mut Env, args: &[String]) -> Result {
    let old_pwd = std::env::current_dir()
        .map(|p| p.to_string_lossy().into_owned())
        .ok()
        .or_else(|| env.variables.get("PWD").map(String::from));

    let target = match args.get(1).map(String::as_str) {
        None => match env.variables.get("HOME") {
            Some(home) if !home.is_empty() => home.to_string(),
            _ => return failure("cd", "HOME not set"),
        },
        Some("-") => match env.variables.get("OLDPWD") {
            Some(oldpwd) if !oldpwd.is_empty() => {
                let oldpwd = oldpwd.to_string();
                println!("{oldpwd}");
                oldpwd
            }
            _ => return failure("cd", "OLDPWD not set"),
        },
        Some(dir) => dir.to_string(),
    };

    if let Err(error) = std::env::set_current_dir(&target) {
        return failure("cd", format_args!("{target}: {error}"));
    }

    if let Ok(new_pwd) = std::env::current_dir() {
        env.variables
            .set("PWD", &new_pwd.to_string_lossy(), true);
    }
    if let Some(old_pwd) = old_pwd {
        env.variables.set("OLDPWD", &old_pwd, true);
    }

    Continue(ExitStatus::SUCCESS)
}
