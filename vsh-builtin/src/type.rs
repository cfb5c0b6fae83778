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

//! Type built-in
//!
//! # Synopsis
//!
//! ```sh
//! type name…
//! ```
//!
//! # Description
//!
//! Describes how each name would be interpreted as a command: as an
//! alias, a function, a built-in, or an external command found on `$PATH`.

use crate::common::failure;
use nix::unistd::{access, AccessFlags};
use std::ops::ControlFlow::Continue;
use std::path::{Path, PathBuf};
use vsh_env::semantics::{ExitStatus, Result};
use vsh_env::Env;

/// Entry point of the `type` built-in.
pub fn main(env: &mut Env, args: &[String]) -> Result {
    if args.len() < 2 {
        return failure("type", "not enough arguments");
    }

    let mut status = ExitStatus::SUCCESS;
    for name in &args[1..] {
        if let Some(value) = env.aliases.get(name) {
            println!("{name} is aliased to '{value}'");
        } else if env.functions.get(name).is_some() {
            println!("{name} is a function");
        } else if env.builtins.contains_key(name.as_str()) {
            println!("{name} is a shell builtin");
        } else if let Some(path) = find_in_path(env, name) {
            println!("{name} is {}", path.display());
        } else {
            eprintln!("vsh: type: {name}: not found");
            status = ExitStatus::FAILURE;
        }
    }
    Continue(status)
}

/// Finds an executable for `name`: directly if it contains a slash,
/// otherwise via a `$PATH` search.
fn find_in_path(env: &Env, name: &str) -> Option<PathBuf> {
    if name.contains('/') {
        let path = Path::new(name);
        return is_executable(path).then(|| path.to_path_buf());
    }

    let path_variable = env.variables.get("PATH")?;
    for dir in path_variable.split(':') {
        if dir.is_empty() {
            continue;
        }
        let candidate = Path::new(dir).join(name);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

fn is_executable(path: &Path) -> bool {
    access(path, AccessFlags::X_OK).is_ok()
}
