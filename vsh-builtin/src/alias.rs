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

//! Alias built-in
//!
//! # Synopsis
//!
//! ```sh
//! alias [name[=value]…]
//! ```
//!
//! # Description
//!
//! With no operands, prints all alias definitions. An operand of the form
//! `name=value` defines an alias; a bare `name` prints that alias or
//! fails if it is not defined.

use crate::common::failure;
use std::ops::ControlFlow::Continue;
use vsh_env::semantics::{ExitStatus, Result};
use vsh_env::Env;

/// Entry point of the `alias` built-in.
pub fn main(env: &mut Env, args: &[String]) -> Result {
    if args.len() < 2 {
        let mut all: Vec<(String, String)> = env
            .aliases
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect();
        all.sort();
        for (name, value) in all {
            println!("alias {name}='{value}'");
        }
        return Continue(ExitStatus::SUCCESS);
    }

    let mut status = ExitStatus::SUCCESS;
    for arg in &args[1..] {
        match arg.split_once('=') {
            Some((name, value)) => env.aliases.define(name, value),
            None => match env.aliases.get(arg) {
                Some(value) => println!("alias {arg}='{value}'"),
                None => {
                    eprintln!("vsh: alias: {arg}: not found");
                    status = ExitStatus::FAILURE;
                }
            },
        }
    }
    Continue(status)
}

/// Entry point of the `unalias` built-in.
pub fn unalias(env: &mut Env, args: &[String]) -> Result {
    if args.len() < 2 {
        return failure("unalias", "usage: unalias name [...]");
    }
    let mut status = ExitStatus::SUCCESS;
    for name in &args[1..] {
        if !env.aliases.remove(name) {
            eprintln!("vsh: unalias: {name}: not found");
            status = ExitStatus::FAILURE;
        }
    }
    Continue(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn define_and_remove_an_alias() {
        let mut env = Env::with_no_variables("vsh");
        assert_eq!(
            main(&mut env, &args(&["alias", "ll=ls -l"])),
            Continue(ExitStatus::SUCCESS)
        );
        assert_eq!(env.aliases.get("ll"), Some("ls -l"));

        assert_eq!(
            unalias(&mut env, &args(&["unalias", "ll"])),
            Continue(ExitStatus::SUCCESS)
        );
        assert_eq!(env.aliases.get("ll"), None);
    }

    #[test]
    fn looking_up_a_missing_alias_fails() {
        let mut env = Env::with_no_variables("vsh");
        assert_eq!(
            main(&mut env, &args(&["alias", "nope"])),
            Continue(ExitStatus::FAILURE)
        );
    }

    #[test]
    fn removing_a_missing_alias_fails() {
        let mut env = Env::with_no_variables("vsh");
        assert_eq!(
            unalias(&mut env, &args(&["unalias", "nope"])),
            Continue(ExitStatus::FAILURE)
        );
    }
}
