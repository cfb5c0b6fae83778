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

//! Tilde expansion.
//!
//! Applies only to a word that begins with `~` after parameter expansion:
//! `~` and `~/…` expand to `$HOME`, `~+` to `$PWD`, `~-` to `$OLDPWD`, and
//! `~user` to the user's home directory from the user database. A word
//! naming an unknown user is left unchanged.

use nix::unistd::User;
use vsh_env::Env;
use vsh_syntax::arena::Arena;

/// Expands a leading tilde. `word` must start with `~`.
pub fn expand_tilde<'a>(env: &Env, word: &'a str, arena: &'a Arena) -> &'a str {
    let rest = &word[1..];

    // ~+ and ~- refer to the current and previous working directory.
    for (prefix, variable) in [("+", "PWD"), ("-", "OLDPWD")] {
        if let Some(tail) = rest.strip_prefix(prefix) {
            if tail.is_empty() || tail.starts_with('/') {
                let dir = env.variables.get(variable).unwrap_or("");
                return join(dir, tail, arena);
            }
        }
    }

    // ~ and ~/… refer to $HOME.
    if rest.is_empty() || rest.starts_with('/') {
        let home = env.variables.get("HOME").unwrap_or("");
        return join(home, rest, arena);
    }

    // ~user and ~user/… look the user up in the user database.
    let (name, tail) = match rest.find('/') {
        Some(slash) => (&rest[..slash], &rest[slash..]),
        None => (rest, ""),
    };
    match User::from_name(name) {
        Ok(Some(user)) => {
            let home = user.dir.to_string_lossy();
            join(&home, tail, arena)
        }
        // Unknown user: the word is left unchanged.
        _ => word,
    }
}

fn join<'a>(dir: &str, tail: &str, arena: &'a Arena) -> &'a str {
    if tail.is_empty() {
        arena.alloc_str(dir)
    } else {
        arena.alloc_str(&format!("{dir}{tail}"))
    }
}
