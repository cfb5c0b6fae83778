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

//! Pathname (glob) expansion.
//!
//! A word containing an unescaped `*`, `?`, or `[` is matched against the
//! filesystem. Matches come back sorted lexicographically with any
//! directory-marking trailing slash stripped; a pattern that matches
//! nothing is kept literally by the caller. Dot files are only matched by
//! patterns that name the leading dot explicitly.

use glob::MatchOptions;
use vsh_syntax::arena::Arena;

/// Whether the pattern contains an unescaped glob metacharacter.
#[must_use]
pub fn has_magic(pattern: &str) -> bool {
    let mut bytes = pattern.bytes();
    while let Some(b) = bytes.next() {
        match b {
            b'*' | b'?' | b'[' => return true,
            b'\\' => {
                let _ = bytes.next();
            }
            _ => {}
        }
    }
    false
}

/// Expands a glob pattern against the filesystem.
///
/// Returns the sorted matches, or an empty vector when nothing matches or
/// the pattern is malformed (the caller then keeps the literal word).
#[must_use]
pub fn expand<'a>(pattern: &str, arena: &'a Arena) -> Vec<&'a str> {
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::default()
    };

    let Ok(paths) = glob::glob_with(pattern, options) else {
        return Vec::new();
    };

    let mut matches: Vec<String> = paths
        .filter_map(Result::ok)
        .map(|path| {
            let mut s = path.to_string_lossy().into_owned();
            while s.len() > 1 && s.ends_with('/') {
                s.pop();
            }
            s
        })
        .collect();
    matches.sort();
    matches.iter().map(|s| arena.alloc_str(s)).collect()
}
