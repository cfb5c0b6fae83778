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

//! Alias definitions and substitution.
//!
//! Alias substitution happens on the raw command line before lexing. Only
//! the leading word is considered; substitution repeats to a fixed point
//! with a depth limit so that recursive aliases terminate. A replacement
//! ending in a space asks for the (new) leading word to be examined again,
//! which is how alias chains like `alias l='ls ' ; alias ls='ls -F'`
//! compose.

use std::collections::HashMap;

/// Maximum number of substitution rounds on one command line.
const MAX_DEPTH: usize = 10;

/// Collection of alias definitions.
#[derive(Clone, Debug, Default)]
pub struct AliasSet {
    aliases: HashMap<String, String>,
}

impl AliasSet {
    /// Creates an empty alias set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the replacement for an alias name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    /// Defines or redefines an alias.
    pub fn define(&mut self, name: &str, replacement: &str) {
        self.aliases
            .insert(name.to_string(), replacement.to_string());
    }

    /// Removes an alias. Returns whether it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        self.aliases.remove(name).is_some()
    }

    /// Iterates over all aliases in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether no aliases are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Performs leading-word alias substitution on a command line.
    ///
    /// Returns the line unchanged (as an owned string) when the leading
    /// word is not an alias.
    #[must_use]
    pub fn substitute(&self, line: &str) -> String {
        let mut current = line.to_string();
        if self.aliases.is_empty() {
            return current;
        }

        for _ in 0..MAX_DEPTH {
            let trimmed_start = current.len() - current.trim_start().len();
            let rest = &current[trimmed_start..];
            if rest.is_empty() {
                break;
            }
            let word_end = rest
                .find(|c: char| c.is_whitespace())
                .unwrap_or(rest.len());
            let word = &rest[..word_end];

            let Some(replacement) = self.get(word) else {
                break;
            };

            let mut next = String::with_capacity(current.len() + replacement.len());
            next.push_str(&current[..trimmed_start]);
            next.push_str(replacement);
            next.push_str(&rest[word_end..]);
            let stop = !replacement.ends_with(' ');
            current = next;
            if stop {
                break;
            }
        }

        current
    }
}
