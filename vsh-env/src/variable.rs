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

//! Shell variables.
//!
//! A [`VariableSet`] is a string-keyed mapping with an `exported` flag per
//! variable. Setting or exporting an exported variable also updates the
//! process environment block, so child processes inherit it both through
//! [`environ`](VariableSet::environ) (used with `execve`) and through the
//! inherited environment of `execvp`-style PATH searches.

use std::collections::HashMap;
use std::ffi::CString;

/// One shell variable.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Variable {
    /// Value of the variable.
    pub value: String,
    /// Whether the variable is passed to child processes.
    pub exported: bool,
}

/// Collection of shell variables.
#[derive(Clone, Debug, Default)]
pub struct VariableSet {
    variables: HashMap<String, Variable>,
}

impl VariableSet {
    /// Creates an empty variable set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a variable set initialized from the process environment.
    ///
    /// Every inherited variable is imported as exported. `SHELL`, `HOME`,
    /// and `USER` are given conventional defaults when absent.
    #[must_use]
    pub fn from_process_environment() -> Self {
        let mut set = Self::new();
        for (key, value) in std::env::vars() {
            set.variables.insert(
                key,
                Variable {
                    value,
                    exported: true,
                },
            );
        }
        if set.get("SHELL").is_none() {
            set.set("SHELL", "/bin/vsh", true);
        }
        set
    }

    /// Looks up the value of a variable.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(|v| v.value.as_str())
    }

    /// Assigns a variable, creating it if necessary.
    ///
    /// The `exported` flag is replaced by the given value. An exported
    /// assignment is mirrored into the process environment.
    pub fn set(&mut self, name: &str, value: &str, exported: bool) {
        if exported {
            std::env::set_var(name, value);
        }
        self.variables.insert(
            name.to_string(),
            Variable {
                value: value.to_string(),
                exported,
            },
        );
    }

    /// Removes a variable, also clearing it from the process environment.
    pub fn unset(&mut self, name: &str) {
        if self.variables.remove(name).is_some() {
            std::env::remove_var(name);
        }
    }

    /// Marks a variable as exported and mirrors it into the process
    /// environment. Does nothing if the variable does not exist.
    pub fn export(&mut self, name: &str) {
        if let Some(variable) = self.variables.get_mut(name) {
            variable.exported = true;
            std::env::set_var(name, &variable.value);
        }
    }

    /// Whether the named variable exists and is exported.
    #[must_use]
    pub fn is_exported(&self, name: &str) -> bool {
        self.variables.get(name).is_some_and(|v| v.exported)
    }

    /// Builds the `KEY=VALUE` environment block for `execve`, containing
    /// the exported variables only.
    ///
    /// Entries whose key or value contains a NUL byte are skipped; they
    /// cannot be represented in an environment block.
    #[must_use]
    pub fn environ(&self) -> Vec<CString> {
        self.variables
            .iter()
            .filter(|(_, variable)| variable.exported)
            .filter_map(|(key, variable)| CString::new(format!("{key}={}", variable.value)).ok())
            .collect()
    }

    /// Iterates over all variables in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of variables in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether the set contains no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

/// Whether `name` is a valid variable name: a letter or underscore
/// followed by letters, digits, or underscores.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get() {
        let mut set = VariableSet::new();
        assert_eq!(set.get("FOO"), None);
        set.set("FOO", "bar", false);
        assert_eq!(set.get("FOO"), Some("bar"));
        set.set("FOO", "baz", false);
        assert_eq!(set.get("FOO"), Some("baz"));
    }

    #[test]
    fn unset_removes() {
        let mut set = VariableSet::new();
        set.set("FOO", "bar", false);
        set.unset("FOO");
        assert_eq!(set.get("FOO"), None);
    }

    #[test]
    fn environ_contains_only_exported_variables() {
        let mut set = VariableSet::new();
        set.set("VSH_TEST_EXPORTED", "yes", true);
        set.set("VSH_TEST_PRIVATE", "no", false);
        let environ = set.environ();
        let entries: Vec<_> = environ.iter().map(|c| c.to_str().unwrap()).collect();
        assert!(entries.contains(&"VSH_TEST_EXPORTED=yes"));
        assert!(!entries.iter().any(|e| e.starts_with("VSH_TEST_PRIVATE=")));
    }

    #[test]
    fn export_flips_the_flag() {
        let mut set = VariableSet::new();
        set.set("VSH_TEST_LATER", "v", false);
        assert!(!set.is_exported("VSH_TEST_LATER"));
        set.export("VSH_TEST_LATER");
        assert!(set.is_exported("VSH_TEST_LATER"));
    }

    #[test]
    fn exported_set_updates_process_environment() {
        let mut set = VariableSet::new();
        set.set("VSH_TEST_PROCESS_ENV", "visible", true);
        assert_eq!(
            std::env::var("VSH_TEST_PROCESS_ENV").as_deref(),
            Ok("visible")
        );
        set.unset("VSH_TEST_PROCESS_ENV");
        assert!(std::env::var("VSH_TEST_PROCESS_ENV").is_err());
    }

    #[test]
    fn valid_names() {
        assert!(is_valid_name("FOO"));
        assert!(is_valid_name("_foo"));
        assert!(is_valid_name("f00_bar"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("1abc"));
        assert!(!is_valid_name("a-b"));
        assert!(!is_valid_name("a.b"));
    }
}
