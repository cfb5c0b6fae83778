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

//! Type definitions for shell functions.
//!
//! A defined function must outlive the command line that defined it, but
//! the syntax tree of that command line dies with the parse arena. The
//! function table therefore stores the *canonically printed source* of the
//! body, a deep copy in ordinary long-lived storage, and the executor
//! re-parses it into the live arena when the function is called.

use std::collections::HashMap;
use std::rc::Rc;

/// Definition of a function.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Function {
    /// Name the function is called by.
    pub name: String,

    /// Canonically printed source of the function body.
    ///
    /// Parsing this string yields a tree structurally equal to the one the
    /// function was defined with.
    pub body: String,
}

impl Function {
    /// Creates a new function definition.
    #[inline]
    #[must_use]
    pub fn new<N: Into<String>, B: Into<String>>(name: N, body: B) -> Self {
        Function {
            name: name.into(),
            body: body.into(),
        }
    }
}

/// Collection of defined functions.
///
/// Functions are wrapped in `Rc` so a body can be executed while the table
/// is borrowed mutably (a function may redefine or remove functions).
#[derive(Clone, Debug, Default)]
pub struct FunctionSet {
    functions: HashMap<String, Rc<Function>>,
}

impl FunctionSet {
    /// Creates an empty function set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a function, replacing any previous definition of the name.
    pub fn define(&mut self, function: Function) {
        self.functions
            .insert(function.name.clone(), Rc::new(function));
    }

    /// Looks up a function by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Rc<Function>> {
        self.functions.get(name).cloned()
    }

    /// Removes a function definition. Returns whether it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        self.functions.remove(name).is_some()
    }

    /// Iterates over all functions in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Rc<Function>> {
        self.functions.values()
    }

    /// Whether no functions are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_and_get() {
        let mut set = FunctionSet::new();
        assert!(set.get("greet").is_none());
        set.define(Function::new("greet", "echo hi"));
        let function = set.get("greet").unwrap();
        assert_eq!(function.name, "greet");
        assert_eq!(function.body, "echo hi");
    }

    #[test]
    fn redefinition_replaces() {
        let mut set = FunctionSet::new();
        set.define(Function::new("f", "echo one"));
        set.define(Function::new("f", "echo two"));
        assert_eq!(set.get("f").unwrap().body, "echo two");
    }

    #[test]
    fn remove() {
        let mut set = FunctionSet::new();
        set.define(Function::new("f", "echo"));
        assert!(set.remove("f"));
        assert!(!set.remove("f"));
        assert!(set.is_empty());
    }

    #[test]
    fn definition_outlives_the_table_borrow() {
        let mut set = FunctionSet::new();
        set.define(Function::new("f", "echo hi"));
        let function = set.get("f").unwrap();
        set.remove("f");
        assert_eq!(function.body, "echo hi");
    }
}
