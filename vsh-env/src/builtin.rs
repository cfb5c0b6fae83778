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

//! Type definitions for built-in utilities.
//!
//! The registry record lives here, not with the builtin implementations, so
//! the executor can consult the registry without depending on the crate
//! that implements the builtins. The CLI registers the implementations into
//! [`Env::builtins`](crate::Env::builtins) at startup.

use crate::semantics;
use crate::Env;

/// Entry point of a built-in utility.
///
/// The arguments include the utility name as `args[0]`, after expansion.
/// The result is the exit status, or a divert request (`exit`, `return`).
pub type Main = fn(&mut Env, &[String]) -> semantics::Result;

/// A built-in utility as registered with the shell.
#[derive(Clone, Copy)]
pub struct Builtin {
    /// Function that runs the built-in.
    pub execute: Main,

    /// One-line usage synopsis, e.g. `"cd [dir]"`.
    pub synopsis: &'static str,

    /// Short description for `help`.
    pub description: &'static str,
}

impl std::fmt::Debug for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builtin")
            .field("synopsis", &self.synopsis)
            .finish_non_exhaustive()
    }
}
