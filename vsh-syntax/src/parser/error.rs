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

//! Definition of errors that happen in the parser.

use crate::source::Location;
use thiserror::Error;

/// Types of syntax errors.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SyntaxError {
    /// A token appeared where the grammar allows none.
    #[error("unexpected token `{0}`")]
    UnexpectedToken(String),
    /// A specific token was required but something else appeared.
    #[error("expected `{expected}`, found `{found}`")]
    Expected { expected: String, found: String },
    /// A redirection operator has no target word.
    #[error("missing target for redirection operator")]
    MissingRedirTarget,
    /// A command was required but none was found.
    #[error("expected a command")]
    MissingCommand,
}

/// A syntax error together with where it happened.
///
/// The parser stops at the first error; nothing is recovered or retried.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("{cause} at {location}")]
pub struct Error {
    pub cause: SyntaxError,
    pub location: Location,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_includes_location() {
        let error = Error {
            cause: SyntaxError::UnexpectedToken(")".to_string()),
            location: Location { line: 1, column: 5 },
        };
        assert_eq!(
            error.to_string(),
            "unexpected token `)` at line 1 column 5"
        );
    }
}
