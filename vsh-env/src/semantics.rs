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

//! Type definitions for command execution.

use nix::sys::wait::WaitStatus;
use std::ops::ControlFlow;

/// Number that summarizes the result of command execution.
///
/// An exit status is an integer in `0..=255` returned from a command. Zero
/// conventionally means success. The special parameter `$?` expands to the
/// exit status of the last executed command, and the exit status steers
/// `&&`, `||`, `!`, and the conditional compound commands.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ExitStatus(pub i32);

impl ExitStatus {
    /// Exit status of 0: success.
    pub const SUCCESS: ExitStatus = ExitStatus(0);

    /// Exit status of 1: failure.
    pub const FAILURE: ExitStatus = ExitStatus(1);

    /// Exit status of 2: syntax or usage error.
    pub const ERROR: ExitStatus = ExitStatus(2);

    /// Exit status of 126: command found but not executable.
    pub const NOEXEC: ExitStatus = ExitStatus(126);

    /// Exit status of 127: command not found.
    pub const NOT_FOUND: ExitStatus = ExitStatus(127);

    /// Returns true if and only if `self` is zero.
    #[must_use]
    pub const fn is_successful(&self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i32> for ExitStatus {
    fn from(value: i32) -> ExitStatus {
        ExitStatus(value)
    }
}

impl From<ExitStatus> for i32 {
    fn from(exit_status: ExitStatus) -> i32 {
        exit_status.0
    }
}

/// Error returned when a [`WaitStatus`] describes a process that has not
/// yet exited, been signaled, or stopped.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct StillAliveError;

/// Converts a `WaitStatus` to an `ExitStatus`.
///
/// A normal exit yields the exit code; death by signal (and a stop) yields
/// 128 plus the signal number.
impl TryFrom<WaitStatus> for ExitStatus {
    type Error = StillAliveError;
    fn try_from(status: WaitStatus) -> std::result::Result<Self, StillAliveError> {
        match status {
            WaitStatus::Exited(_, code) => Ok(ExitStatus(code)),
            WaitStatus::Signaled(_, signal, _) | WaitStatus::Stopped(_, signal) => {
                Ok(ExitStatus(128 + signal as i32))
            }
            _ => Err(StillAliveError),
        }
    }
}

/// Request to divert the normal flow of execution.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Divert {
    /// Return from the currently executing function (or, at top level,
    /// finish the current command) with the given exit status.
    Return(Option<ExitStatus>),

    /// Exit the shell with the given exit status.
    Exit(Option<ExitStatus>),
}

impl Divert {
    /// Returns the exit status associated with the divert, if any.
    #[must_use]
    pub fn exit_status(&self) -> Option<ExitStatus> {
        match self {
            Divert::Return(exit_status) | Divert::Exit(exit_status) => *exit_status,
        }
    }
}

/// Result of command execution.
///
/// `Break` carries a [`Divert`] that unwinds the executor; `Continue`
/// carries the exit status of the command that just ran.
pub type Result<T = ExitStatus> = ControlFlow<Divert, T>;
