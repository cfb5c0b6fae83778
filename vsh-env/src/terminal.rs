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

//! Controlling-terminal ownership.
//!
//! The terminal (standard input) is owned by exactly one process group at a
//! time: the shell's own, or the foreground job's while it runs. These
//! helpers wrap the `tcsetpgrp`/`tcgetpgrp` handoff and the saving of
//! terminal attributes restored at shell exit.

use nix::sys::termios::{self, SetArg, Termios};
use nix::unistd::{self, Pid};
use std::io::{self, IsTerminal};

/// Whether standard input is a terminal.
#[must_use]
pub fn stdin_is_terminal() -> bool {
    io::stdin().is_terminal()
}

/// Hands the controlling terminal to the given process group.
pub fn give_terminal_to(pgid: Pid) -> nix::Result<()> {
    unistd::tcsetpgrp(io::stdin(), pgid)
}

/// The process group currently owning the terminal.
pub fn terminal_owner() -> nix::Result<Pid> {
    unistd::tcgetpgrp(io::stdin())
}

/// Puts the shell into its own process group and takes the terminal.
///
/// Until the shell's process group owns the terminal, the shell signals
/// its group with SIGTTIN and retries, which parks it until a job-control
/// parent foregrounds it. Returns the shell's process group id.
pub fn take_control() -> nix::Result<Pid> {
    loop {
        let pgrp = unistd::getpgrp();
        if terminal_owner()? == pgrp {
            break;
        }
        nix::sys::signal::kill(Pid::from_raw(-pgrp.as_raw()), nix::sys::signal::Signal::SIGTTIN)?;
    }

    let pid = unistd::getpid();
    unistd::setpgid(pid, pid)?;
    give_terminal_to(pid)?;
    Ok(pid)
}

/// Saves the current terminal attributes, if standard input is a terminal.
#[must_use]
pub fn save_attributes() -> Option<Termios> {
    termios::tcgetattr(io::stdin()).ok()
}

/// Restores previously saved terminal attributes.
pub fn restore_attributes(saved: &Termios) {
    let _ = termios::tcsetattr(io::stdin(), SetArg::TCSAFLUSH, saved);
}
