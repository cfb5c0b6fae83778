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

//! Redirection application.
//!
//! [`apply`] walks a redirection chain head-first (source order) and
//! rewires file descriptors. External commands apply their redirections in
//! the forked child, where nothing needs undoing. Builtins run in the
//! shell process itself, so [`apply_saving`] first duplicates every
//! descriptor about to be clobbered and the returned [`RedirGuard`]
//! restores them afterwards.
//!
//! Here-documents are recognized by the grammar but not supported by the
//! line-at-a-time driver; applying one prints a warning and continues.

use nix::fcntl::{fcntl, open, FcntlArg, OFlag};
use nix::sys::stat::Mode;
use nix::unistd::{close, dup2};
use std::os::fd::RawFd;
use thiserror::Error;
use vsh_syntax::syntax::{Redir, RedirOp};

/// Error applying a redirection. The failing command reports it and
/// finishes with a non-zero status.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum RedirError {
    /// The target file could not be opened.
    #[error("{target}: {errno}")]
    Open { target: String, errno: nix::Error },

    /// A descriptor could not be duplicated.
    #[error("{fd}: {errno}")]
    Dup { fd: i32, errno: nix::Error },

    /// The target of `>&`/`<&` is not a file descriptor number.
    #[error("{target}: not a valid file descriptor")]
    BadDupTarget { target: String },
}

/// Lowest descriptor used for saved copies, clear of the user-visible fds.
const SAVE_FD_BASE: RawFd = 10;

/// Applies a redirection chain in source order.
///
/// For use in child processes, where the rewiring is permanent.
pub fn apply(redirs: Option<&Redir>) -> Result<(), RedirError> {
    let Some(head) = redirs else { return Ok(()) };
    for redir in head.chain() {
        apply_one(redir)?;
    }
    Ok(())
}

/// Applies a redirection chain, saving every descriptor it replaces.
///
/// For builtins running in the shell process. Dropping the guard without
/// calling [`RedirGuard::restore`] leaks the rewiring, so call it.
pub fn apply_saving(redirs: Option<&Redir>) -> Result<RedirGuard, RedirError> {
    let mut guard = RedirGuard { saved: Vec::new() };
    let Some(head) = redirs else { return Ok(guard) };

    for redir in head.chain() {
        if redir.op != RedirOp::HereDoc {
            guard.save(redir.target_fd());
        }
        if let Err(error) = apply_one(redir) {
            guard.restore();
            return Err(error);
        }
    }
    Ok(guard)
}

/// Saved descriptors to put back after an in-process redirection.
#[derive(Debug, Default)]
pub struct RedirGuard {
    /// `(fd, saved)`: `saved` is a high-numbered copy of the original
    /// descriptor, or `None` if the descriptor was closed before.
    saved: Vec<(RawFd, Option<RawFd>)>,
}

impl RedirGuard {
    fn save(&mut self, fd: RawFd) {
        if self.saved.iter().any(|(f, _)| *f == fd) {
            return;
        }
        let copy = fcntl(fd, FcntlArg::F_DUPFD_CLOEXEC(SAVE_FD_BASE)).ok();
        self.saved.push((fd, copy));
    }

    /// Restores every saved descriptor.
    pub fn restore(&mut self) {
        for (fd, copy) in self.saved.drain(..).rev() {
            match copy {
                Some(copy) => {
                    let _ = dup2(copy, fd);
                    let _ = close(copy);
                }
                None => {
                    let _ = close(fd);
                }
            }
        }
    }
}

fn apply_one(redir: &Redir) -> Result<(), RedirError> {
    let target_fd = redir.target_fd();

    let source = match redir.op {
        RedirOp::Input => open_file(redir.target, OFlag::O_RDONLY)?,
        RedirOp::Output => open_file(
            redir.target,
            OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC,
        )?,
        RedirOp::Append => open_file(
            redir.target,
            OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_APPEND,
        )?,
        RedirOp::DupOut | RedirOp::DupIn => {
            let source: RawFd =
                redir
                    .target
                    .parse()
                    .map_err(|_| RedirError::BadDupTarget {
                        target: redir.target.to_string(),
                    })?;
            dup2(source, target_fd).map_err(|errno| RedirError::Dup {
                fd: source,
                errno,
            })?;
            return Ok(());
        }
        RedirOp::HereDoc => {
            eprintln!("vsh: here-documents are not supported");
            return Ok(());
        }
    };

    let result = dup2(source, target_fd);
    let _ = close(source);
    result.map_err(|errno| RedirError::Dup {
        fd: target_fd,
        errno,
    })?;
    Ok(())
}

fn open_file(target: &str, flags: OFlag) -> Result<RawFd, RedirError> {
    let mode = Mode::S_IRUSR | Mode::S_IWUSR | Mode::S_IRGRP | Mode::S_IROTH;
    open(target, flags, mode).map_err(|errno| RedirError::Open {
        target: target.to_string(),
        errno,
    })
}
