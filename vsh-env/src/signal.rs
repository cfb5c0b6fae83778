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

//! Signal configuration and the SIGCHLD pipeline.
//!
//! The shell ignores the keyboard and job-control signals (SIGINT, SIGQUIT,
//! SIGTSTP, SIGTTIN, SIGTTOU, SIGPIPE) and catches SIGCHLD with
//! `SA_RESTART | SA_NOCLDSTOP`. Children reset all of these to their
//! defaults right after the fork.
//!
//! The SIGCHLD handler must not allocate, print, or lock. It therefore
//! confines itself to the `waitpid(-1, …, WNOHANG|WUNTRACED|WCONTINUED)`
//! reaping loop and lock-free stores of the raw `(pid, status)` pairs into
//! a fixed ring of atomics, saving and restoring `errno` around the loop.
//! The main flow applies the recorded statuses to the job table via
//! [`reap_pending`], at the top of each prompt cycle and inside the
//! foreground wait, with SIGCHLD blocked while the queue and table are
//! touched. Structural changes to the job table happen only on the main
//! flow, under [`with_sigchld_blocked`].

use crate::job::JobSet;
use nix::libc;
use nix::sys::signal::{
    sigaction, sigprocmask, SaFlags, SigAction, SigHandler, SigSet, SigmaskHow, Signal,
};
use nix::sys::wait::WaitStatus;
use nix::unistd::Pid;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};

/// Capacity of the pending-status ring.
///
/// More simultaneous unreaped status changes than this would drop entries;
/// the foreground wait loop re-polls with `waitpid` anyway, so a drop only
/// delays a background notification.
const PENDING_CAPACITY: usize = 128;

const ATOMIC_ZERO: AtomicI32 = AtomicI32::new(0);
static PENDING_PIDS: [AtomicI32; PENDING_CAPACITY] = [ATOMIC_ZERO; PENDING_CAPACITY];
static PENDING_STATUSES: [AtomicI32; PENDING_CAPACITY] = [ATOMIC_ZERO; PENDING_CAPACITY];
static PENDING_COUNT: AtomicUsize = AtomicUsize::new(0);

/// The SIGCHLD handler: reap and record, nothing else.
extern "C" fn handle_sigchld(_signal: libc::c_int) {
    let saved_errno = unsafe { *libc::__errno_location() };

    loop {
        let mut status: libc::c_int = 0;
        let pid = unsafe {
            libc::waitpid(
                -1,
                &mut status,
                libc::WNOHANG | libc::WUNTRACED | libc::WCONTINUED,
            )
        };
        if pid <= 0 {
            break;
        }
        let slot = PENDING_COUNT.load(Ordering::Relaxed);
        if slot < PENDING_CAPACITY {
            PENDING_PIDS[slot].store(pid, Ordering::Relaxed);
            PENDING_STATUSES[slot].store(status, Ordering::Relaxed);
            PENDING_COUNT.store(slot + 1, Ordering::Release);
        }
    }

    unsafe { *libc::__errno_location() = saved_errno };
}

/// Installs the SIGCHLD handler with `SA_RESTART | SA_NOCLDSTOP`.
pub fn install_sigchld_handler() -> nix::Result<()> {
    let action = SigAction::new(
        SigHandler::Handler(handle_sigchld),
        SaFlags::SA_RESTART | SaFlags::SA_NOCLDSTOP,
        SigSet::empty(),
    );
    unsafe { sigaction(Signal::SIGCHLD, &action) }?;
    Ok(())
}

/// Signals the interactive shell ignores for itself.
const IGNORED_SIGNALS: [Signal; 6] = [
    Signal::SIGINT,
    Signal::SIGQUIT,
    Signal::SIGTSTP,
    Signal::SIGTTIN,
    Signal::SIGTTOU,
    Signal::SIGPIPE,
];

/// Signals a child resets to their default dispositions after the fork.
const CHILD_RESET_SIGNALS: [Signal; 6] = [
    Signal::SIGINT,
    Signal::SIGQUIT,
    Signal::SIGTSTP,
    Signal::SIGTTIN,
    Signal::SIGTTOU,
    Signal::SIGCHLD,
];

/// Sets the shell's own dispositions: ignore keyboard and job-control
/// signals so they reach the foreground job instead.
pub fn ignore_job_control_signals() {
    for signal in IGNORED_SIGNALS {
        let _ = unsafe { nix::sys::signal::signal(signal, SigHandler::SigIgn) };
    }
}

/// Resets signal dispositions to their defaults in a freshly forked child.
///
/// Async-signal-safe; called between `fork` and `exec`.
pub fn reset_signals_for_child() {
    for signal in CHILD_RESET_SIGNALS {
        let _ = unsafe { nix::sys::signal::signal(signal, SigHandler::SigDfl) };
    }
}

/// Runs `f` with SIGCHLD blocked.
///
/// Required around structural access to the job table and around draining
/// the pending-status queue, so the handler cannot interleave.
pub fn with_sigchld_blocked<T>(f: impl FnOnce() -> T) -> T {
    let mut chld = SigSet::empty();
    chld.add(Signal::SIGCHLD);
    let mut previous = SigSet::empty();
    let blocked = sigprocmask(SigmaskHow::SIG_BLOCK, Some(&chld), Some(&mut previous)).is_ok();
    let result = f();
    if blocked {
        let _ = sigprocmask(SigmaskHow::SIG_SETMASK, Some(&previous), None);
    }
    result
}

/// Takes every `(pid, status)` pair the SIGCHLD handler has recorded since
/// the last call.
#[must_use]
pub fn take_pending_statuses() -> Vec<(Pid, WaitStatus)> {
    with_sigchld_blocked(|| {
        let count = PENDING_COUNT.load(Ordering::Acquire);
        let mut statuses = Vec::with_capacity(count);
        for slot in 0..count {
            let pid = Pid::from_raw(PENDING_PIDS[slot].load(Ordering::Relaxed));
            let raw = PENDING_STATUSES[slot].load(Ordering::Relaxed);
            if let Ok(status) = WaitStatus::from_raw(pid, raw) {
                statuses.push((pid, status));
            }
        }
        PENDING_COUNT.store(0, Ordering::Release);
        statuses
    })
}

/// Applies every pending SIGCHLD status to the job table.
pub fn reap_pending(jobs: &mut JobSet) {
    for (pid, status) in take_pending_statuses() {
        jobs.update(pid, status);
    }
}
