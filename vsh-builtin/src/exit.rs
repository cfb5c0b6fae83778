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

//! Exit built-in
//!
//! # Synopsis
//!
//! ```sh
//! exit [n]
//! ```
//!
//! # Description
//!
//! Requests shell termination with status `n` (default: the current `$?`)
//! by diverting with [`Divert::Exit`]. If there are stopped jobs, the
//! first attempt only warns; an immediately repeated `exit` goes through.

use std::ops::ControlFlow::{Break, Continue};
use std::sync::atomic::{AtomicBool, Ordering};
use vsh_env::job::JobState;
use vsh_env::semantics::{Divert, ExitStatus, Result};
use vsh_env::Env;

static WARNED_ABOUT_JOBS: AtomicBool = AtomicBool::new(false);

/// Entry point of the `exit` built-in.
pub fn main(env: &mut Env, args: &[String]) -> Result {
    let has_stopped = env.jobs.iter().any(|job| job.state == JobState::Stopped);
    if has_stopped && !WARNED_ABOUT_JOBS.swap(true, Ordering::Relaxed) {
        eprintln!("There are stopped jobs.");
        return Continue(ExitStatus::FAILURE);
    }
    WARNED_ABOUT_JOBS.store(false, Ordering::Relaxed);

    let status = match args.get(1) {
        None => None,
        Some(arg) => match arg.parse::<i32>() {
            Ok(n) => Some(ExitStatus(n & 0xff)),
            Err(_) => {
                eprintln!("vsh: exit: {arg}: numeric argument required");
                Some(ExitStatus::ERROR)
            }
        },
    };

    env.running = false;
    Break(Divert::Exit(status))
}
