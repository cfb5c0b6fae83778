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

//! Jobs built-in: lists the jobs the shell is managing, most recent
//! marked with `+`.

use std::ops::ControlFlow::Continue;
use vsh_env::job::fmt::{Marker, Report};
use vsh_env::semantics::{ExitStatus, Result};
use vsh_env::{signal, Env};

/// Entry point of the `jobs` built-in.
pub fn main(env: &mut Env, _args: &[String]) -> Result {
    // Fold in anything the SIGCHLD handler reaped since the last sweep so
    // the listing shows current states.
    signal::reap_pending(&mut env.jobs);

    let current = env.jobs.most_recent().map(|job| job.id);
    for job in env.jobs.iter() {
        let marker = if Some(job.id) == current {
            Marker::CurrentJob
        } else {
            Marker::None
        };
        println!("{}", Report { job, marker });
    }
    Continue(ExitStatus::SUCCESS)
}
