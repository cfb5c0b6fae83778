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

//! Waiting on jobs and coordinating the terminal.
//!
//! A foreground wait hands the controlling terminal to the job's process
//! group, reaps with `waitpid(-pgid, WUNTRACED)` until the job finishes or
//! stops, then takes the terminal back, so between foreground commands
//! the shell's own group always owns it. `EINTR` and `ECHILD` are
//! tolerated: the SIGCHLD handler may win the race for any status, in
//! which case the drained queue supplies it.
//!
//! [`notify_finished`] is the between-prompts sweep: every finished job
//! not yet reported gets its status line and leaves the table.

use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::sys::wait::{waitpid, WaitPidFlag};
use nix::unistd::Pid;
use vsh_env::job::fmt::{Marker, Report};
use vsh_env::job::JobState;
use vsh_env::semantics::ExitStatus;
use vsh_env::{signal, terminal, Env};

/// Waits for a foreground job to finish or stop; returns its exit status.
///
/// The job is removed from the table when it finishes (its completion is
/// reported by the wait itself); a stopped job stays, marked notified,
/// after its stop report is printed.
pub fn wait_foreground(env: &mut Env, id: usize) -> ExitStatus {
    let Some(job) = env.jobs.get(id) else {
        return ExitStatus::FAILURE;
    };
    let pgid = job.pgid;

    if env.interactive {
        let _ = terminal::give_terminal_to(pgid);
    }

    loop {
        // Statuses the SIGCHLD handler reaped before us.
        signal::reap_pending(&mut env.jobs);
        match env.jobs.get(id) {
            Some(job) if job.state == JobState::Running => {}
            _ => break,
        }

        match waitpid(Pid::from_raw(-pgid.as_raw()), Some(WaitPidFlag::WUNTRACED)) {
            Ok(status) => {
                if let Some(pid) = status.pid() {
                    signal::with_sigchld_blocked(|| env.jobs.update(pid, status));
                }
            }
            Err(Errno::EINTR) => continue,
            Err(Errno::ECHILD) => {
                // Everything was reaped by the handler; apply what it saw.
                signal::reap_pending(&mut env.jobs);
                break;
            }
            Err(_) => break,
        }
    }

    if env.interactive {
        let _ = terminal::give_terminal_to(env.shell_pid);
    }

    let Some(job) = env.jobs.get_mut(id) else {
        return ExitStatus::FAILURE;
    };

    match job.state {
        JobState::Stopped => {
            eprintln!();
            eprintln!(
                "{}",
                Report {
                    job,
                    marker: Marker::CurrentJob,
                }
            );
            let status = ExitStatus(128 + Signal::SIGTSTP as i32);
            job.notified = true;
            status
        }
        _ => {
            let status = job.exit_status.unwrap_or(ExitStatus::SUCCESS);
            job.notified = true;
            env.jobs.remove(id);
            status
        }
    }
}

/// Reports and removes finished jobs that the user has not seen yet.
///
/// Called at the top of every prompt cycle.
pub fn notify_finished(env: &mut Env) {
    signal::reap_pending(&mut env.jobs);
    let finished = signal::with_sigchld_blocked(|| env.jobs.take_finished_unnotified());
    for job in finished {
        eprintln!(
            "{}",
            Report {
                job: &job,
                marker: Marker::None,
            }
        );
    }
}

/// Resumes a stopped (or running background) job in the foreground.
pub fn continue_foreground(env: &mut Env, id: usize) -> ExitStatus {
    let Some(job) = env.jobs.get_mut(id) else {
        return ExitStatus::FAILURE;
    };
    job.state = JobState::Running;
    job.foreground = true;
    let pgid = job.pgid;

    if let Err(errno) = kill(Pid::from_raw(-pgid.as_raw()), Signal::SIGCONT) {
        eprintln!("vsh: kill: {errno}");
        return ExitStatus::FAILURE;
    }
    wait_foreground(env, id)
}

/// Resumes a stopped job in the background.
pub fn continue_background(env: &mut Env, id: usize) -> ExitStatus {
    let Some(job) = env.jobs.get_mut(id) else {
        return ExitStatus::FAILURE;
    };
    job.state = JobState::Running;
    job.foreground = false;
    job.notified = false;
    let pgid = job.pgid;
    let command = job.command.clone();

    if let Err(errno) = kill(Pid::from_raw(-pgid.as_raw()), Signal::SIGCONT) {
        eprintln!("vsh: kill: {errno}");
        return ExitStatus::FAILURE;
    }
    eprintln!("[{id}] {command} &");
    ExitStatus::SUCCESS
}

/// Kills and reaps every remaining job. Called at shell shutdown.
pub fn shutdown(env: &mut Env) {
    let targets: Vec<(usize, Pid)> = env
        .jobs
        .iter()
        .filter(|job| !job.state.is_finished())
        .map(|job| (job.id, job.pgid))
        .collect();

    for (_, pgid) in &targets {
        let _ = kill(Pid::from_raw(-pgid.as_raw()), Signal::SIGKILL);
    }
    for (_, pgid) in &targets {
        loop {
            match waitpid(Pid::from_raw(-pgid.as_raw()), None) {
                Ok(_) => continue,
                Err(Errno::EINTR) => continue,
                Err(_) => break,
            }
        }
    }

    signal::with_sigchld_blocked(|| {
        let ids: Vec<usize> = env.jobs.iter().map(|job| job.id).collect();
        for id in ids {
            env.jobs.remove(id);
        }
    });
}
