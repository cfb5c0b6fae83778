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

//! Type definitions for job management.
//!
//! A [`Job`] is the set of processes of one pipeline, managed as a unit:
//! one process group, one job number, one state. The [`JobSet`] holds every
//! job the shell knows about. State transitions are driven by `waitpid`
//! statuses fed through [`JobSet::update`], whether from the foreground
//! wait loop or from the drained SIGCHLD queue (see [`crate::signal`]).
//!
//! A job leaves the table only once its completion has been reported to the
//! user, or when the shell shuts down.

pub mod fmt;

#[doc(no_inline)]
pub use nix::sys::wait::WaitStatus;
#[doc(no_inline)]
pub use nix::unistd::Pid;

use crate::semantics::ExitStatus;

/// Lifecycle state of a job.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum JobState {
    /// At least one process of the job is running.
    Running,
    /// The job was stopped by a signal.
    Stopped,
    /// Every process exited normally.
    Done,
    /// The job was terminated by a signal.
    Killed,
}

impl JobState {
    /// Whether the job has finished, by exit or by signal.
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, JobState::Done | JobState::Killed)
    }
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            JobState::Running => "Running",
            JobState::Stopped => "Stopped",
            JobState::Done => "Done",
            JobState::Killed => "Killed",
        })
    }
}

/// Completed-pid marker inside [`Job::pids`].
const NO_PID: Pid = Pid::from_raw(0);

/// Set of one or more processes executing a pipeline.
#[derive(Clone, Debug)]
pub struct Job {
    /// Job number, unique within the [`JobSet`] and assigned on add.
    pub id: usize,

    /// Process group shared by every process of the job.
    pub pgid: Pid,

    /// Processes of the job, in pipeline order. A slot is zeroed once its
    /// process has been reaped.
    pids: Vec<Pid>,

    /// Pid of the last pipeline stage; its status is the job's status.
    last_pid: Pid,

    /// Current state.
    pub state: JobState,

    /// Command line for display in reports.
    pub command: String,

    /// Whether the current state has been reported to the user.
    pub notified: bool,

    /// Whether the job was started in the foreground.
    pub foreground: bool,

    /// Exit status of the last pipeline stage, once reaped.
    pub exit_status: Option<ExitStatus>,
}

impl Job {
    /// Creates a job for the given processes.
    ///
    /// `pids` must be non-empty; `pgid` is normally `pids[0]`. The job
    /// number is assigned when the job is added to a [`JobSet`].
    #[must_use]
    pub fn new(pgid: Pid, pids: Vec<Pid>, command: String, foreground: bool) -> Self {
        debug_assert!(!pids.is_empty(), "a job contains at least one process");
        let last_pid = pids.last().copied().unwrap_or(pgid);
        Job {
            id: 0,
            pgid,
            pids,
            last_pid,
            state: JobState::Running,
            command,
            notified: false,
            foreground,
            exit_status: None,
        }
    }

    /// The processes of this job; reaped slots read as pid 0.
    #[must_use]
    pub fn pids(&self) -> &[Pid] {
        &self.pids
    }

    /// Whether `pid` is a live (unreaped) process of this job.
    #[must_use]
    pub fn contains(&self, pid: Pid) -> bool {
        pid != NO_PID && self.pids.contains(&pid)
    }

    /// Applies one `waitpid` status to this job, per the job state machine:
    /// a stop makes it `Stopped`, a continue makes it `Running`, and an
    /// exit or signal death marks the pid complete. When the last pid
    /// completes, the job becomes `Done` or `Killed`. Every transition
    /// clears `notified`.
    pub fn apply(&mut self, pid: Pid, status: WaitStatus) {
        match status {
            WaitStatus::Stopped(..) => {
                self.state = JobState::Stopped;
                self.notified = false;
            }
            WaitStatus::Continued(..) => {
                self.state = JobState::Running;
                self.notified = false;
            }
            WaitStatus::Exited(..) | WaitStatus::Signaled(..) => {
                if pid == self.last_pid {
                    self.exit_status = ExitStatus::try_from(status).ok();
                }
                if let Some(slot) = self.pids.iter_mut().find(|p| **p == pid) {
                    *slot = NO_PID;
                }
                if self.pids.iter().all(|p| *p == NO_PID) {
                    self.state = if matches!(status, WaitStatus::Signaled(..)) {
                        JobState::Killed
                    } else {
                        JobState::Done
                    };
                    self.notified = false;
                }
            }
            _ => {}
        }
    }
}

/// Collection of jobs.
#[derive(Clone, Debug, Default)]
pub struct JobSet {
    jobs: Vec<Job>,
    next_id: usize,
}

impl JobSet {
    /// Creates an empty job set.
    #[must_use]
    pub fn new() -> Self {
        JobSet {
            jobs: Vec::new(),
            next_id: 1,
        }
    }

    /// Adds a job, assigning it the next job number, and returns that
    /// number.
    pub fn add(&mut self, mut job: Job) -> usize {
        job.id = self.next_id;
        self.next_id += 1;
        let id = job.id;
        self.jobs.push(job);
        id
    }

    /// Removes a job by number.
    pub fn remove(&mut self, id: usize) -> Option<Job> {
        let index = self.jobs.iter().position(|j| j.id == id)?;
        Some(self.jobs.remove(index))
    }

    /// Looks up a job by number.
    #[must_use]
    pub fn get(&self, id: usize) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    /// Looks up a job by number, mutably.
    pub fn get_mut(&mut self, id: usize) -> Option<&mut Job> {
        self.jobs.iter_mut().find(|j| j.id == id)
    }

    /// Finds the job containing the given process.
    #[must_use]
    pub fn find_by_pid(&self, pid: Pid) -> Option<&Job> {
        self.jobs.iter().find(|j| j.contains(pid))
    }

    /// Finds the job with the given process group.
    #[must_use]
    pub fn find_by_pgid(&self, pgid: Pid) -> Option<&Job> {
        self.jobs.iter().find(|j| j.pgid == pgid)
    }

    /// The job with the highest number, the default job of `fg`/`bg`.
    #[must_use]
    pub fn most_recent(&self) -> Option<&Job> {
        self.jobs.iter().max_by_key(|j| j.id)
    }

    /// Iterates over jobs in job-number order.
    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter()
    }

    /// Applies one reaped status to the job owning the pid.
    ///
    /// Returns the job number, or `None` if no job contains the pid.
    pub fn update(&mut self, pid: Pid, status: WaitStatus) -> Option<usize> {
        let job = self.jobs.iter_mut().find(|j| j.contains(pid))?;
        job.apply(pid, status);
        Some(job.id)
    }

    /// Removes and returns every finished job that has not been reported
    /// yet. Used by the between-prompts notification sweep.
    pub fn take_finished_unnotified(&mut self) -> Vec<Job> {
        let mut taken = Vec::new();
        self.jobs.retain(|job| {
            if job.state.is_finished() && !job.notified {
                taken.push(job.clone());
                false
            } else {
                true
            }
        });
        taken
    }

    /// Number of jobs in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
