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

//! Job report formatting.
//!
//! The format is shared by the `jobs` builtin, the between-prompt
//! completion notifications, and the stop report after a foreground wait:
//!
//! ```text
//! [1]+  Running                 sleep 5
//! [2]   Done                    make all
//! ```

use super::Job;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result;

/// Marker distinguishing the current job in a listing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Marker {
    None,
    CurrentJob,
}

impl Marker {
    /// `'+'` for the current job, `' '` otherwise.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Marker::None => ' ',
            Marker::CurrentJob => '+',
        }
    }
}

/// Wrapper implementing the job status report format.
#[derive(Clone, Copy, Debug)]
pub struct Report<'a> {
    /// Job to be reported.
    pub job: &'a Job,
    /// Marker after the job number.
    pub marker: Marker,
}

impl Display for Report<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "[{}]{}  {:<24}{}",
            self.job.id,
            self.marker.as_char(),
            self.job.state,
            self.job.command
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::{JobState, Pid};

    fn sample_job() -> Job {
        let mut job = Job::new(
            Pid::from_raw(100),
            vec![Pid::from_raw(100)],
            "sleep 5".to_string(),
            false,
        );
        job.id = 1;
        job
    }

    #[test]
    fn running_report() {
        let job = sample_job();
        let report = Report {
            job: &job,
            marker: Marker::CurrentJob,
        };
        assert_eq!(
            report.to_string(),
            "[1]+  Running                 sleep 5"
        );
    }

    #[test]
    fn done_report_without_marker() {
        let mut job = sample_job();
        job.state = JobState::Done;
        let report = Report {
            job: &job,
            marker: Marker::None,
        };
        assert_eq!(
            report.to_string(),
            "[1]   Done                    sleep 5"
        );
    }
}
