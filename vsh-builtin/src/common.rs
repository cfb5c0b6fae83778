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

//! Utilities shared by the built-ins.

use std::fmt::Display;
use std::ops::ControlFlow::Continue;
use vsh_env::semantics::{ExitStatus, Result};
use vsh_env::Env;

/// Reports `vsh: UTILITY: MESSAGE` on standard error and fails.
pub fn failure(utility: &str, message: impl Display) -> Result {
    eprintln!("vsh: {utility}: {message}");
    Continue(ExitStatus::FAILURE)
}

/// Resolves a job specifier argument for `fg` and `bg`.
///
/// Accepts `%N` or `N`; with no argument the most recent job is used.
/// Reports an error and returns `None` when the job cannot be found.
pub fn resolve_job_spec(env: &Env, utility: &str, args: &[String]) -> Option<usize> {
    let Some(arg) = args.get(1) else {
        match env.jobs.most_recent() {
            Some(job) => return Some(job.id),
            None => {
                eprintln!("vsh: {utility}: no current job");
                return None;
            }
        }
    };

    let digits = arg.strip_prefix('%').unwrap_or(arg);
    let id: usize = match digits.parse() {
        Ok(id) if id > 0 => id,
        _ => {
            eprintln!("vsh: {utility}: {arg}: no such job");
            return None;
        }
    };

    if env.jobs.get(id).is_none() {
        eprintln!("vsh: {utility}: %{id}: no such job");
        return None;
    }
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsh_env::job::{Job, Pid};

    fn env_with_job() -> (Env, usize) {
        let mut env = Env::with_no_variables("vsh");
        let id = env.jobs.add(Job::new(
            Pid::from_raw(100),
            vec![Pid::from_raw(100)],
            "sleep 5".to_string(),
            false,
        ));
        (env, id)
    }

    #[test]
    fn no_argument_means_the_most_recent_job() {
        let (env, id) = env_with_job();
        let args = vec!["fg".to_string()];
        assert_eq!(resolve_job_spec(&env, "fg", &args), Some(id));
    }

    #[test]
    fn percent_and_bare_numbers_both_work() {
        let (env, id) = env_with_job();
        for spec in ["%1", "1"] {
            let args = vec!["fg".to_string(), spec.to_string()];
            assert_eq!(resolve_job_spec(&env, "fg", &args), Some(id));
        }
    }

    #[test]
    fn bad_specs_are_rejected() {
        let (env, _) = env_with_job();
        for spec in ["%x", "0", "-1", "%99"] {
            let args = vec!["fg".to_string(), spec.to_string()];
            assert_eq!(resolve_job_spec(&env, "fg", &args), None, "{spec}");
        }
    }

    #[test]
    fn empty_job_table_has_no_current_job() {
        let env = Env::with_no_variables("vsh");
        let args = vec!["bg".to_string()];
        assert_eq!(resolve_job_spec(&env, "bg", &args), None);
    }
}
