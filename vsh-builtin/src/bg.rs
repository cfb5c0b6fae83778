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

//! Bg built-in: resumes a stopped job (default: the most recent one) in
//! the background with SIGCONT.

use crate::common::resolve_job_spec;
use std::ops::ControlFlow::Continue;
use vsh_env::semantics::{ExitStatus, Result};
use vsh_env::Env;
use vsh_semantics::job;

/// Entry point of the `bg` built-in.
pub fn main(env: &mut Env, args: &[String]) -> Result {
    let Some(id) = resolve_job_spec(env, "bg", args) else {
        return Continue(ExitStatus::FAILURE);
    };
    Continue(job::continue_background(env, id))
}
