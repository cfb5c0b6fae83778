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

//! Command execution semantics for vsh.
//!
//! This crate walks the syntax tree produced by `vsh-syntax` and makes it
//! happen: word [expansion], [redirection](redir) wiring, the
//! [executor](command) with its fork/exec discipline, multi-stage
//! [pipelines](pipeline), and the foreground/background [job waits](job)
//! that coordinate the controlling terminal.
//!
//! The central entry point is [`command::execute`], which returns
//! `ControlFlow<Divert, ExitStatus>`: `Continue` carries the exit status,
//! `Break` unwinds the executor for `return` and `exit`.

pub mod command;
pub mod expansion;
pub mod glob;
pub mod job;
pub mod pipeline;
pub mod redir;
pub mod runner;

pub use command::execute;
