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

//! Shell execution environment.
//!
//! [`Env`] aggregates everything that outlives a single command line:
//! variables, aliases, functions, the job table, the history, the builtin
//! registry, and the shell's own identity and flags. The per-command-line
//! parse arena deliberately lives *outside* `Env`. It is owned by the
//! read-eval loop and lent to the lexer, parser, and executor for exactly
//! one command, so the borrow checker enforces that nothing in `Env` keeps
//! pointing into a reset arena.
//!
//! This crate also defines the execution-result types
//! ([`semantics::ExitStatus`], [`semantics::Divert`]), the signal plumbing
//! ([`signal`]), and terminal ownership helpers ([`terminal`]).

pub mod alias;
pub mod builtin;
pub mod function;
pub mod history;
pub mod job;
pub mod semantics;
pub mod signal;
pub mod terminal;
pub mod variable;

use self::alias::AliasSet;
use self::builtin::Builtin;
use self::function::FunctionSet;
use self::history::History;
use self::job::JobSet;
use self::semantics::ExitStatus;
use self::variable::VariableSet;
use nix::sys::termios::Termios;
use nix::unistd::Pid;
use std::collections::HashMap;
use std::path::PathBuf;

/// The whole shell execution environment.
///
/// `Env` is single-threaded and lives for the life of the shell process.
pub struct Env {
    /// Shell variables and their export flags.
    pub variables: VariableSet,

    /// Alias definitions.
    pub aliases: AliasSet,

    /// Defined functions.
    pub functions: FunctionSet,

    /// Jobs started by this shell.
    pub jobs: JobSet,

    /// Command history.
    pub history: History,

    /// `pushd`/`popd` directory stack, most recent last.
    pub dir_stack: Vec<PathBuf>,

    /// Registered built-in utilities, by name.
    pub builtins: HashMap<&'static str, Builtin>,

    /// Exit status of the last executed command (`$?`).
    pub exit_status: ExitStatus,

    /// Process id of the shell itself (`$$`).
    pub shell_pid: Pid,

    /// Whether the shell is attached to a terminal and doing job control.
    pub interactive: bool,

    /// Cleared by the `exit` builtin; the read-eval loop checks this every
    /// iteration.
    pub running: bool,

    /// Name the shell was invoked as (`$0`).
    pub arg0: String,

    /// Positional parameters (`$1`…); rebound during a function call.
    pub positional_params: Vec<String>,

    /// Nesting depth of `source`d scripts, to cut infinite recursion.
    pub script_depth: u32,

    /// Terminal attributes to restore at exit, when interactive.
    pub saved_terminal: Option<Termios>,
}

impl Env {
    /// Creates an environment with variables imported from the process
    /// environment.
    ///
    /// The environment starts non-interactive; the startup code flips
    /// [`interactive`](Self::interactive) after inspecting standard input.
    #[must_use]
    pub fn new(arg0: String) -> Self {
        Env {
            variables: VariableSet::from_process_environment(),
            aliases: AliasSet::new(),
            functions: FunctionSet::new(),
            jobs: JobSet::new(),
            history: History::default(),
            dir_stack: Vec::new(),
            builtins: HashMap::new(),
            exit_status: ExitStatus::SUCCESS,
            shell_pid: nix::unistd::getpid(),
            interactive: false,
            running: true,
            arg0,
            positional_params: Vec::new(),
            script_depth: 0,
            saved_terminal: None,
        }
    }

    /// Creates an empty environment that does not look at the process
    /// environment. Intended for tests.
    #[must_use]
    pub fn with_no_variables(arg0: &str) -> Self {
        Env {
            variables: VariableSet::new(),
            ..Self::new(arg0.to_string())
        }
    }

    /// Looks up a registered built-in by name.
    #[must_use]
    pub fn builtin(&self, name: &str) -> Option<Builtin> {
        self.builtins.get(name).copied()
    }
}
