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

//! Command line interface of vsh.
//!
//! [`bin_main`] parses the invocation, builds the environment, and drives
//! one of the input modes: the interactive read-eval loop on a terminal,
//! a line-by-line reader for piped input and script files, or a single
//! `-c` command string.
//!
//! One command line goes through a fixed sequence: history expansion,
//! history recording, alias substitution, arena reset, lex, parse,
//! execute. The parse arena is owned here, by the loop, and reset at the
//! start of each line, which is what finally frees the previous line's
//! tokens, tree, and expansion results.

pub mod input;
pub mod startup;

use self::input::LineReader;
use self::startup::args::{self, Parse, Source};
use std::io::BufReader;
use std::ops::ControlFlow::{Break, Continue};
use vsh_env::semantics::{Divert, ExitStatus};
use vsh_env::{terminal, Env};
use vsh_semantics::{job, runner};
use vsh_syntax::arena::Arena;

/// Entry point of the `vsh` binary; returns the process exit code.
#[must_use]
pub fn bin_main() -> i32 {
    let arguments: Vec<String> = std::env::args().collect();
    let arg0 = arguments
        .first()
        .cloned()
        .unwrap_or_else(|| "vsh".to_string());

    match args::parse(arguments) {
        Ok(Parse::Help) => {
            startup::print_usage(&arg0);
            0
        }
        Ok(Parse::Version) => {
            startup::print_version();
            0
        }
        Ok(Parse::Run(run)) => run_shell(&run).0,
        Err(error) => {
            eprintln!("vsh: {error}");
            startup::print_usage(&arg0);
            ExitStatus::ERROR.0
        }
    }
}

fn run_shell(run: &args::Run) -> ExitStatus {
    let mut env = startup::prepare_env(run);

    match &run.source {
        Source::String(command) => {
            let mut arena = Arena::new();
            if let Break(divert) = exec_line(&mut env, &mut arena, command) {
                if let Some(status) = divert.exit_status() {
                    env.exit_status = status;
                }
            }
            job::shutdown(&mut env);
            env.exit_status
        }

        Source::File { path } => {
            let file = match std::fs::File::open(path) {
                Ok(file) => file,
                Err(error) => {
                    eprintln!("vsh: cannot open '{path}': {error}");
                    return ExitStatus::FAILURE;
                }
            };
            let mut reader = input::PlainReader::new(BufReader::new(file));
            batch_loop(&mut env, &mut reader)
        }

        Source::Stdin => {
            if terminal::stdin_is_terminal() {
                interactive_loop(&mut env)
            } else {
                let stdin = std::io::stdin();
                let mut reader = input::PlainReader::new(stdin.lock());
                batch_loop(&mut env, &mut reader)
            }
        }
    }
}

/// The interactive read-eval loop.
fn interactive_loop(env: &mut Env) -> ExitStatus {
    startup::init_interactive(env);

    let Some(mut editor) = input::Editor::new() else {
        eprintln!("vsh: cannot initialize the line editor");
        return ExitStatus::FAILURE;
    };

    let mut arena = Arena::new();
    while env.running {
        // Report background jobs that finished since the last prompt.
        job::notify_finished(env);

        let prompt = input::prompt(env);
        let Some(line) = editor.read_line(&prompt) else {
            // End of input (Ctrl+D).
            println!();
            break;
        };
        if line.is_empty() {
            continue;
        }
        editor.remember(&line);

        if let Break(divert) = exec_line(env, &mut arena, &line) {
            if let Some(status) = divert.exit_status() {
                env.exit_status = status;
            }
            if matches!(divert, Divert::Exit(_)) {
                break;
            }
        }
    }

    startup::finalize_interactive(env);
    env.exit_status
}

/// Line-by-line execution of non-interactive input.
fn batch_loop<R: LineReader>(env: &mut Env, reader: &mut R) -> ExitStatus {
    let mut arena = Arena::new();
    while env.running {
        let Some(line) = reader.read_line("") else {
            break;
        };
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Break(divert) = exec_line(env, &mut arena, &line) {
            if let Some(status) = divert.exit_status() {
                env.exit_status = status;
            }
            if matches!(divert, Divert::Exit(_)) {
                break;
            }
        }
    }
    job::shutdown(env);
    env.exit_status
}

/// Runs one submitted command line.
///
/// Ordering within the line is fixed: history expansion, then history
/// recording, then alias substitution, then arena reset, then
/// lex/parse/execute.
pub fn exec_line(env: &mut Env, arena: &mut Arena, line: &str) -> vsh_env::semantics::Result {
    let line = match env.history.expand(line) {
        Ok(None) => line.to_string(),
        Ok(Some(expanded)) => {
            // Echo the expanded command like interactive shells do.
            eprintln!("{expanded}");
            expanded
        }
        Err(error) => {
            eprintln!("vsh: {error}");
            env.exit_status = ExitStatus::FAILURE;
            return Continue(ExitStatus::FAILURE);
        }
    };

    env.history.add(&line);
    let line = env.aliases.substitute(&line);

    arena.reset();
    runner::run_line(env, arena, &line)
}
