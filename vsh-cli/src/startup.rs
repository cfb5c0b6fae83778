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

//! Shell startup: environment construction and interactive
//! initialization.

pub mod args;

use std::path::PathBuf;
use vsh_env::{signal, terminal, Env};

/// Version string reported by `--version` and `$VSH_VERSION`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prints the `--help` message.
pub fn print_usage(arg0: &str) {
    println!("Usage: {arg0} [options] [script [args...]]");
    println!("Options:");
    println!("  -c CMD         Execute CMD and exit");
    println!("  -h, --help     Show this help");
    println!("  -v, --version  Show version");
}

/// Prints the `--version` message.
pub fn print_version() {
    println!("vsh {VERSION}");
    println!("A POSIX-style shell written in Rust");
}

/// Creates the shell environment: imported variables, registered
/// builtins, positional parameters.
#[must_use]
pub fn prepare_env(run: &args::Run) -> Env {
    let mut env = Env::new(run.arg0.clone());
    vsh_builtin::register(&mut env);
    env.positional_params = run.positional_params.clone();
    env.variables.set("VSH_VERSION", VERSION, true);
    env
}

/// Interactive-only initialization: job control, signals, history, and
/// the `~/.vshrc` startup file.
pub fn init_interactive(env: &mut Env) {
    env.interactive = true;
    env.saved_terminal = terminal::save_attributes();

    // Put the shell in its own process group owning the terminal.
    match terminal::take_control() {
        Ok(pgid) => env.shell_pid = pgid,
        Err(error) => eprintln!("vsh: cannot take terminal control: {error}"),
    }

    signal::ignore_job_control_signals();
    if let Err(error) = signal::install_sigchld_handler() {
        eprintln!("vsh: cannot install SIGCHLD handler: {error}");
    }

    if let Some(path) = history_path(env) {
        let _ = env.history.load(&path);
    }

    if let Some(rc) = rc_path(env) {
        if rc.is_file() {
            let args = vec!["source".to_string(), rc.to_string_lossy().into_owned()];
            let _ = vsh_builtin::source::main(env, &args);
        }
    }
}

/// Interactive shutdown: persist history, reap jobs, restore the
/// terminal.
pub fn finalize_interactive(env: &mut Env) {
    if let Some(path) = history_path(env) {
        let _ = env.history.save(&path);
    }
    vsh_semantics::job::shutdown(env);
    if let Some(saved) = env.saved_terminal.take() {
        terminal::restore_attributes(&saved);
    }
}

/// `~/.vsh_history`, if `$HOME` is set.
#[must_use]
pub fn history_path(env: &Env) -> Option<PathBuf> {
    let home = env.variables.get("HOME")?;
    if home.is_empty() {
        return None;
    }
    Some(PathBuf::from(home).join(".vsh_history"))
}

/// `~/.vshrc`, if `$HOME` is set.
#[must_use]
pub fn rc_path(env: &Env) -> Option<PathBuf> {
    let home = env.variables.get("HOME")?;
    if home.is_empty() {
        return None;
    }
    Some(PathBuf::from(home).join(".vshrc"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_env_registers_builtins_and_params() {
        let run = args::Run {
            source: args::Source::Stdin,
            arg0: "vsh".to_string(),
            positional_params: vec!["a".to_string()],
        };
        let env = prepare_env(&run);
        assert!(env.builtin("cd").is_some());
        assert_eq!(env.positional_params, ["a"]);
        assert_eq!(env.variables.get("VSH_VERSION"), Some(VERSION));
        assert!(env.variables.is_exported("VSH_VERSION"));
    }

    #[test]
    fn history_path_needs_home() {
        let mut env = Env::with_no_variables("vsh");
        assert_eq!(history_path(&env), None);
        env.variables.set("HOME", "/home/u", false);
        assert_eq!(
            history_path(&env),
            Some(PathBuf::from("/home/u/.vsh_history"))
        );
    }
}
