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

//! Implementations of the vsh built-in utilities.
//!
//! Each submodule implements one utility (or a small family, like the
//! directory stack) as a `main(env, args)` function matching
//! [`vsh_env::builtin::Main`]. [`BUILTINS`] is the full name-to-entry
//! table; the CLI inserts it into the environment's registry at startup,
//! which is where the executor looks names up.

pub mod alias;
pub mod bg;
pub mod cd;
pub mod common;
pub mod dirstack;
pub mod echo;
pub mod exit;
pub mod export;
pub mod fg;
pub mod help;
pub mod history;
pub mod jobs;
pub mod local;
pub mod pwd;
pub mod r#return;
pub mod source;
pub mod r#type;
pub mod unset;

use vsh_env::builtin::Builtin;
use vsh_env::Env;

/// All built-in utilities, by name.
pub const BUILTINS: &[(&str, Builtin)] = &[
    (
        "alias",
        Builtin {
            execute: alias::main,
            synopsis: "alias [name=value]",
            description: "Define or display aliases",
        },
    ),
    (
        "bg",
        Builtin {
            execute: bg::main,
            synopsis: "bg [%n]",
            description: "Resume a job in the background",
        },
    ),
    (
        "cd",
        Builtin {
            execute: cd::main,
            synopsis: "cd [dir]",
            description: "Change the current directory",
        },
    ),
    (
        "dirs",
        Builtin {
            execute: dirstack::dirs,
            synopsis: "dirs",
            description: "Display the directory stack",
        },
    ),
    (
        "echo",
        Builtin {
            execute: echo::main,
            synopsis: "echo [-neE] [args...]",
            description: "Display text",
        },
    ),
    (
        "exit",
        Builtin {
            execute: exit::main,
            synopsis: "exit [n]",
            description: "Exit the shell with status n",
        },
    ),
    (
        "export",
        Builtin {
            execute: export::main,
            synopsis: "export [var=value]",
            description: "Set or display exported variables",
        },
    ),
    (
        "fg",
        Builtin {
            execute: fg::main,
            synopsis: "fg [%n]",
            description: "Resume a job in the foreground",
        },
    ),
    (
        "help",
        Builtin {
            execute: help::main,
            synopsis: "help [builtin]",
            description: "Display help for builtins",
        },
    ),
    (
        "history",
        Builtin {
            execute: history::main,
            synopsis: "history [-c] [n]",
            description: "Display or clear the command history",
        },
    ),
    (
        "jobs",
        Builtin {
            execute: jobs::main,
            synopsis: "jobs",
            description: "List active jobs",
        },
    ),
    (
        "local",
        Builtin {
            execute: local::main,
            synopsis: "local var=value",
            description: "Declare a variable in a function",
        },
    ),
    (
        "popd",
        Builtin {
            execute: dirstack::popd,
            synopsis: "popd",
            description: "Pop a directory from the stack",
        },
    ),
    (
        "pushd",
        Builtin {
            execute: dirstack::pushd,
            synopsis: "pushd [dir]",
            description: "Push a directory onto the stack",
        },
    ),
    (
        "pwd",
        Builtin {
            execute: pwd::main,
            synopsis: "pwd",
            description: "Print the working directory",
        },
    ),
    (
        "return",
        Builtin {
            execute: r#return::main,
            synopsis: "return [n]",
            description: "Return from a function",
        },
    ),
    (
        "source",
        Builtin {
            execute: source::main,
            synopsis: "source file",
            description: "Execute commands from a file",
        },
    ),
    (
        ".",
        Builtin {
            execute: source::main,
            synopsis: ". file",
            description: "Execute commands from a file",
        },
    ),
    (
        "type",
        Builtin {
            execute: r#type::main,
            synopsis: "type name",
            description: "Describe a command",
        },
    ),
    (
        "unalias",
        Builtin {
            execute: alias::unalias,
            synopsis: "unalias name",
            description: "Remove an alias",
        },
    ),
    (
        "unset",
        Builtin {
            execute: unset::main,
            synopsis: "unset var",
            description: "Unset a variable",
        },
    ),
];

/// Registers every built-in into the environment.
pub fn register(env: &mut Env) {
    for &(name, builtin) in BUILTINS {
        env.builtins.insert(name, builtin);
    }
}
