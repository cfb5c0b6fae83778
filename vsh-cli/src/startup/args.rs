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

//! Command line argument parser for the shell.

use thiserror::Error;

/// Input to the main read-eval loop.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum Source {
    /// Read from standard input (no operands)
    #[default]
    Stdin,
    /// Read from a script file
    File { path: String },
    /// Execute a command string (the `-c` option)
    String(String),
}

/// Configuration for starting the main read-eval loop.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Run {
    /// Input source
    pub source: Source,
    /// Value of `$0`
    pub arg0: String,
    /// Positional parameters
    pub positional_params: Vec<String>,
}

/// Parse result.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Parse {
    /// Runs the shell
    Run(Run),
    /// Prints the help message and exits
    Help,
    /// Prints version information and exits
    Version,
}

impl From<Run> for Parse {
    fn from(run: Run) -> Self {
        Parse::Run(run)
    }
}

/// Error in command line parsing.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// An option that is not defined
    #[error("unknown option `{0}`")]
    UnknownOption(String),

    /// The `-c` option without a command string
    #[error("option `-c` requires an argument")]
    MissingCommandString,
}

/// Parses the command line, `argv[0]` included.
pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Parse, Error> {
    let mut args = args.into_iter();
    let arg0 = args.next().unwrap_or_else(|| "vsh".to_string());

    let mut command_string = None;
    let mut operands: Vec<String> = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-c" => match args.next() {
                Some(command) => {
                    command_string = Some(command);
                    break;
                }
                None => return Err(Error::MissingCommandString),
            },
            "-h" | "--help" => return Ok(Parse::Help),
            "-v" | "--version" => return Ok(Parse::Version),
            "--" => break,
            _ if arg.starts_with('-') && arg.len() > 1 => {
                return Err(Error::UnknownOption(arg));
            }
            _ => {
                operands.push(arg);
                break;
            }
        }
    }
    operands.extend(args);

    if let Some(command) = command_string {
        return Ok(Run {
            source: Source::String(command),
            arg0,
            positional_params: operands,
        }
        .into());
    }

    let mut operands = operands.into_iter();
    match operands.next() {
        // Script mode: $0 is the script path and the rest are positional.
        Some(path) => Ok(Run {
            source: Source::File { path: path.clone() },
            arg0: path,
            positional_params: operands.collect(),
        }
        .into()),
        None => Ok(Run {
            source: Source::Stdin,
            arg0,
            positional_params: Vec::new(),
        }
        .into()),
    }
}
