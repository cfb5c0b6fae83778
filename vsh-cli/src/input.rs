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

//! Line input.
//!
//! The core consumes complete logical lines through the [`LineReader`]
//! boundary: `read_line(prompt)` blocks and returns `None` at end of
//! input. The interactive implementation is a `rustyline` editor (raw
//! mode, cursor movement, in-editor history navigation); everything else
//! reads a `BufRead` line by line and ignores the prompt.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::BufRead;
use vsh_env::Env;

/// Source of complete command lines.
pub trait LineReader {
    /// Reads the next logical line, without its trailing newline.
    /// Returns `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> Option<String>;

    /// Offers an accepted line to the editor's own recall list.
    fn remember(&mut self, _line: &str) {}
}

/// Interactive editor-backed reader.
pub struct Editor {
    editor: DefaultEditor,
}

impl Editor {
    /// Creates the interactive editor. Fails only if the terminal cannot
    /// be configured.
    pub fn new() -> Option<Self> {
        DefaultEditor::new().ok().map(|editor| Editor { editor })
    }
}

impl LineReader for Editor {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        match self.editor.readline(prompt) {
            Ok(line) => Some(line),
            // Ctrl+C at the prompt abandons the current line.
            Err(ReadlineError::Interrupted) => Some(String::new()),
            Err(_) => None,
        }
    }

    fn remember(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }
}

/// Non-interactive reader over any buffered input.
pub struct PlainReader<R: BufRead> {
    input: R,
}

impl<R: BufRead> PlainReader<R> {
    pub fn new(input: R) -> Self {
        PlainReader { input }
    }
}

impl<R: BufRead> LineReader for PlainReader<R> {
    fn read_line(&mut self, _prompt: &str) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                }
                Some(line)
            }
        }
    }
}

/// Builds the prompt: `user@host:dir$ `, with `$HOME` shortened to `~`
/// and the last exit status shown when it was not zero.
#[must_use]
pub fn prompt(env: &Env) -> String {
    let user = env.variables.get("USER").unwrap_or("user").to_string();

    let host = nix::unistd::gethostname()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "localhost".to_string());
    let host = host.split('.').next().unwrap_or(&host).to_string();

    let cwd = std::env::current_dir()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "?".to_string());
    let cwd = shorten_home(&cwd, env.variables.get("HOME"));

    if env.exit_status.is_successful() {
        format!("{user}@{host}:{cwd}$ ")
    } else {
        format!("{user}@{host}:{cwd} [{}]$ ", env.exit_status)
    }
}

fn shorten_home(cwd: &str, home: Option<&str>) -> String {
    if let Some(home) = home.filter(|h| !h.is_empty()) {
        if let Some(rest) = cwd.strip_prefix(home) {
            if rest.is_empty() || rest.starts_with('/') {
                return format!("~{rest}");
            }
        }
    }
    cwd.to_string()
}
