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

//! Command history and `!`-reference expansion.
//!
//! The history is a bounded sequence of lines with monotonically growing
//! indices (the numbers the `history` builtin prints and `!N` refers to).
//! Blank lines and immediate duplicates are not recorded. The store
//! persists as a plain line-per-entry text file.
//!
//! History expansion rewrites a leading `!`-reference before anything else
//! touches the line: `!!` (previous command), `!N` (command number N),
//! `!-N` (N commands back), and `!prefix` (most recent command starting
//! with the prefix).

use std::collections::VecDeque;
use std::fs;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Default capacity of the history store.
pub const HISTORY_MAX_SIZE: usize = 1000;

/// One remembered command line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HistoryEntry {
    /// Monotonic history number, starting at 1.
    pub index: usize,
    /// The command line as entered (after history expansion).
    pub line: String,
}

/// Error from history expansion.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum HistoryError {
    /// The `!`-reference matched nothing.
    #[error("{0}: event not found")]
    EventNotFound(String),
}

/// Bounded command history.
#[derive(Clone, Debug)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    next_index: usize,
}

impl Default for History {
    fn default() -> Self {
        History::new(HISTORY_MAX_SIZE)
    }
}

impl History {
    /// Creates an empty history bounded to `capacity` entries.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        History {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
            next_index: 1,
        }
    }

    /// Records a command line.
    ///
    /// Blank lines and repeats of the most recent entry are skipped. When
    /// the history is full the oldest entry is dropped.
    pub fn add(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        if self.entries.back().is_some_and(|e| e.line == line) {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry {
            index: self.next_index,
            line: line.to_string(),
        });
        self.next_index += 1;
    }

    /// Number of remembered lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// The most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Looks up an entry by its history number (`!N`).
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.index == index)
    }

    /// Looks up the entry `n` commands back (`!-N`); `n == 1` is the most
    /// recent entry.
    #[must_use]
    pub fn get_from_end(&self, n: usize) -> Option<&HistoryEntry> {
        if n == 0 {
            return None;
        }
        self.entries.len().checked_sub(n).map(|i| &self.entries[i])
    }

    /// Finds the most recent entry starting with `prefix`.
    #[must_use]
    pub fn search_prefix(&self, prefix: &str) -> Option<&HistoryEntry> {
        self.entries.iter().rev().find(|e| e.line.starts_with(prefix))
    }

    /// Discards all entries. Indices keep growing.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Expands a leading `!`-reference.
    ///
    /// Returns `Ok(None)` when the line needs no expansion, or the expanded
    /// line with the reference replaced by the matching history entry.
    pub fn expand(&self, line: &str) -> Result<Option<String>, HistoryError> {
        let Some(rest) = line.strip_prefix('!') else {
            return Ok(None);
        };
        let mut chars = rest.chars();

        match chars.next() {
            // !! -- the previous command
            Some('!') => {
                let entry = self
                    .last()
                    .ok_or_else(|| HistoryError::EventNotFound("!!".to_string()))?;
                Ok(Some(format!("{}{}", entry.line, &rest[1..])))
            }

            // !-N -- N commands back
            Some('-') => {
                let digits: String = rest[1..].chars().take_while(char::is_ascii_digit).collect();
                if digits.is_empty() {
                    return Ok(None);
                }
                let n: usize = digits
                    .parse()
                    .map_err(|_| HistoryError::EventNotFound(format!("!-{digits}")))?;
                let entry = self
                    .get_from_end(n)
                    .ok_or_else(|| HistoryError::EventNotFound(format!("!-{digits}")))?;
                Ok(Some(format!(
                    "{}{}",
                    entry.line,
                    &rest[1 + digits.len()..]
                )))
            }

            // !N -- command number N
            Some(c) if c.is_ascii_digit() => {
                let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
                let n: usize = digits
                    .parse()
                    .map_err(|_| HistoryError::EventNotFound(format!("!{digits}")))?;
                let entry = self
                    .get_by_index(n)
                    .ok_or_else(|| HistoryError::EventNotFound(format!("!{digits}")))?;
                Ok(Some(format!("{}{}", entry.line, &rest[digits.len()..])))
            }

            // !prefix -- most recent command starting with prefix
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                let end = rest
                    .find(|c: char| c.is_whitespace())
                    .unwrap_or(rest.len());
                let prefix = &rest[..end];
                let entry = self
                    .search_prefix(prefix)
                    .ok_or_else(|| HistoryError::EventNotFound(format!("!{prefix}")))?;
                Ok(Some(format!("{}{}", entry.line, &rest[end..])))
            }

            _ => Ok(None),
        }
    }

    /// Loads history from a line-per-entry text file. Missing files are
    /// not an error.
    pub fn load(&mut self, path: &Path) -> std::io::Result<()> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e),
        };
        for line in contents.lines() {
            self.add(line);
        }
        Ok(())
    }

    /// Saves history to a line-per-entry text file.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let mut file = fs::File::create(path)?;
        for entry in &self.entries {
            writeln!(file, "{}", entry.line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn history_of(lines: &[&str]) -> History {
        let mut history = History::new(100);
        for line in lines {
            history.add(line);
        }
        history
    }

    #[test]
    fn blank_lines_are_not_recorded() {
        let history = history_of(&["", "   ", "\t"]);
        assert!(history.is_empty());
    }

    #[test]
    fn duplicates_of_the_previous_entry_are_skipped() {
        let history = history_of(&["ls", "ls", "pwd", "ls"]);
        let lines: Vec<_> = history.iter().map(|e| e.line.as_str()).collect();
        assert_eq!(lines, ["ls", "pwd", "ls"]);
    }

    #[test]
    fn indices_are_monotonic() {
        let history = history_of(&["a", "b", "c"]);
        let indices: Vec<_> = history.iter().map(|e| e.index).collect();
        assert_eq!(indices, [1, 2, 3]);
    }

    #[test]
    fn capacity_drops_the_oldest() {
        let mut history = History::new(2);
        history.add("a");
        history.add("b");
        history.add("c");
        let lines: Vec<_> = history.iter().map(|e| e.line.as_str()).collect();
        assert_eq!(lines, ["b", "c"]);
        assert_eq!(history.get_by_index(1), None);
        assert!(history.get_by_index(3).is_some());
    }

    #[test]
    fn bang_bang_expands_to_the_last_command() {
        let history = history_of(&["echo one", "echo two"]);
        assert_eq!(
            history.expand("!!").unwrap().as_deref(),
            Some("echo two")
        );
        assert_eq!(
            history.expand("!! three").unwrap().as_deref(),
            Some("echo two three")
        );
    }

    #[test]
    fn bang_n_expands_by_history_number() {
        let history = history_of(&["echo one", "echo two"]);
        assert_eq!(history.expand("!1").unwrap().as_deref(), Some("echo one"));
        assert_eq!(
            history.expand("!2 extra").unwrap().as_deref(),
            Some("echo two extra")
        );
    }

    #[test]
    fn bang_minus_n_expands_from_the_end() {
        let history = history_of(&["echo one", "echo two", "echo three"]);
        assert_eq!(
            history.expand("!-1").unwrap().as_deref(),
            Some("echo three")
        );
        assert_eq!(history.expand("!-3").unwrap().as_deref(), Some("echo one"));
    }

    #[test]
    fn bang_prefix_finds_the_most_recent_match() {
        let history = history_of(&["grep foo", "ls", "grep bar"]);
        assert_eq!(
            history.expand("!grep").unwrap().as_deref(),
            Some("grep bar")
        );
        assert_eq!(history.expand("!ls").unwrap().as_deref(), Some("ls"));
    }

    #[test]
    fn missing_events_are_errors() {
        let history = History::new(10);
        assert_matches!(history.expand("!!"), Err(HistoryError::EventNotFound(_)));
        assert_matches!(history.expand("!42"), Err(HistoryError::EventNotFound(_)));
        assert_matches!(history.expand("!xyz"), Err(HistoryError::EventNotFound(_)));
        let history = history_of(&["a"]);
        assert_matches!(history.expand("!-5"), Err(HistoryError::EventNotFound(_)));
    }

    #[test]
    fn ordinary_lines_pass_through() {
        let history = history_of(&["ls"]);
        assert_eq!(history.expand("echo hi").unwrap(), None);
        assert_eq!(history.expand("").unwrap(), None);
        // A lone bang is not a history reference.
        assert_eq!(history.expand("! true").unwrap(), None);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");
        let history = history_of(&["one", "two", "three"]);
        history.save(&path).unwrap();

        let mut restored = History::new(100);
        restored.load(&path).unwrap();
        let lines: Vec<_> = restored.iter().map(|e| e.line.as_str()).collect();
        assert_eq!(lines, ["one", "two", "three"]);
    }

    #[test]
    fn loading_a_missing_file_is_fine() {
        let mut history = History::new(10);
        assert!(history.load(Path::new("/nonexistent/vsh_history")).is_ok());
        assert!(history.is_empty());
    }
}
