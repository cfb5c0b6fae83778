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

//! Word expansion.
//!
//! Each word of a simple command is expanded in a fixed order: parameter
//! expansion, then tilde expansion (only when the expanded word begins
//! with `~`), then pathname expansion ([`glob`](crate::glob)). Only the
//! glob step can turn one word into several. All results are allocated
//! from the per-command arena.
//!
//! Parameter expansion recognizes `$$`, `$?`, `$#`, `$!` (empty; the
//! last background pid is not tracked), `$0`…`$9`, `$NAME`, `${NAME}`,
//! and the modifier forms `${NAME:-default}`, `${NAME:=default}`,
//! `${NAME:+alternate}`, and `${NAME:?message}`. Modifier bodies are
//! themselves expanded before use. Anything unrecognized passes through
//! literally; quoting has already been resolved by the lexer, so there is
//! no quoted-state tracking here.

pub mod tilde;

use crate::glob;
use thiserror::Error;
use vsh_env::Env;
use vsh_syntax::arena::Arena;

/// Error that fails the expansion of a word.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ExpansionError {
    /// A `${NAME:?message}` construct found the parameter unset or empty.
    #[error("{name}: {message}")]
    EmptyParameter { name: String, message: String },
}

/// Fully expands one word: parameters, tilde, then glob.
///
/// Returns one field per resulting word; only glob expansion can produce
/// more than one. A glob pattern with no matches stays literal.
pub fn expand_word<'a>(
    env: &mut Env,
    arena: &'a Arena,
    word: &str,
) -> Result<Vec<&'a str>, ExpansionError> {
    let expanded = expand_parameters(env, word, arena)?;
    let expanded = if expanded.starts_with('~') {
        tilde::expand_tilde(env, expanded, arena)
    } else {
        expanded
    };

    if glob::has_magic(expanded) {
        let matches = glob::expand(expanded, arena);
        if !matches.is_empty() {
            return Ok(matches);
        }
    }
    Ok(vec![expanded])
}

/// Performs parameter expansion only.
///
/// Used directly for assignment values and `for`-loop words, where the
/// other stages apply separately or not at all.
pub fn expand_parameters<'a>(
    env: &mut Env,
    word: &str,
    arena: &'a Arena,
) -> Result<&'a str, ExpansionError> {
    let expanded = expand_parameters_owned(env, word)?;
    Ok(arena.alloc_str(&expanded))
}

fn expand_parameters_owned(env: &mut Env, word: &str) -> Result<String, ExpansionError> {
    let mut out = String::with_capacity(word.len());
    let mut rest = word;

    while let Some(dollar) = rest.find('$') {
        out.push_str(&rest[..dollar]);
        rest = &rest[dollar + 1..];

        let Some(first) = rest.chars().next() else {
            // A trailing $ stands for itself.
            out.push('$');
            break;
        };

        match first {
            '$' => {
                out.push_str(&env.shell_pid.to_string());
                rest = &rest[1..];
            }
            '?' => {
                out.push_str(&env.exit_status.to_string());
                rest = &rest[1..];
            }
            '#' => {
                out.push_str(&env.positional_params.len().to_string());
                rest = &rest[1..];
            }
            '!' => {
                // Last background pid is not tracked; expands to nothing.
                rest = &rest[1..];
            }
            '0' => {
                out.push_str(&env.arg0);
                rest = &rest[1..];
            }
            '1'..='9' => {
                let index = first as usize - '0' as usize;
                if let Some(value) = env.positional_params.get(index - 1) {
                    out.push_str(value);
                }
                rest = &rest[1..];
            }
            '{' => {
                rest = expand_braced(env, &rest[1..], &mut out)?;
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let end = rest
                    .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
                    .unwrap_or(rest.len());
                if let Some(value) = env.variables.get(&rest[..end]) {
                    out.push_str(value);
                }
                rest = &rest[end..];
            }
            c => {
                // Unknown construct: keep the $ and the character.
                out.push('$');
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    out.push_str(rest);
    Ok(out)
}

/// Expands one `${…}` construct. `rest` starts just inside the braces;
/// the return value is the input after the closing `}`.
fn expand_braced<'w>(
    env: &mut Env,
    rest: &'w str,
    out: &mut String,
) -> Result<&'w str, ExpansionError> {
    let name_end = rest.find([':', '}']).unwrap_or(rest.len());
    let name = &rest[..name_end];
    let after_name = &rest[name_end..];

    let value = lookup(env, name);
    let is_null = value.as_deref().is_none_or(str::is_empty);

    if let Some(tail) = after_name.strip_prefix(':') {
        let Some(op) = tail.chars().next() else {
            return Ok("");
        };
        let (body, after) = braced_body(&tail[op.len_utf8()..]);

        match op {
            '-' => {
                if is_null {
                    out.push_str(&expand_parameters_owned(env, body)?);
                } else if let Some(value) = value {
                    out.push_str(&value);
                }
            }
            '=' => {
                if is_null {
                    let default = expand_parameters_owned(env, body)?;
                    env.variables.set(name, &default, false);
                    out.push_str(&default);
                } else if let Some(value) = value {
                    out.push_str(&value);
                }
            }
            '+' => {
                if !is_null {
                    out.push_str(&expand_parameters_owned(env, body)?);
                }
            }
            '?' => {
                if is_null {
                    let message = if body.is_empty() {
                        "parameter null or not set".to_string()
                    } else {
                        expand_parameters_owned(env, body)?
                    };
                    return Err(ExpansionError::EmptyParameter {
                        name: name.to_string(),
                        message,
                    });
                } else if let Some(value) = value {
                    out.push_str(&value);
                }
            }
            _ => {
                // Unknown modifier: output the value if set.
                if let Some(value) = value {
                    out.push_str(&value);
                }
            }
        }
        Ok(after)
    } else {
        // Plain ${NAME}.
        if let Some(value) = value {
            out.push_str(&value);
        }
        Ok(after_name.strip_prefix('}').unwrap_or(after_name))
    }
}

/// Splits a modifier body from the rest of the word, honoring one level of
/// `${…}` nesting inside the body.
fn braced_body(s: &str) -> (&str, &str) {
    let mut depth = 0usize;
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'$' && bytes.get(i + 1) == Some(&b'{') {
            depth += 1;
            i += 2;
        } else if bytes[i] == b'}' {
            if depth == 0 {
                return (&s[..i], &s[i + 1..]);
            }
            depth -= 1;
            i += 1;
        } else {
            i += 1;
        }
    }
    (s, "")
}

/// Looks up a braced parameter name, which may also be a special or
/// positional parameter.
fn lookup(env: &Env, name: &str) -> Option<String> {
    match name {
        "?" => Some(env.exit_status.to_string()),
        "$" => Some(env.shell_pid.to_string()),
        "#" => Some(env.positional_params.len().to_string()),
        "0" => Some(env.arg0.clone()),
        _ => {
            if let Ok(index) = name.parse::<usize>() {
                return index
                    .checked_sub(1)
                    .and_then(|i| env.positional_params.get(i))
                    .cloned();
            }
            env.variables.get(name).map(String::from)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use vsh_env::semantics::ExitStatus;

    fn env_with(vars: &[(&str, &str)]) -> Env {
        let mut env = Env::with_no_variables("vsh");
        for (name, value) in vars {
            env.variables.set(name, value, false);
        }
        env
    }

    fn expand(env: &mut Env, word: &str) -> String {
        let arena = Arena::new();
        expand_parameters(env, word, &arena).unwrap().to_string()
    }

    #[test]
    fn plain_text_passes_through() {
        let mut env = env_with(&[]);
        assert_eq!(expand(&mut env, "hello"), "hello");
        assert_eq!(expand(&mut env, ""), "");
    }

    #[test]
    fn simple_variable() {
        let mut env = env_with(&[("FOO", "bar")]);
        assert_eq!(expand(&mut env, "$FOO"), "bar");
        assert_eq!(expand(&mut env, "x${FOO}y"), "xbary");
        assert_eq!(expand(&mut env, "$FOO$FOO"), "barbar");
    }

    #[test]
    fn unset_variable_expands_to_nothing() {
        let mut env = env_with(&[]);
        assert_eq!(expand(&mut env, "a${NOPE}b"), "ab");
        assert_eq!(expand(&mut env, "$NOPE"), "");
    }

    #[test]
    fn name_ends_at_non_identifier() {
        let mut env = env_with(&[("A", "1")]);
        assert_eq!(expand(&mut env, "$A/b"), "1/b");
        assert_eq!(expand(&mut env, "$A.b"), "1.b");
    }

    #[test]
    fn special_parameters() {
        let mut env = env_with(&[]);
        env.exit_status = ExitStatus(42);
        assert_eq!(expand(&mut env, "$?"), "42");
        assert_eq!(expand(&mut env, "$$"), env.shell_pid.to_string());
        assert_eq!(expand(&mut env, "$!"), "");
        assert_eq!(expand(&mut env, "$0"), "vsh");
    }

    #[test]
    fn positional_parameters() {
        let mut env = env_with(&[]);
        env.positional_params = vec!["one".to_string(), "two".to_string()];
        assert_eq!(expand(&mut env, "$1"), "one");
        assert_eq!(expand(&mut env, "$2"), "two");
        assert_eq!(expand(&mut env, "$3"), "");
        assert_eq!(expand(&mut env, "$#"), "2");
    }

    #[test]
    fn trailing_and_unknown_dollars_stay_literal() {
        let mut env = env_with(&[]);
        assert_eq!(expand(&mut env, "end$"), "end$");
        assert_eq!(expand(&mut env, "$%"), "$%");
        assert_eq!(expand(&mut env, "a$ b"), "a$ b");
    }

    #[test]
    fn default_modifier() {
        let mut env = env_with(&[("SET", "v")]);
        assert_eq!(expand(&mut env, "${SET:-fallback}"), "v");
        assert_eq!(expand(&mut env, "${UNSET:-fallback}"), "fallback");
        env.variables.set("EMPTY", "", false);
        assert_eq!(expand(&mut env, "${EMPTY:-fallback}"), "fallback");
    }

    #[test]
    fn default_modifier_body_is_expanded() {
        let mut env = env_with(&[("HOME_ISH", "/home/u")]);
        assert_eq!(expand(&mut env, "${UNSET:-$HOME_ISH}"), "/home/u");
        assert_eq!(expand(&mut env, "${UNSET:-${HOME_ISH}}"), "/home/u");
    }

    #[test]
    fn assign_modifier_sets_the_variable() {
        let mut env = env_with(&[]);
        assert_eq!(expand(&mut env, "${X:=filled}"), "filled");
        assert_eq!(env.variables.get("X"), Some("filled"));
        assert_eq!(expand(&mut env, "${X:=other}"), "filled");
    }

    #[test]
    fn alternate_modifier() {
        let mut env = env_with(&[("SET", "v")]);
        assert_eq!(expand(&mut env, "${SET:+alt}"), "alt");
        assert_eq!(expand(&mut env, "${UNSET:+alt}"), "");
    }

    #[test]
    fn error_modifier() {
        let mut env = env_with(&[("SET", "v")]);
        assert_eq!(expand(&mut env, "${SET:?boom}"), "v");

        let arena = Arena::new();
        let error = expand_parameters(&mut env, "${UNSET:?boom}", &arena).unwrap_err();
        assert_matches!(error, ExpansionError::EmptyParameter { name, message } => {
            assert_eq!(name, "UNSET");
            assert_eq!(message, "boom");
        });

        let error = expand_parameters(&mut env, "${UNSET:?}", &arena).unwrap_err();
        assert_matches!(error, ExpansionError::EmptyParameter { message, .. } => {
            assert_eq!(message, "parameter null or not set");
        });
    }

    #[test]
    fn braced_special_parameters() {
        let mut env = env_with(&[]);
        env.exit_status = ExitStatus(7);
        assert_eq!(expand(&mut env, "${?}"), "7");
    }

    #[test]
    fn expand_word_splits_only_on_glob() {
        let mut env = env_with(&[("GREETING", "hello world")]);
        let arena = Arena::new();
        // No field splitting: one word stays one word.
        let fields = expand_word(&mut env, &arena, "$GREETING").unwrap();
        assert_eq!(fields, ["hello world"]);
    }

    #[test]
    fn expand_word_keeps_unmatched_patterns_literal() {
        let mut env = env_with(&[]);
        let arena = Arena::new();
        let fields =
            expand_word(&mut env, &arena, "/nonexistent-vsh-test-dir/*.xyz").unwrap();
        assert_eq!(fields, ["/nonexistent-vsh-test-dir/*.xyz"]);
    }

    #[test]
    fn expand_word_globs_matching_patterns() {
        let mut env = env_with(&[]);
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.txt", "a.txt", "c.log"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        let arena = Arena::new();
        let pattern = format!("{}/*.txt", dir.path().display());
        let fields = expand_word(&mut env, &arena, &pattern).unwrap();
        let expected: Vec<String> = ["a.txt", "b.txt"]
            .iter()
            .map(|n| format!("{}/{n}", dir.path().display()))
            .collect();
        assert_eq!(fields, expected);
    }
}
