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

//! Echo built-in
//!
//! # Synopsis
//!
//! ```sh
//! echo [-neE] [argument…]
//! ```
//!
//! # Description
//!
//! Prints the arguments separated by spaces and followed by a newline.
//! `-n` suppresses the newline; `-e` enables backslash escape sequences
//! (`\n`, `\t`, `\\`, `\a`, `\b`, `\e`, `\f`, `\r`, `\v`, `\0NNN`, `\xHH`,
//! and `\c`, which ends the output); `-E` disables them again. Flag
//! parsing stops at the first argument that is not entirely flags.

use std::io::Write;
use std::ops::ControlFlow::Continue;
use vsh_env::semantics::{ExitStatus, Result};
use vsh_env::Env;

/// Entry point of the `echo` built-in.
pub fn main(_env: &mut Env, args: &[String]) -> Result {
    let mut newline = true;
    let mut escapes = false;
    let mut start = 1;

    for arg in &args[1..] {
        let Some(flags) = arg.strip_prefix('-') else {
            break;
        };
        if flags.is_empty() || !flags.bytes().all(|b| matches!(b, b'n' | b'e' | b'E')) {
            break;
        }
        for flag in flags.bytes() {
            match flag {
                b'n' => newline = false,
                b'e' => escapes = true,
                _ => escapes = false,
            }
        }
        start += 1;
    }

    let mut out: Vec<u8> = Vec::new();
    let mut stopped = false;
    for (i, arg) in args[start..].iter().enumerate() {
        if i > 0 {
            out.push(b' ');
        }
        if escapes {
            if !unescape_into(arg.as_bytes(), &mut out) {
                stopped = true;
                break;
            }
        } else {
            out.extend_from_slice(arg.as_bytes());
        }
    }
    if newline && !stopped {
        out.push(b'\n');
    }

    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();
    let _ = stdout.write_all(&out);
    let _ = stdout.flush();
    Continue(ExitStatus::SUCCESS)
}

/// Appends `bytes` to `out`, interpreting escape sequences. Returns false
/// when `\c` asks for output to stop.
fn unescape_into(bytes: &[u8], out: &mut Vec<u8>) -> bool {
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\\' || i + 1 >= bytes.len() {
            out.push(bytes[i]);
            i += 1;
            continue;
        }

        i += 1;
        match bytes[i] {
            b'n' => out.push(b'\n'),
            b't' => out.push(b'\t'),
            b'\\' => out.push(b'\\'),
            b'a' => out.push(0x07),
            b'b' => out.push(0x08),
            b'e' => out.push(0x1b),
            b'f' => out.push(0x0c),
            b'r' => out.push(b'\r'),
            b'v' => out.push(0x0b),
            b'c' => return false,
            b'0' => {
                let mut value = 0u32;
                let mut taken = 0;
                while taken < 3 {
                    match bytes.get(i + 1 + taken).copied() {
                        Some(d @ b'0'..=b'7') => {
                            value = value * 8 + u32::from(d - b'0');
                            taken += 1;
                        }
                        _ => break,
                    }
                }
                out.push((value & 0xff) as u8);
                i += taken;
            }
            b'x' => {
                let mut value = 0u32;
                let mut taken = 0;
                while taken < 2 {
                    match bytes.get(i + 1 + taken).copied() {
                        Some(d) if d.is_ascii_hexdigit() => {
                            value = value * 16 + (d as char).to_digit(16).unwrap_or(0);
                            taken += 1;
                        }
                        _ => break,
                    }
                }
                out.push((value & 0xff) as u8);
                i += taken;
            }
            other => {
                out.push(b'\\');
                out.push(other);
            }
        }
        i += 1;
    }
    true
}
