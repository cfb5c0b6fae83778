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

//! Lexical analysis.
//!
//! The [`Lexer`] turns one command line into a sequence of [`Token`]s ending
//! in [`TokenKind::EndOfInput`]. It handles single and double quoting,
//! backslash escapes and line continuation, comments, multi-character
//! operators, fd-prefixed redirections, and promotion of completed words to
//! reserved words. Variable references are *not* interpreted here; they pass
//! through inside word text for the expansion phase.
//!
//! Token text is allocated from the caller's [`Arena`], so the whole token
//! stream is discarded with the arena at the start of the next command line.

pub mod keyword;

use self::keyword::Keyword;
use crate::arena::Arena;
use crate::source::Location;
use thiserror::Error;

/// Characters that end an unquoted word.
const WORD_BREAKERS: &[u8] = b" \t\n|&;><(){}#";

/// Classification of a [`Token`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TokenKind {
    /// Ordinary word (command name, argument, assignment, redirection target)
    Word,
    /// Reserved word
    Keyword(Keyword),
    /// `|`
    Pipe,
    /// `&&`
    And,
    /// `||`
    Or,
    /// `;`
    Semi,
    /// `&`
    Amp,
    /// `!`
    Bang,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `<`
    Less,
    /// `>`
    Great,
    /// `>>`
    DGreat,
    /// `<<`
    DLess,
    /// `>&`, always fd-prefixed; the token text is the dup target
    GreatAnd,
    /// `<&`, always fd-prefixed; the token text is the dup target
    LessAnd,
    /// `\n`
    Newline,
    /// End of the input
    EndOfInput,
}

impl TokenKind {
    /// Whether this token is one of the redirection operators.
    #[must_use]
    pub const fn is_redirection(self) -> bool {
        use TokenKind::*;
        matches!(self, Less | Great | DGreat | DLess | GreatAnd | LessAnd)
    }
}

/// One lexed token.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Word content, operator spelling, or dup-redirection target.
    /// Empty for [`TokenKind::EndOfInput`].
    pub text: &'a str,
    /// Explicit file descriptor of an fd-prefixed redirection operator.
    /// `None` for unprefixed operators and all other tokens.
    pub fd: Option<i32>,
    /// Position of the first character of the token.
    pub location: Location,
}

/// Error that aborts tokenization.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum LexError {
    /// A single quotation lacks a closing `'`.
    #[error("unterminated single-quoted string (opened at {0})")]
    UnclosedSingleQuote(Location),
    /// A double quotation lacks a closing `"`.
    #[error("unterminated double-quoted string (opened at {0})")]
    UnclosedDoubleQuote(Location),
}

/// Manual state-machine tokenizer over one line of input.
#[derive(Debug)]
pub struct Lexer<'a> {
    source: &'a [u8],
    pos: usize,
    line: usize,
    column: usize,
    arena: &'a Arena,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `source`, allocating token text from `arena`.
    #[must_use]
    pub fn new(source: &'a str, arena: &'a Arena) -> Self {
        Lexer {
            source: source.as_bytes(),
            pos: 0,
            line: 1,
            column: 1,
            arena,
        }
    }

    /// Tokenizes the whole input.
    ///
    /// On success the result ends in exactly one
    /// [`EndOfInput`](TokenKind::EndOfInput) token.
    pub fn tokenize(mut self) -> Result<Vec<Token<'a>>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let end = token.kind == TokenKind::EndOfInput;
            tokens.push(token);
            if end {
                return Ok(tokens);
            }
        }
    }

    fn location(&self) -> Location {
        Location {
            line: self.line,
            column: self.column,
        }
    }

    fn current(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    fn peek(&self, n: usize) -> Option<u8> {
        self.source.get(self.pos + n).copied()
    }

    fn advance(&mut self) {
        if let Some(c) = self.current() {
            if c == b'\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            self.pos += 1;
        }
    }

    /// Skips spaces and tabs. Newlines are tokens, not whitespace.
    fn skip_blanks(&mut self) {
        while let Some(b' ' | b'\t') = self.current() {
            self.advance();
        }
    }

    /// Skips a comment up to, but not including, the end of the line.
    fn skip_comment(&mut self) {
        while let Some(c) = self.current() {
            if c == b'\n' {
                break;
            }
            self.advance();
        }
    }

    fn operator(&mut self, kind: TokenKind, text: &'static str, location: Location) -> Token<'a> {
        for _ in 0..text.len() {
            self.advance();
        }
        Token {
            kind,
            text,
            fd: None,
            location,
        }
    }

    fn next_token(&mut self) -> Result<Token<'a>, LexError> {
        loop {
            self.skip_blanks();
            let location = self.location();

            let Some(c) = self.current() else {
                return Ok(Token {
                    kind: TokenKind::EndOfInput,
                    text: "",
                    fd: None,
                    location,
                });
            };

            match c {
                b'#' => {
                    // The comment is discarded; the newline survives and is
                    // produced by the next iteration.
                    self.skip_comment();
                    continue;
                }
                b'\n' => {
                    self.advance();
                    return Ok(Token {
                        kind: TokenKind::Newline,
                        text: "\n",
                        fd: None,
                        location,
                    });
                }
                b'0'..=b'9' if matches!(self.peek(1), Some(b'<' | b'>')) => {
                    return Ok(self.fd_redirection(location));
                }
                b'|' if self.peek(1) == Some(b'|') => {
                    return Ok(self.operator(TokenKind::Or, "||", location));
                }
                b'&' if self.peek(1) == Some(b'&') => {
                    return Ok(self.operator(TokenKind::And, "&&", location));
                }
                b'>' if self.peek(1) == Some(b'>') => {
                    return Ok(self.operator(TokenKind::DGreat, ">>", location));
                }
                b'<' if self.peek(1) == Some(b'<') => {
                    return Ok(self.operator(TokenKind::DLess, "<<", location));
                }
                b'|' => return Ok(self.operator(TokenKind::Pipe, "|", location)),
                b'&' => return Ok(self.operator(TokenKind::Amp, "&", location)),
                b';' => return Ok(self.operator(TokenKind::Semi, ";", location)),
                b'>' => return Ok(self.operator(TokenKind::Great, ">", location)),
                b'<' => return Ok(self.operator(TokenKind::Less, "<", location)),
                b'(' => return Ok(self.operator(TokenKind::LeftParen, "(", location)),
                b')' => return Ok(self.operator(TokenKind::RightParen, ")", location)),
                b'{' => return Ok(self.operator(TokenKind::LeftBrace, "{", location)),
                b'}' => return Ok(self.operator(TokenKind::RightBrace, "}", location)),
                b'!' => return Ok(self.operator(TokenKind::Bang, "!", location)),
                _ => return self.word(location),
            }
        }
    }

    /// Lexes a redirection operator prefixed with a single fd digit, e.g.
    /// `2>`, `2>>`, `2>&1`, `0<`, `3<&0`.
    fn fd_redirection(&mut self, location: Location) -> Token<'a> {
        let fd = i32::from(self.current().unwrap_or(b'0') - b'0');
        self.advance();

        let mut token = match (self.current(), self.peek(1)) {
            (Some(b'>'), Some(b'>')) => self.operator(TokenKind::DGreat, ">>", location),
            (Some(b'>'), Some(b'&')) => {
                self.advance();
                self.advance();
                self.dup_target(TokenKind::GreatAnd, location)
            }
            (Some(b'>'), _) => self.operator(TokenKind::Great, ">", location),
            (Some(b'<'), Some(b'<')) => self.operator(TokenKind::DLess, "<<", location),
            (Some(b'<'), Some(b'&')) => {
                self.advance();
                self.advance();
                self.dup_target(TokenKind::LessAnd, location)
            }
            _ => self.operator(TokenKind::Less, "<", location),
        };
        token.fd = Some(fd);
        token
    }

    /// Scans the word following `>&`/`<&` up to the next shell-significant
    /// character. The word becomes the token text.
    fn dup_target(&mut self, kind: TokenKind, location: Location) -> Token<'a> {
        let start = self.pos;
        while let Some(c) = self.current() {
            if matches!(c, b' ' | b'\t' | b'\n' | b'|' | b'&' | b';') {
                break;
            }
            self.advance();
        }
        let text = self
            .arena
            .alloc_str(str_from_bytes(&self.source[start..self.pos]));
        Token {
            kind,
            text,
            fd: None,
            location,
        }
    }

    /// Builds a word token by accumulating characters, honoring single
    /// quotes, double quotes, and backslash escapes. The completed word is
    /// promoted to a keyword token if it matches a reserved word.
    fn word(&mut self, location: Location) -> Result<Token<'a>, LexError> {
        let mut buf = Vec::new();

        while let Some(c) = self.current() {
            match c {
                b'\'' => {
                    let opening = self.location();
                    self.advance();
                    loop {
                        match self.current() {
                            Some(b'\'') => {
                                self.advance();
                                break;
                            }
                            Some(c) => {
                                buf.push(c);
                                self.advance();
                            }
                            None => return Err(LexError::UnclosedSingleQuote(opening)),
                        }
                    }
                }
                b'"' => {
                    let opening = self.location();
                    self.advance();
                    loop {
                        match self.current() {
                            Some(b'"') => {
                                self.advance();
                                break;
                            }
                            Some(b'\\') => {
                                // Inside double quotes a backslash escapes
                                // only $, `, ", \, and newline.
                                match self.peek(1) {
                                    Some(b'\n') => {
                                        self.advance();
                                        self.advance();
                                    }
                                    Some(c @ (b'$' | b'`' | b'"' | b'\\')) => {
                                        self.advance();
                                        self.advance();
                                        buf.push(c);
                                    }
                                    _ => {
                                        buf.push(b'\\');
                                        self.advance();
                                    }
                                }
                            }
                            Some(c) => {
                                buf.push(c);
                                self.advance();
                            }
                            None => return Err(LexError::UnclosedDoubleQuote(opening)),
                        }
                    }
                }
                b'\\' => match self.peek(1) {
                    Some(b'\n') => {
                        // Line continuation: both bytes vanish.
                        self.advance();
                        self.advance();
                    }
                    Some(c) => {
                        self.advance();
                        buf.push(c);
                        self.advance();
                    }
                    None => {
                        // A lone backslash at end of input stays literal.
                        buf.push(b'\\');
                        self.advance();
                        break;
                    }
                },
                _ if WORD_BREAKERS.contains(&c) => break,
                _ => {
                    buf.push(c);
                    self.advance();
                }
            }
        }

        let text = self.arena.alloc_str(str_from_bytes(&buf));
        let kind = match Keyword::try_from(text) {
            Ok(keyword) => TokenKind::Keyword(keyword),
            Err(()) => TokenKind::Word,
        };
        Ok(Token {
            kind,
            text,
            fd: None,
            location,
        })
    }
}

/// Reinterprets bytes sliced out of (or copied from) valid UTF-8 input.
///
/// The lexer splits only at single-byte ASCII delimiters, so every piece of
/// the `&str` input remains valid UTF-8.
fn str_from_bytes(bytes: &[u8]) -> &str {
    std::str::from_utf8(bytes).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let arena = Arena::new();
        Lexer::new(input, &arena)
            .tokenize()
            .unwrap()
            .iter()
            .map(|t| t.kind)
            .collect()
    }

    fn words(input: &str) -> Vec<String> {
        let arena = Arena::new();
        Lexer::new(input, &arena)
            .tokenize()
            .unwrap()
            .iter()
            .filter(|t| t.kind == TokenKind::Word)
            .map(|t| t.text.to_string())
            .collect()
    }

    #[test]
    fn empty_input_is_end_of_input_only() {
        assert_eq!(kinds(""), [TokenKind::EndOfInput]);
    }

    #[test]
    fn every_token_list_ends_in_end_of_input() {
        for input in ["", "a", "a | b", "if x; then y; fi", "# comment", "\n\n"] {
            let arena = Arena::new();
            let tokens = Lexer::new(input, &arena).tokenize().unwrap();
            assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EndOfInput));
            let eof_count = tokens
                .iter()
                .filter(|t| t.kind == TokenKind::EndOfInput)
                .count();
            assert_eq!(eof_count, 1, "input {input:?}");
        }
    }

    #[test]
    fn words_and_operators() {
        use TokenKind::*;
        assert_eq!(
            kinds("a | b && c || d ; e & f"),
            [Word, Pipe, Word, And, Word, Or, Word, Semi, Word, Amp, Word, EndOfInput]
        );
    }

    #[test]
    fn groupers_and_bang() {
        use TokenKind::*;
        assert_eq!(
            kinds("! ( a ) { b }"),
            [Bang, LeftParen, Word, RightParen, LeftBrace, Word, RightBrace, EndOfInput]
        );
    }

    #[test]
    fn longest_operator_match_wins() {
        use TokenKind::*;
        assert_eq!(kinds(">>"), [DGreat, EndOfInput]);
        assert_eq!(kinds("<<"), [DLess, EndOfInput]);
        assert_eq!(kinds("> >"), [Great, Great, EndOfInput]);
        assert_eq!(kinds("&&&"), [And, Amp, EndOfInput]);
        assert_eq!(kinds("|||"), [Or, Pipe, EndOfInput]);
    }

    #[test]
    fn newlines_are_tokens() {
        use TokenKind::*;
        assert_eq!(kinds("a\nb\n"), [Word, Newline, Word, Newline, EndOfInput]);
    }

    #[test]
    fn comment_is_discarded_but_newline_survives() {
        use TokenKind::*;
        assert_eq!(kinds("a # comment\nb"), [Word, Newline, Word, EndOfInput]);
        assert_eq!(kinds("# only a comment"), [EndOfInput]);
    }

    #[test]
    fn single_quotes_are_literal() {
        assert_eq!(words("'a b' 'x|y' '$HOME' '\\'"), ["a b", "x|y", "$HOME", "\\"]);
    }

    #[test]
    fn single_quoted_round_trip() {
        for text in ["X", "a b c", "*?[", "$v `cmd` \\n", "  ", "~user"] {
            let arena = Arena::new();
            let input = format!("'{text}'");
            let tokens = Lexer::new(&input, &arena).tokenize().unwrap();
            assert_eq!(tokens.len(), 2);
            assert_eq!(tokens[0].kind, TokenKind::Word);
            assert_eq!(tokens[0].text, text);
        }
    }

    #[test]
    fn double_quote_escapes() {
        // Only $, `, ", \ and newline are escaped; anything else keeps
        // the backslash.
        assert_eq!(words(r#""a\$b""#), [r"a$b"]);
        assert_eq!(words(r#""a\`b""#), ["a`b"]);
        assert_eq!(words(r#""a\"b""#), ["a\"b"]);
        assert_eq!(words(r#""a\\b""#), [r"a\b"]);
        assert_eq!(words(r#""a\nb""#), [r"a\nb"]);
        assert_eq!(words("\"a\\\nb\""), ["ab"]);
        assert_eq!(words(r#""a b|c""#), ["a b|c"]);
    }

    #[test]
    fn backslash_outside_quotes() {
        assert_eq!(words(r"a\ b"), ["a b"]);
        assert_eq!(words(r"\|"), ["|"]);
        assert_eq!(words("a\\\nb"), ["ab"]);
    }

    #[test]
    fn trailing_backslash_is_literal() {
        assert_eq!(words("a\\"), ["a\\"]);
        assert_eq!(words("\\"), ["\\"]);
    }

    #[test]
    fn unterminated_quotes_error() {
        let arena = Arena::new();
        assert_matches!(
            Lexer::new("'abc", &arena).tokenize(),
            Err(LexError::UnclosedSingleQuote(_))
        );
        let arena = Arena::new();
        assert_matches!(
            Lexer::new("\"abc", &arena).tokenize(),
            Err(LexError::UnclosedDoubleQuote(_))
        );
    }

    #[test]
    fn quotes_join_into_one_word() {
        assert_eq!(words("a'b c'd\"e f\""), ["ab cde f"]);
    }

    #[test]
    fn keywords_are_promoted() {
        use Keyword::*;
        let expected: Vec<TokenKind> = [
            If, Then, Elif, Else, Fi, While, For, Do, Done, In, Function, Return, Local,
        ]
        .into_iter()
        .map(TokenKind::Keyword)
        .chain([TokenKind::EndOfInput])
        .collect();
        assert_eq!(
            kinds("if then elif else fi while for do done in function return local"),
            expected
        );
    }

    #[test]
    fn keyword_promotion_ignores_quoting() {
        // Matches the reference behavior: promotion applies to every
        // completed word, even a quoted one.
        assert_eq!(kinds("'if'"), [TokenKind::Keyword(Keyword::If), TokenKind::EndOfInput]);
    }

    #[test]
    fn similar_words_are_not_keywords() {
        assert_eq!(words("ifx thenx fif"), ["ifx", "thenx", "fif"]);
    }

    #[test]
    fn fd_prefixed_redirections() {
        let arena = Arena::new();
        let tokens = Lexer::new("2> err 0< in 2>> log", &arena).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Great);
        assert_eq!(tokens[0].fd, Some(2));
        assert_eq!(tokens[2].kind, TokenKind::Less);
        assert_eq!(tokens[2].fd, Some(0));
        assert_eq!(tokens[4].kind, TokenKind::DGreat);
        assert_eq!(tokens[4].fd, Some(2));
    }

    #[test]
    fn unprefixed_redirections_have_no_fd() {
        let arena = Arena::new();
        let tokens = Lexer::new("> out < in", &arena).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Great);
        assert_eq!(tokens[0].fd, None);
        assert_eq!(tokens[2].kind, TokenKind::Less);
        assert_eq!(tokens[2].fd, None);
    }

    #[test]
    fn dup_redirections_capture_their_target() {
        let arena = Arena::new();
        let tokens = Lexer::new("2>&1 3<&0", &arena).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::GreatAnd);
        assert_eq!(tokens[0].fd, Some(2));
        assert_eq!(tokens[0].text, "1");
        assert_eq!(tokens[1].kind, TokenKind::LessAnd);
        assert_eq!(tokens[1].fd, Some(3));
        assert_eq!(tokens[1].text, "0");
    }

    #[test]
    fn dup_target_stops_at_shell_significant_characters() {
        let arena = Arena::new();
        let tokens = Lexer::new("cat x 2>&1|wc", &arena).tokenize().unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        use TokenKind::*;
        assert_eq!(kinds, [Word, Word, GreatAnd, Pipe, Word, EndOfInput]);
        assert_eq!(tokens[2].text, "1");
    }

    #[test]
    fn digit_not_followed_by_redirection_is_a_word() {
        assert_eq!(words("2 22 2x"), ["2", "22", "2x"]);
    }

    #[test]
    fn digit_inside_word_does_not_start_redirection() {
        // Only a single leading digit immediately before < or > counts.
        let arena = Arena::new();
        let tokens = Lexer::new("a2>f", &arena).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Word);
        assert_eq!(tokens[0].text, "a2");
        assert_eq!(tokens[1].kind, TokenKind::Great);
        assert_eq!(tokens[1].fd, None);
    }

    #[test]
    fn locations_are_tracked() {
        let arena = Arena::new();
        let tokens = Lexer::new("ab cd\nef", &arena).tokenize().unwrap();
        assert_eq!(tokens[0].location, Location { line: 1, column: 1 });
        assert_eq!(tokens[1].location, Location { line: 1, column: 4 });
        assert_eq!(tokens[2].location, Location { line: 1, column: 6 });
        assert_eq!(tokens[3].location, Location { line: 2, column: 1 });
    }

    #[test]
    fn non_ascii_bytes_pass_through() {
        assert_eq!(words("héllo wörld"), ["héllo", "wörld"]);
    }

    #[test]
    fn word_text_lives_in_the_arena() {
        let arena = Arena::new();
        let before = arena.bytes_used();
        let tokens = Lexer::new("hello world", &arena).tokenize().unwrap();
        assert_eq!(tokens[0].text, "hello");
        assert!(arena.bytes_used() > before);
    }
}
