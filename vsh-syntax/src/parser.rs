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

//! Syntax analysis.
//!
//! [`Parser`] consumes the token stream of one command line and produces an
//! arena-owned [`Node`] tree, or `None` for input with no commands (empty
//! lines, comments). It is a recursive-descent parser with one token of
//! lookahead, plus a second token of lookahead to recognize the
//! `name ( )` function-definition form.
//!
//! ```text
//! program   := NL* list? NL* EOF
//! list      := pipeline ( sep pipeline )* sep?
//! sep       := ';' | '&' | '&&' | '||' | NL
//! pipeline  := '!'? command ( '|' NL* command )*
//! command   := if | while | for | function | block | subshell | simple
//! if        := 'if' list 'then' list ('elif' list 'then' list)*
//!              ('else' list)? 'fi'
//! while     := 'while' list 'do' list 'done'
//! for       := 'for' WORD ('in' WORD*)? (';' | NL)? 'do' list 'done'
//! function  := 'function' WORD ('(' ')')? body  |  WORD '(' ')' body
//! body      := '{' list '}'
//! block     := '{' list '}'
//! subshell  := '(' list ')'
//! simple    := (WORD | redirection)+
//! ```
//!
//! `&&`, `||`, and `;`/newline all fold left at equal precedence; `&` wraps
//! the pipeline to its left in a [`Node::Background`] and continues as a
//! sequence. The parser stops at the first error.

pub mod error;
pub mod lex;

use self::error::{Error, SyntaxError};
use self::lex::keyword::Keyword;
use self::lex::{Token, TokenKind};
use crate::arena::Arena;
use crate::syntax::{
    Assign, For, FunctionDef, If, Node, Pipeline, Redir, RedirOp, SimpleCommand, While,
};

/// Spelling of a token kind for diagnostics.
fn kind_str(kind: TokenKind) -> &'static str {
    use TokenKind::*;
    match kind {
        Word => "word",
        Keyword(keyword) => keyword.as_str(),
        Pipe => "|",
        And => "&&",
        Or => "||",
        Semi => ";",
        Amp => "&",
        Bang => "!",
        LeftParen => "(",
        RightParen => ")",
        LeftBrace => "{",
        RightBrace => "}",
        Less => "<",
        Great => ">",
        DGreat => ">>",
        DLess => "<<",
        GreatAnd => ">&",
        LessAnd => "<&",
        Newline => "newline",
        EndOfInput => "end of input",
    }
}

/// User-facing rendering of a concrete token.
fn describe(token: &Token) -> String {
    match token.kind {
        TokenKind::Word => token.text.to_string(),
        _ => kind_str(token.kind).to_string(),
    }
}

/// Whether this token may begin or continue the word list of a simple
/// command. `return` and `local` lex as keywords but name builtins.
fn is_command_word(token: &Token) -> bool {
    match token.kind {
        TokenKind::Word => true,
        TokenKind::Keyword(keyword) => keyword.is_command_word(),
        _ => false,
    }
}

/// Splits a `NAME=value` word into an assignment, if the part before the
/// first `=` is a valid variable name.
fn split_assignment(word: &str) -> Option<Assign<'_>> {
    let eq = word.find('=')?;
    if eq == 0 {
        return None;
    }
    let (name, value) = (&word[..eq], &word[eq + 1..]);
    let mut chars = name.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() && first != '_' {
        return None;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    Some(Assign { name, value })
}

/// Recursive-descent parser over a lexed token stream.
#[derive(Debug)]
pub struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    arena: &'a Arena,
}

/// Parses a token stream into a syntax tree.
///
/// Returns `Ok(None)` when the input contains no commands at all.
pub fn parse<'a>(
    tokens: Vec<Token<'a>>,
    arena: &'a Arena,
) -> Result<Option<&'a Node<'a>>, Error> {
    Parser::new(tokens, arena).parse()
}

impl<'a> Parser<'a> {
    /// Creates a parser over a token stream produced by
    /// [`Lexer::tokenize`](lex::Lexer::tokenize).
    #[must_use]
    pub fn new(tokens: Vec<Token<'a>>, arena: &'a Arena) -> Self {
        Parser {
            tokens,
            pos: 0,
            arena,
        }
    }

    /// Parses the whole program.
    pub fn parse(mut self) -> Result<Option<&'a Node<'a>>, Error> {
        self.program()
    }

    // ---- token cursor ----

    fn current(&self) -> &Token<'a> {
        const END: Token<'static> = Token {
            kind: TokenKind::EndOfInput,
            text: "",
            fd: None,
            location: crate::source::Location { line: 1, column: 1 },
        };
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .unwrap_or(&END)
    }

    fn advance(&mut self) -> Token<'a> {
        let token = *self.current();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_keyword(&mut self, keyword: Keyword) -> bool {
        self.match_kind(TokenKind::Keyword(keyword))
    }

    fn skip_newlines(&mut self) {
        while self.check(TokenKind::Newline) {
            self.advance();
        }
    }

    fn error_here(&self, cause: SyntaxError) -> Error {
        Error {
            cause,
            location: self.current().location,
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token<'a>, Error> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_here(SyntaxError::Expected {
                expected: kind_str(kind).to_string(),
                found: describe(self.current()),
            }))
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), Error> {
        self.expect(TokenKind::Keyword(keyword)).map(drop)
    }

    /// Whether the current token can start a command.
    fn at_command_start(&self) -> bool {
        let token = self.current();
        match token.kind {
            TokenKind::LeftBrace | TokenKind::LeftParen | TokenKind::Bang => true,
            TokenKind::Keyword(Keyword::If | Keyword::While | Keyword::For | Keyword::Function) => {
                true
            }
            kind if kind.is_redirection() => true,
            _ => is_command_word(token),
        }
    }

    // ---- grammar ----

    fn program(&mut self) -> Result<Option<&'a Node<'a>>, Error> {
        self.skip_newlines();
        let root = if self.check(TokenKind::EndOfInput) {
            None
        } else {
            self.list()?
        };
        self.skip_newlines();
        if !self.check(TokenKind::EndOfInput) {
            return Err(self.error_here(SyntaxError::UnexpectedToken(describe(self.current()))));
        }
        Ok(root)
    }

    /// Parses a list of pipelines folded into a left-leaning tree.
    ///
    /// Returns `Ok(None)` without consuming anything if no command starts
    /// here; compound-command bodies rely on that to allow empty clauses.
    fn list(&mut self) -> Result<Option<&'a Node<'a>>, Error> {
        self.skip_newlines();
        if !self.at_command_start() {
            return Ok(None);
        }

        let mut left = self.pipeline()?;
        loop {
            match self.current().kind {
                TokenKind::And => {
                    self.advance();
                    self.skip_newlines();
                    if !self.at_command_start() {
                        break;
                    }
                    let right = self.pipeline()?;
                    left = self.arena.alloc(Node::And(left, right));
                }
                TokenKind::Or => {
                    self.advance();
                    self.skip_newlines();
                    if !self.at_command_start() {
                        break;
                    }
                    let right = self.pipeline()?;
                    left = self.arena.alloc(Node::Or(left, right));
                }
                TokenKind::Amp => {
                    // `&` finishes the pipeline to its left, then the list
                    // may continue as a sequence.
                    self.advance();
                    left = self.arena.alloc(Node::Background(left));
                    self.skip_newlines();
                    if !self.at_command_start() {
                        break;
                    }
                    let right = self.pipeline()?;
                    left = self.arena.alloc(Node::Sequence(left, right));
                }
                TokenKind::Semi | TokenKind::Newline => {
                    self.advance();
                    self.skip_newlines();
                    if !self.at_command_start() {
                        break;
                    }
                    let right = self.pipeline()?;
                    left = self.arena.alloc(Node::Sequence(left, right));
                }
                _ => break,
            }
        }
        Ok(Some(left))
    }

    fn pipeline(&mut self) -> Result<&'a Node<'a>, Error> {
        let negated = self.match_kind(TokenKind::Bang);

        let first = self.command()?;
        if !self.check(TokenKind::Pipe) {
            if negated {
                return Ok(self.arena.alloc(Node::Negate(first)));
            }
            return Ok(first);
        }

        let mut commands = vec![first];
        while self.match_kind(TokenKind::Pipe) {
            self.skip_newlines();
            commands.push(self.command()?);
        }
        let pipeline = Pipeline {
            commands: self.arena.alloc_slice(&commands),
            negated,
        };
        Ok(self.arena.alloc(Node::Pipeline(pipeline)))
    }

    fn command(&mut self) -> Result<&'a Node<'a>, Error> {
        let token = *self.current();
        match token.kind {
            TokenKind::Keyword(Keyword::If) => {
                self.advance();
                self.if_command()
            }
            TokenKind::Keyword(Keyword::While) => {
                self.advance();
                self.while_command()
            }
            TokenKind::Keyword(Keyword::For) => {
                self.advance();
                self.for_command()
            }
            TokenKind::Keyword(Keyword::Function) => {
                self.advance();
                self.function_command()
            }
            TokenKind::LeftBrace => {
                self.advance();
                self.skip_newlines();
                let body = self.list()?;
                self.skip_newlines();
                self.expect(TokenKind::RightBrace)?;
                Ok(self.arena.alloc(Node::Block(body)))
            }
            TokenKind::LeftParen => {
                self.advance();
                self.skip_newlines();
                let body = self.list()?;
                self.skip_newlines();
                self.expect(TokenKind::RightParen)?;
                Ok(self.arena.alloc(Node::Subshell(body)))
            }
            TokenKind::Word => {
                // Two-token lookahead for the `name ( )` function form.
                let next1 = self.tokens.get(self.pos + 1).map(|t| t.kind);
                let next2 = self.tokens.get(self.pos + 2).map(|t| t.kind);
                if next1 == Some(TokenKind::LeftParen) && next2 == Some(TokenKind::RightParen) {
                    let name = self.advance();
                    self.advance();
                    self.advance();
                    return self.function_body(name.text);
                }
                self.simple_command()
            }
            kind if kind.is_redirection() || is_command_word(&token) => self.simple_command(),
            _ => Err(self.error_here(SyntaxError::UnexpectedToken(describe(&token)))),
        }
    }

    /// Parses one clause of an `if`: condition, `then` body, and any
    /// `elif`/`else` continuation, leaving the closing `fi` unconsumed.
    fn if_clause(&mut self) -> Result<If<'a>, Error> {
        self.skip_newlines();
        let condition = self.list()?;
        self.skip_newlines();
        self.expect_keyword(Keyword::Then)?;
        self.skip_newlines();
        let then_body = self.list()?;
        self.skip_newlines();

        let else_body = if self.match_keyword(Keyword::Elif) {
            let nested = self.if_clause()?;
            Some(&*self.arena.alloc(Node::If(nested)))
        } else if self.match_keyword(Keyword::Else) {
            self.skip_newlines();
            let body = self.list()?;
            self.skip_newlines();
            body
        } else {
            None
        };

        Ok(If {
            condition,
            then_body,
            else_body,
        })
    }

    fn if_command(&mut self) -> Result<&'a Node<'a>, Error> {
        let clause = self.if_clause()?;
        self.expect_keyword(Keyword::Fi)?;
        Ok(self.arena.alloc(Node::If(clause)))
    }

    fn while_command(&mut self) -> Result<&'a Node<'a>, Error> {
        self.skip_newlines();
        let condition = self.list()?;
        self.skip_newlines();
        self.expect_keyword(Keyword::Do)?;
        self.skip_newlines();
        let body = self.list()?;
        self.skip_newlines();
        self.expect_keyword(Keyword::Done)?;
        Ok(self.arena.alloc(Node::While(While { condition, body })))
    }

    fn for_command(&mut self) -> Result<&'a Node<'a>, Error> {
        self.skip_newlines();
        let name = self.expect(TokenKind::Word)?;
        self.skip_newlines();

        let mut words = Vec::new();
        if self.match_keyword(Keyword::In) {
            while self.check(TokenKind::Word) {
                words.push(self.advance().text);
            }
        }

        // The separator between the word list (or name) and `do`.
        if matches!(self.current().kind, TokenKind::Semi | TokenKind::Newline) {
            self.advance();
        }
        self.skip_newlines();
        self.expect_keyword(Keyword::Do)?;
        self.skip_newlines();
        let body = self.list()?;
        self.skip_newlines();
        self.expect_keyword(Keyword::Done)?;

        Ok(self.arena.alloc(Node::For(For {
            name: name.text,
            words: self.arena.alloc_slice(&words),
            body,
        })))
    }

    fn function_command(&mut self) -> Result<&'a Node<'a>, Error> {
        let name = self.expect(TokenKind::Word)?;
        if self.match_kind(TokenKind::LeftParen) {
            self.expect(TokenKind::RightParen)?;
        }
        self.function_body(name.text)
    }

    fn function_body(&mut self, name: &'a str) -> Result<&'a Node<'a>, Error> {
        self.skip_newlines();
        self.expect(TokenKind::LeftBrace)?;
        self.skip_newlines();
        let body = self.list()?;
        self.skip_newlines();
        self.expect(TokenKind::RightBrace)?;
        Ok(self
            .arena
            .alloc(Node::FunctionDef(FunctionDef { name, body })))
    }

    fn simple_command(&mut self) -> Result<&'a Node<'a>, Error> {
        let mut assigns = Vec::new();
        let mut words: Vec<&'a str> = Vec::new();
        let mut redirs: Vec<Redir<'a>> = Vec::new();

        loop {
            let token = *self.current();
            if token.kind.is_redirection() {
                redirs.push(self.redirection()?);
            } else if is_command_word(&token) {
                self.advance();
                // Words of the form NAME=value are assignments until the
                // first ordinary word fixes the command name.
                if words.is_empty() {
                    if let Some(assign) = split_assignment(token.text) {
                        assigns.push(assign);
                        continue;
                    }
                }
                words.push(token.text);
            } else {
                break;
            }
        }

        if assigns.is_empty() && words.is_empty() && redirs.is_empty() {
            return Err(self.error_here(SyntaxError::MissingCommand));
        }

        // Build the chain back to front so that iterating from the head
        // applies redirections in source order.
        let mut chain: Option<&'a Redir<'a>> = None;
        for redir in redirs.iter().rev() {
            chain = Some(self.arena.alloc(Redir {
                next: chain,
                ..*redir
            }));
        }

        let simple = SimpleCommand {
            assigns: self.arena.alloc_slice(&assigns),
            words: self.arena.alloc_slice(&words),
            redirs: chain,
        };
        Ok(self.arena.alloc(Node::Simple(simple)))
    }

    fn redirection(&mut self) -> Result<Redir<'a>, Error> {
        let op_token = self.advance();
        let (op, target) = match op_token.kind {
            TokenKind::Less => (RedirOp::Input, None),
            TokenKind::Great => (RedirOp::Output, None),
            TokenKind::DGreat => (RedirOp::Append, None),
            TokenKind::DLess => (RedirOp::HereDoc, None),
            // The lexer scans the dup target into the operator token.
            TokenKind::GreatAnd => (RedirOp::DupOut, Some(op_token.text)),
            TokenKind::LessAnd => (RedirOp::DupIn, Some(op_token.text)),
            _ => unreachable!("redirection called on a non-redirection token"),
        };

        let target = match target {
            Some(target) => target,
            None => {
                if !self.check(TokenKind::Word) {
                    return Err(self.error_here(SyntaxError::MissingRedirTarget));
                }
                self.advance().text
            }
        };

        Ok(Redir {
            op,
            fd: op_token.fd,
            target,
            next: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::lex::Lexer;
    use super::*;
    use assert_matches::assert_matches;

    fn parse_str<'a>(input: &'a str, arena: &'a Arena) -> Option<&'a Node<'a>> {
        let tokens = Lexer::new(input, arena).tokenize().unwrap();
        parse(tokens, arena).unwrap()
    }

    fn parse_err(input: &str) -> Error {
        let arena = Arena::new();
        let tokens = Lexer::new(input, &arena).tokenize().unwrap();
        parse(tokens, &arena).unwrap_err()
    }

    #[test]
    fn empty_input_parses_to_none() {
        let arena = Arena::new();
        assert_eq!(parse_str("", &arena), None);
        assert_eq!(parse_str("   ", &arena), None);
        assert_eq!(parse_str("\n\n\n", &arena), None);
    }

    #[test]
    fn comment_only_input_parses_to_none() {
        let arena = Arena::new();
        assert_eq!(parse_str("# just a comment", &arena), None);
        assert_eq!(parse_str("  # indented\n# another\n", &arena), None);
    }

    #[test]
    fn simple_command_words() {
        let arena = Arena::new();
        let node = parse_str("echo hello world", &arena).unwrap();
        assert_matches!(node, Node::Simple(simple) => {
            assert_eq!(simple.words, &["echo", "hello", "world"]);
            assert!(simple.assigns.is_empty());
            assert!(simple.redirs.is_none());
        });
    }

    #[test]
    fn leading_assignments_are_split_off() {
        let arena = Arena::new();
        let node = parse_str("FOO=bar BAZ=qux echo x", &arena).unwrap();
        assert_matches!(node, Node::Simple(simple) => {
            assert_eq!(simple.assigns.len(), 2);
            assert_eq!(simple.assigns[0], Assign { name: "FOO", value: "bar" });
            assert_eq!(simple.assigns[1], Assign { name: "BAZ", value: "qux" });
            assert_eq!(simple.words, &["echo", "x"]);
        });
    }

    #[test]
    fn assignment_after_command_name_stays_a_word() {
        let arena = Arena::new();
        let node = parse_str("env FOO=bar", &arena).unwrap();
        assert_matches!(node, Node::Simple(simple) => {
            assert!(simple.assigns.is_empty());
            assert_eq!(simple.words, &["env", "FOO=bar"]);
        });
    }

    #[test]
    fn bare_assignment_is_a_command() {
        let arena = Arena::new();
        let node = parse_str("FOO=bar", &arena).unwrap();
        assert_matches!(node, Node::Simple(simple) => {
            assert_eq!(simple.assigns.len(), 1);
            assert!(simple.words.is_empty());
        });
    }

    #[test]
    fn redirections_are_collected_in_source_order() {
        let arena = Arena::new();
        let node = parse_str("cmd < in > out 2>> log", &arena).unwrap();
        assert_matches!(node, Node::Simple(simple) => {
            let redirs: Vec<_> = simple.redirs().collect();
            assert_eq!(redirs.len(), 3);
            assert_eq!((redirs[0].op, redirs[0].target), (RedirOp::Input, "in"));
            assert_eq!((redirs[1].op, redirs[1].target), (RedirOp::Output, "out"));
            assert_eq!(
                (redirs[2].op, redirs[2].fd, redirs[2].target),
                (RedirOp::Append, Some(2), "log")
            );
        });
    }

    #[test]
    fn redirections_interleave_with_words() {
        let arena = Arena::new();
        let node = parse_str("> out echo hi", &arena).unwrap();
        assert_matches!(node, Node::Simple(simple) => {
            assert_eq!(simple.words, &["echo", "hi"]);
            assert_eq!(simple.redirs().count(), 1);
        });
    }

    #[test]
    fn dup_redirection() {
        let arena = Arena::new();
        let node = parse_str("cat nosuch 2>&1", &arena).unwrap();
        assert_matches!(node, Node::Simple(simple) => {
            let redirs: Vec<_> = simple.redirs().collect();
            assert_eq!(redirs[0].op, RedirOp::DupOut);
            assert_eq!(redirs[0].fd, Some(2));
            assert_eq!(redirs[0].target, "1");
        });
    }

    #[test]
    fn pipeline_of_three() {
        let arena = Arena::new();
        let node = parse_str("a | b | c", &arena).unwrap();
        assert_matches!(node, Node::Pipeline(pipeline) => {
            assert_eq!(pipeline.commands.len(), 3);
            assert!(!pipeline.negated);
        });
    }

    #[test]
    fn pipeline_allows_newline_after_pipe() {
        let arena = Arena::new();
        let node = parse_str("a |\n\nb", &arena).unwrap();
        assert_matches!(node, Node::Pipeline(pipeline) => {
            assert_eq!(pipeline.commands.len(), 2);
        });
    }

    #[test]
    fn single_command_is_not_wrapped_in_a_pipeline() {
        let arena = Arena::new();
        assert_matches!(parse_str("a", &arena).unwrap(), Node::Simple(_));
    }

    #[test]
    fn negated_single_command_uses_negate() {
        let arena = Arena::new();
        assert_matches!(parse_str("! a", &arena).unwrap(), Node::Negate(Node::Simple(_)));
    }

    #[test]
    fn negated_pipeline_sets_the_flag() {
        let arena = Arena::new();
        let node = parse_str("! a | b", &arena).unwrap();
        assert_matches!(node, Node::Pipeline(pipeline) => {
            assert!(pipeline.negated);
            assert_eq!(pipeline.commands.len(), 2);
        });
    }

    #[test]
    fn and_or_fold_left() {
        let arena = Arena::new();
        let node = parse_str("a && b || c", &arena).unwrap();
        assert_matches!(node, Node::Or(Node::And(_, _), _));
    }

    #[test]
    fn sequence_and_operators_share_precedence() {
        let arena = Arena::new();
        let node = parse_str("a; b && c", &arena).unwrap();
        assert_matches!(node, Node::And(Node::Sequence(_, _), _));
    }

    #[test]
    fn trailing_semicolon_is_allowed() {
        let arena = Arena::new();
        assert_matches!(parse_str("a;", &arena).unwrap(), Node::Simple(_));
    }

    #[test]
    fn background_wraps_the_left_side() {
        let arena = Arena::new();
        assert_matches!(parse_str("a &", &arena).unwrap(), Node::Background(_));
        let node = parse_str("a & b", &arena).unwrap();
        assert_matches!(node, Node::Sequence(Node::Background(_), Node::Simple(_)));
    }

    #[test]
    fn if_command() {
        let arena = Arena::new();
        let node = parse_str("if a; then b; fi", &arena).unwrap();
        assert_matches!(node, Node::If(if_node) => {
            assert!(if_node.condition.is_some());
            assert!(if_node.then_body.is_some());
            assert!(if_node.else_body.is_none());
        });
    }

    #[test]
    fn if_else_command() {
        let arena = Arena::new();
        let node = parse_str("if a; then b; else c; fi", &arena).unwrap();
        assert_matches!(node, Node::If(if_node) => {
            assert!(if_node.else_body.is_some());
        });
    }

    #[test]
    fn elif_chain_nests_in_else_body() {
        let arena = Arena::new();
        let node = parse_str("if a; then b; elif c; then d; elif e; then f; else g; fi", &arena)
            .unwrap();
        assert_matches!(node, Node::If(outer) => {
            assert_matches!(outer.else_body, Some(Node::If(middle)) => {
                assert_matches!(middle.else_body, Some(Node::If(inner)) => {
                    assert!(inner.else_body.is_some());
                });
            });
        });
    }

    #[test]
    fn if_accepts_newlines_for_separators() {
        let arena = Arena::new();
        let node = parse_str("if a\nthen\nb\nfi", &arena).unwrap();
        assert_matches!(node, Node::If(_));
    }

    #[test]
    fn while_command() {
        let arena = Arena::new();
        let node = parse_str("while a; do b; done", &arena).unwrap();
        assert_matches!(node, Node::While(while_node) => {
            assert!(while_node.condition.is_some());
            assert!(while_node.body.is_some());
        });
    }

    #[test]
    fn for_command_with_words() {
        let arena = Arena::new();
        let node = parse_str("for x in a b c; do echo $x; done", &arena).unwrap();
        assert_matches!(node, Node::For(for_node) => {
            assert_eq!(for_node.name, "x");
            assert_eq!(for_node.words, &["a", "b", "c"]);
            assert!(for_node.body.is_some());
        });
    }

    #[test]
    fn for_command_without_in() {
        let arena = Arena::new();
        let node = parse_str("for x; do echo; done", &arena).unwrap();
        assert_matches!(node, Node::For(for_node) => {
            assert!(for_node.words.is_empty());
        });
    }

    #[test]
    fn for_command_with_newline_before_do() {
        let arena = Arena::new();
        let node = parse_str("for x in a b\ndo echo\ndone", &arena).unwrap();
        assert_matches!(node, Node::For(_));
    }

    #[test]
    fn function_definition_postfix_form() {
        let arena = Arena::new();
        let node = parse_str("greet() { echo hi; }", &arena).unwrap();
        assert_matches!(node, Node::FunctionDef(def) => {
            assert_eq!(def.name, "greet");
            assert!(def.body.is_some());
        });
    }

    #[test]
    fn function_definition_keyword_form() {
        let arena = Arena::new();
        let node = parse_str("function greet { echo hi; }", &arena).unwrap();
        assert_matches!(node, Node::FunctionDef(def) => {
            assert_eq!(def.name, "greet");
        });
        let node = parse_str("function greet() { echo hi; }", &arena).unwrap();
        assert_matches!(node, Node::FunctionDef(_));
    }

    #[test]
    fn call_with_parens_needs_both_to_be_adjacentish() {
        // `f (x)` is not a function definition; it is a parse error since
        // `(` cannot continue a simple command.
        let error = parse_err("f (x)");
        assert_matches!(error.cause, SyntaxError::UnexpectedToken(_));
    }

    #[test]
    fn subshell_and_block() {
        let arena = Arena::new();
        assert_matches!(parse_str("(a; b)", &arena).unwrap(), Node::Subshell(Some(_)));
        assert_matches!(parse_str("{ a; b }", &arena).unwrap(), Node::Block(Some(_)));
    }

    #[test]
    fn return_and_local_parse_as_commands() {
        let arena = Arena::new();
        let node = parse_str("return 3", &arena).unwrap();
        assert_matches!(node, Node::Simple(simple) => {
            assert_eq!(simple.words, &["return", "3"]);
        });
        let node = parse_str("local x=1", &arena).unwrap();
        assert_matches!(node, Node::Simple(simple) => {
            assert_eq!(simple.words, &["local", "x=1"]);
        });
    }

    #[test]
    fn missing_fi_is_an_error() {
        let error = parse_err("if a; then b;");
        assert_matches!(error.cause, SyntaxError::Expected { expected, .. } => {
            assert_eq!(expected, "fi");
        });
    }

    #[test]
    fn missing_done_is_an_error() {
        let error = parse_err("while a; do b");
        assert_matches!(error.cause, SyntaxError::Expected { expected, .. } => {
            assert_eq!(expected, "done");
        });
    }

    #[test]
    fn stray_rparen_is_an_error() {
        let error = parse_err(")");
        assert_matches!(error.cause, SyntaxError::UnexpectedToken(token) => {
            assert_eq!(token, ")");
        });
    }

    #[test]
    fn missing_redirection_target_is_an_error() {
        let error = parse_err("echo >");
        assert_eq!(error.cause, SyntaxError::MissingRedirTarget);
    }

    #[test]
    fn pipe_without_command_is_an_error() {
        assert_matches!(parse_err("a | ;").cause, SyntaxError::UnexpectedToken(_));
    }

    #[test]
    fn error_location_is_reported() {
        let error = parse_err("echo hi )");
        assert_eq!(error.location.line, 1);
        assert_eq!(error.location.column, 9);
    }

    #[test]
    fn canonical_print_reparses_to_an_equal_tree() {
        let inputs = [
            "echo hello",
            "FOO='a b' echo $FOO",
            "a | b | c",
            "! a | b",
            "! a",
            "a && b || c; d",
            "sleep 5 & jobs",
            "a & ",
            "(a; b) | { c; d }",
            "if a; then b; elif c; then d; else e; fi",
            "while read x; do echo $x; done",
            "for x in 'a b' c; do echo $x; done",
            "for x; do echo; done",
            "greet() { echo hi; }",
            "function greet { echo hi && true; }",
            "echo hello > out.txt 2>&1",
            "cat < in >> out",
            "cmd 'wei rd' \"it's\" plain",
        ];
        for input in inputs {
            let arena = Arena::new();
            let first = parse_str(input, &arena).unwrap();
            let printed = first.to_string();
            let reparsed = parse_str(&printed, &arena)
                .unwrap_or_else(|| panic!("printed form of {input:?} was empty: {printed:?}"));
            assert_eq!(first, reparsed, "round trip of {input:?} via {printed:?}");
            // Printing is a fixed point after one round.
            assert_eq!(printed, reparsed.to_string());
        }
    }
}
