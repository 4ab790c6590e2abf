// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Tokenizer and token cursor shared by the `.anima` and `.weave` grammars.
//!
//! Both grammars are line-oriented only at section markers: `--` followed by
//! a word on the same line opens a section, any other `--` closes one.
//! Everything else is whitespace-insensitive. `//` starts a line comment.

use std::fmt;

use crate::errors::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Ident(String),
    Integer(i64),
    Str(String),
    /// `--` section marker.
    Marker,
    LBrace,
    RBrace,
    Colon,
    Dot,
    Arrow,
    Equals,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(name) => write!(f, "identifier '{}'", name),
            TokenKind::Integer(n) => write!(f, "integer {}", n),
            TokenKind::Str(_) => write!(f, "string literal"),
            TokenKind::Marker => write!(f, "'--'"),
            TokenKind::LBrace => write!(f, "'{{'"),
            TokenKind::RBrace => write!(f, "'}}'"),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::Dot => write!(f, "'.'"),
            TokenKind::Arrow => write!(f, "'->'"),
            TokenKind::Equals => write!(f, "'='"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
    /// Source text of the token, reported in parse errors.
    pub text: String,
}

struct Lexer<'a> {
    source_kind: &'static str,
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str, source_kind: &'static str) -> Self {
        Self {
            source_kind,
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn error(&self, message: impl Into<String>, line: usize, column: usize, fragment: impl Into<String>) -> ParseError {
        ParseError::new(self.source_kind, message, line, column, fragment)
    }

    fn take_while(&mut self, text: &mut String, keep: impl Fn(char) -> bool) {
        while let Some(&c) = self.chars.peek() {
            if !keep(c) {
                break;
            }
            text.push(c);
            self.bump();
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();

        while let Some(&c) = self.chars.peek() {
            let (line, column) = (self.line, self.column);

            if c.is_whitespace() {
                self.bump();
                continue;
            }

            let (kind, text) = match c {
                '/' => {
                    self.bump();
                    if self.chars.peek() != Some(&'/') {
                        return Err(self.error("expected '//' comment", line, column, "/"));
                    }
                    while let Some(&c) = self.chars.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                    continue;
                }
                '{' | '}' | ':' | '.' | '=' => {
                    self.bump();
                    let kind = match c {
                        '{' => TokenKind::LBrace,
                        '}' => TokenKind::RBrace,
                        ':' => TokenKind::Colon,
                        '.' => TokenKind::Dot,
                        _ => TokenKind::Equals,
                    };
                    (kind, c.to_string())
                }
                '-' => {
                    self.bump();
                    match self.chars.peek() {
                        Some('-') => {
                            self.bump();
                            (TokenKind::Marker, "--".to_string())
                        }
                        Some('>') => {
                            self.bump();
                            (TokenKind::Arrow, "->".to_string())
                        }
                        Some(d) if d.is_ascii_digit() => {
                            let mut text = "-".to_string();
                            self.take_while(&mut text, |c| c.is_ascii_digit());
                            (self.integer(&text, line, column)?, text)
                        }
                        _ => return Err(self.error("unexpected '-'", line, column, "-")),
                    }
                }
                '"' => {
                    self.bump();
                    let value = self.string_body(line, column)?;
                    let text = format!("\"{}\"", value);
                    (TokenKind::Str(value), text)
                }
                d if d.is_ascii_digit() => {
                    let mut text = String::new();
                    self.take_while(&mut text, |c| c.is_ascii_digit());
                    (self.integer(&text, line, column)?, text)
                }
                a if a.is_alphabetic() || a == '_' => {
                    let mut text = String::new();
                    self.take_while(&mut text, |c| c.is_alphanumeric() || c == '_');
                    (TokenKind::Ident(text.clone()), text)
                }
                other => {
                    return Err(self.error(
                        format!("unexpected character '{}'", other),
                        line,
                        column,
                        other.to_string(),
                    ))
                }
            };

            tokens.push(Token {
                kind,
                line,
                column,
                text,
            });
        }

        Ok(tokens)
    }

    fn integer(&self, text: &str, line: usize, column: usize) -> Result<TokenKind, ParseError> {
        text.parse::<i64>()
            .map(TokenKind::Integer)
            .map_err(|_| self.error("integer literal out of range", line, column, text))
    }

    fn string_body(&mut self, line: usize, column: usize) -> Result<String, ParseError> {
        let mut value = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(value),
                Some('\\') => match self.bump() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('"') => value.push('"'),
                    Some('\\') => value.push('\\'),
                    Some(other) => {
                        return Err(self.error(
                            format!("unknown escape '\\{}'", other),
                            self.line,
                            self.column,
                            format!("\\{}", other),
                        ))
                    }
                    None => break,
                },
                Some('\n') | None => break,
                Some(c) => value.push(c),
            }
        }
        Err(self.error("unterminated string literal", line, column, format!("\"{}", value)))
    }
}

/// Splits `source` into tokens, dropping whitespace and comments.
pub fn tokenize(source: &str, source_kind: &'static str) -> Result<Vec<Token>, ParseError> {
    Lexer::new(source, source_kind).tokenize()
}

/// Cursor over a token list with the expectations both grammars share.
pub struct TokenStream {
    source_kind: &'static str,
    tokens: Vec<Token>,
    position: usize,
}

impl TokenStream {
    pub fn new(source: &str, source_kind: &'static str) -> Result<Self, ParseError> {
        Ok(Self {
            source_kind,
            tokens: tokenize(source, source_kind)?,
            position: 0,
        })
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    pub fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Consumes the next token when it is `kind`.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek_kind() == Some(kind) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, kind: TokenKind, context: &str) -> Result<Token, ParseError> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                let token = token.clone();
                self.position += 1;
                Ok(token)
            }
            _ => Err(self.unexpected(&format!("expected {} {}", kind, context))),
        }
    }

    pub fn expect_ident(&mut self, context: &str) -> Result<String, ParseError> {
        match self.peek_kind() {
            Some(TokenKind::Ident(name)) => {
                let name = name.clone();
                self.position += 1;
                Ok(name)
            }
            _ => Err(self.unexpected(&format!("expected identifier {}", context))),
        }
    }

    /// Identifier plus the token it came from, for errors reported after the fact.
    pub fn expect_ident_at(&mut self, context: &str) -> Result<(String, Token), ParseError> {
        let token = self
            .peek()
            .cloned()
            .ok_or_else(|| self.unexpected(&format!("expected identifier {}", context)))?;
        let name = self.expect_ident(context)?;
        Ok((name, token))
    }

    /// `Name` or `plugin.Name`.
    pub fn expect_type_name(&mut self, context: &str) -> Result<String, ParseError> {
        let first = self.expect_ident(context)?;
        if self.eat(&TokenKind::Dot) {
            let second = self.expect_ident(context)?;
            return Ok(format!("{}.{}", first, second));
        }
        Ok(first)
    }

    /// Identifier immediately following the previous token on the same line.
    pub fn ident_on_line(&mut self, line: usize) -> Option<String> {
        match self.peek() {
            Some(Token {
                kind: TokenKind::Ident(name),
                line: l,
                ..
            }) if *l == line => {
                let name = name.clone();
                self.position += 1;
                Some(name)
            }
            _ => None,
        }
    }

    /// Error pointing at the next token, or at end of input.
    pub fn unexpected(&self, message: &str) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::new(
                self.source_kind,
                format!("{}, found {}", message, token.kind),
                token.line,
                token.column,
                token.text.clone(),
            ),
            None => self.at_end(message),
        }
    }

    pub fn error_at(&self, token: &Token, message: impl Into<String>) -> ParseError {
        ParseError::new(
            self.source_kind,
            message,
            token.line,
            token.column,
            token.text.clone(),
        )
    }

    fn at_end(&self, message: &str) -> ParseError {
        let (line, column) = self
            .tokens
            .last()
            .map(|t| (t.line, t.column + t.text.chars().count()))
            .unwrap_or((1, 1));
        ParseError::new(
            self.source_kind,
            format!("{}, found end of input", message),
            line,
            column,
            "<end of input>",
        )
    }
}
