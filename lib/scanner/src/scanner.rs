use cursor::{Cursor, Line};
use errors::Diagnostic;

pub mod token;
pub use token::{Token, TokenKind};
use TokenKind::*;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScanErrorKind {
    #[error("Unexpected character: {0}")]
    UnrecognizedCharacter(char),
    #[error("Unterminated string")]
    UnterminatedString,
    #[error("Unterminated block comment")]
    UnterminatedComment,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{kind}")]
pub struct ScanError {
    pub kind: ScanErrorKind,
    /// Line the offending character or construct starts on.
    pub line: Line,
}

impl ScanError {
    fn new(kind: ScanErrorKind, line: Line) -> Self {
        Self { kind, line }
    }
}

impl From<ScanError> for Diagnostic {
    fn from(error: ScanError) -> Self {
        Diagnostic::compilation(error.line, error.kind.to_string())
    }
}

/// Splits `source` into tokens, always terminated by a single `Eof` token.
///
/// Stops at the first lexical fault; no partial token list is returned.
pub fn lex(source: &str) -> Result<Vec<Token>, ScanError> {
    Scanner::new(source).scan_tokens()
}

pub struct Scanner<'a> {
    cursor: Cursor<'a>,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { cursor: Cursor::new(source), tokens: Vec::new() }
    }

    pub fn scan_tokens(mut self) -> Result<Vec<Token>, ScanError> {
        loop {
            let start = self.cursor.clone();
            let Some(c) = self.cursor.next() else {
                break;
            };

            match c {
                '(' => self.add_token(LeftParen, &start),
                ')' => self.add_token(RightParen, &start),
                '{' => self.add_token(LeftBrace, &start),
                '}' => self.add_token(RightBrace, &start),
                ',' => self.add_token(Comma, &start),
                '.' => self.add_token(Dot, &start),
                '-' => self.add_token(Minus, &start),
                '+' => self.add_token(Plus, &start),
                ';' => self.add_token(Semicolon, &start),
                '*' => self.add_token(Star, &start),

                '!' => {
                    let kind = if self.cursor.eat('=') { BangEqual } else { Bang };
                    self.add_token(kind, &start)
                }
                '=' => {
                    let kind = if self.cursor.eat('=') { EqualEqual } else { Equal };
                    self.add_token(kind, &start)
                }
                '<' => {
                    let kind = if self.cursor.eat('=') { LessEqual } else { Less };
                    self.add_token(kind, &start)
                }
                '>' => {
                    let kind = if self.cursor.eat('=') { GreaterEqual } else { Greater };
                    self.add_token(kind, &start)
                }

                '/' => {
                    if self.cursor.eat('/') {
                        // The newline itself is left for the main loop
                        self.cursor.eat_while(|c| c != '\n');
                    } else if self.cursor.eat('*') {
                        self.block_comment(&start)?;
                    } else {
                        self.add_token(Slash, &start)
                    }
                }

                d if d.is_ascii_digit() => self.number(&start),

                '"' => self.string(&start)?,

                c if is_identifier_start(c) => self.identifier(&start),

                // Lines are counted by the cursor
                ' ' | '\r' | '\t' | '\n' => (),

                c => {
                    return Err(ScanError::new(
                        ScanErrorKind::UnrecognizedCharacter(c),
                        start.line(),
                    ))
                }
            }
        }

        self.tokens.push(Token::eof(self.cursor.line()));
        log::debug!("Scanned {} tokens", self.tokens.len());

        Ok(self.tokens)
    }

    fn add_token(&mut self, kind: TokenKind, start: &Cursor<'a>) {
        self.push(Token::new(kind, start.slice_until(&self.cursor), start.line()));
    }

    fn push(&mut self, token: Token) {
        log::trace!("Token: {}", token);
        self.tokens.push(token);
    }

    fn block_comment(&mut self, start: &Cursor<'a>) -> Result<(), ScanError> {
        loop {
            match self.cursor.next() {
                Some('*') if self.cursor.eat('/') => return Ok(()),
                Some(_) => (),
                None => {
                    return Err(ScanError::new(ScanErrorKind::UnterminatedComment, start.line()))
                }
            }
        }
    }

    fn string(&mut self, start: &Cursor<'a>) -> Result<(), ScanError> {
        self.cursor.eat_while(|c| c != '"');
        if !self.cursor.eat('"') {
            return Err(ScanError::new(ScanErrorKind::UnterminatedString, start.line()));
        }

        let lexeme = start.slice_until(&self.cursor);
        let contents = &lexeme[1..lexeme.len() - 1];
        self.push(Token::new(Str, lexeme, start.line()).with_literal(contents));
        Ok(())
    }

    fn number(&mut self, start: &Cursor<'a>) {
        self.cursor.eat_while(|c| c.is_ascii_digit());

        // A trailing '.' is not part of the number
        if self.cursor.peek() == Some('.')
            && self.cursor.peek_next().is_some_and(|c| c.is_ascii_digit())
        {
            self.cursor.next();
            self.cursor.eat_while(|c| c.is_ascii_digit());
        }

        let lexeme = start.slice_until(&self.cursor);
        let value: f64 = lexeme.parse().expect("digits with an optional fraction are a valid f64");
        self.push(Token::new(Number, lexeme, start.line()).with_literal(value));
    }

    fn identifier(&mut self, start: &Cursor<'a>) {
        self.cursor.eat_while(is_identifier_continue);

        let lexeme = start.slice_until(&self.cursor);
        self.add_token(TokenKind::keyword(lexeme).unwrap_or(Identifier), start);
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
