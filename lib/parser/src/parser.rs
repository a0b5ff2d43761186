mod expr;

use errors::Diagnostic;
pub use expr::Expr;
use scanner::{Token, TokenKind};
use value::Value;

use TokenKind::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// No grammar rule starts with the current token.
    NoRuleFound,
    MissingRightParen,
    /// A complete expression was followed by something other than the end of input.
    UnexpectedToken,
    /// More than [`MAX_NESTING`] groupings and unary operators inside each other.
    TooDeep,
}

/// Deepest nesting of groupings and unary operators the parser accepts.
pub const MAX_NESTING: usize = 255;

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ParseErrorKind::NoRuleFound => "Expected expression",
                ParseErrorKind::MissingRightParen => "Expected ')' after expression",
                ParseErrorKind::UnexpectedToken => "Expected end of expression",
                ParseErrorKind::TooDeep => "Expression nests too deeply",
            }
        )
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{kind}, found {}", found(.token))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Token the parser was looking at when it gave up.
    pub token: Token,
}

fn found(token: &Token) -> String {
    if token.is_eof() {
        "end of input".to_string()
    } else {
        format!("'{}'", token.lexeme)
    }
}

impl ParseError {
    fn new(kind: ParseErrorKind, token: Token) -> Self {
        Self { kind, token }
    }
}

impl From<ParseError> for Diagnostic {
    fn from(error: ParseError) -> Self {
        Diagnostic::compilation(error.token.line, error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// Parses a complete token list (as produced by [`scanner::lex`]) into a
/// single expression.
pub fn parse(tokens: Vec<Token>) -> Result<Expr> {
    Parser::new(tokens).parse()
}

/// Recursive descent parser with one token of lookahead.
///
/// ```text
/// expression -> equality
/// equality   -> comparison ( ( "!=" | "==" ) comparison )*
/// comparison -> term ( ( ">" | ">=" | "<" | "<=" ) term )*
/// term       -> factor ( ( "-" | "+" ) factor )*
/// factor     -> unary ( ( "/" | "*" ) unary )*
/// unary      -> ( "!" | "-" ) unary | primary
/// primary    -> NUMBER | STRING | "true" | "false" | "nil" | "(" expression ")"
/// ```
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    depth: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let line = tokens.last().map_or(cursor::Line(1), |t| t.line);
            tokens.push(Token::eof(line));
        }
        Self { tokens, current: 0, depth: 0 }
    }

    /// Parses one expression that has to span the whole input.
    pub fn parse(mut self) -> Result<Expr> {
        let expr = self.expression()?;

        if !self.is_at_end() {
            return Err(self.error(ParseErrorKind::UnexpectedToken));
        }

        log::debug!("Parsed expression from {} tokens", self.tokens.len());
        Ok(expr)
    }

    /// Parses the next expression and leaves any remaining tokens alone.
    pub fn parse_expression(&mut self) -> Result<Expr> {
        self.expression()
    }

    /// Skips tokens until a likely statement boundary: just past a `;`, or
    /// before a keyword that starts a declaration or statement.
    ///
    /// [`Parser::parse`] never calls this; it's meant for resuming after a
    /// fault when parsing several expressions from one token list.
    pub fn synchronize(&mut self) {
        let mut skipped = self.advance();
        while !self.is_at_end() {
            log::trace!("Syncing... {:?}", self.peek_token());
            if skipped.kind == Semicolon {
                return;
            }
            if let Class | Fun | Var | For | If | While | Print | Return = self.peek() {
                return;
            }
            skipped = self.advance();
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.peek() == Eof
    }

    fn expression(&mut self) -> Result<Expr> {
        self.equality()
    }

    fn equality(&mut self) -> Result<Expr> {
        let mut expr = self.comparison()?;

        while let BangEqual | EqualEqual = self.peek() {
            let operator = self.advance();
            let right = self.comparison()?;
            expr = Expr::binary(expr, operator, right);
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expr> {
        let mut expr = self.term()?;

        while let Greater | GreaterEqual | Less | LessEqual = self.peek() {
            let operator = self.advance();
            let right = self.term()?;
            expr = Expr::binary(expr, operator, right);
        }
        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr> {
        let mut expr = self.factor()?;

        while let Minus | Plus = self.peek() {
            let operator = self.advance();
            let right = self.factor()?;
            expr = Expr::binary(expr, operator, right);
        }
        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr> {
        let mut expr = self.unary()?;

        while let Slash | Star = self.peek() {
            let operator = self.advance();
            let right = self.unary()?;
            expr = Expr::binary(expr, operator, right);
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr> {
        if let Bang | Minus = self.peek() {
            let operator = self.advance();
            let right = self.nested(Self::unary)?;
            return Ok(Expr::unary(operator, right));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expr> {
        let expr = match self.peek() {
            False => Expr::Literal(Value::Bool(false)),
            True => Expr::Literal(Value::Bool(true)),
            Nil => Expr::Literal(Value::Nil),
            Number | Str => match &self.peek_token().literal {
                Some(value) => Expr::Literal(value.clone()),
                None => {
                    log::debug!("Literal token without a value: {:?}", self.peek_token());
                    return Err(self.error(ParseErrorKind::NoRuleFound));
                }
            },
            LeftParen => {
                self.advance();
                let expr = self.nested(Self::expression)?;
                self.consume_or_error(RightParen, ParseErrorKind::MissingRightParen)?;
                return Ok(Expr::grouping(expr));
            }
            _ => {
                log::debug!("No rule for {:?}", self.peek_token());
                return Err(self.error(ParseErrorKind::NoRuleFound));
            }
        };
        self.advance();
        Ok(expr)
    }
}

// Helpers
impl Parser {
    fn peek_token(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn peek(&self) -> TokenKind {
        self.peek_token().kind
    }

    /// Returns the current token and moves past it. Never moves past `Eof`.
    fn advance(&mut self) -> Token {
        let token = self.peek_token().clone();
        if !token.is_eof() {
            self.current += 1;
        }
        token
    }

    fn consume_or_error(&mut self, kind: TokenKind, error: ParseErrorKind) -> Result<Token> {
        if self.peek() == kind {
            Ok(self.advance())
        } else {
            Err(self.error(error))
        }
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.peek_token().clone())
    }

    /// Runs `parse` one nesting level deeper, failing once [`MAX_NESTING`] is
    /// reached so that parsing, evaluating and printing never exhaust the stack.
    fn nested(&mut self, parse: impl FnOnce(&mut Self) -> Result<Expr>) -> Result<Expr> {
        if self.depth >= MAX_NESTING {
            return Err(self.error(ParseErrorKind::TooDeep));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }
}
