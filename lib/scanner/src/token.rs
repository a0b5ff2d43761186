use std::fmt::Display;

use cursor::Line;
use value::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    /// Parsed payload of number and string literals.
    pub literal: Option<Value>,
    /// Line the token starts on.
    pub line: Line,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: Line) -> Token {
        Self { kind, lexeme: lexeme.into(), literal: None, line }
    }

    pub fn with_literal(mut self, literal: impl Into<Value>) -> Token {
        self.literal = Some(literal.into());
        self
    }

    pub fn eof(line: Line) -> Token {
        Self::new(TokenKind::Eof, "", line)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ", self.kind, self.lexeme)?;
        match &self.literal {
            Some(Value::Str(s)) => write!(f, "{}", s),
            Some(Value::Number(n)) => write!(f, "{:?}", n),
            Some(other) => write!(f, "{}", other),
            None => write!(f, "null"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    // Single-character tokens.
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    // One or two character tokens.
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Literals.
    Identifier,
    #[strum(to_string = "STRING")]
    Str,
    Number,

    // Keywords.
    And,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    Eof,
}

impl TokenKind {
    pub fn keyword(ident: &str) -> Option<TokenKind> {
        use TokenKind::*;
        Some(match ident {
            "and" => And,
            "class" => Class,
            "else" => Else,
            "false" => False,
            "for" => For,
            "fun" => Fun,
            "if" => If,
            "nil" => Nil,
            "or" => Or,
            "print" => Print,
            "return" => Return,
            "super" => Super,
            "this" => This,
            "true" => True,
            "var" => Var,
            "while" => While,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn kind_names() {
        assert_eq!(TokenKind::Minus.to_string(), "MINUS");
        assert_eq!(TokenKind::GreaterEqual.to_string(), "GREATER_EQUAL");
        assert_eq!(TokenKind::Eof.to_string(), "EOF");
    }

    #[test]
    fn keywords() {
        assert_eq!(TokenKind::keyword("nil"), Some(TokenKind::Nil));
        assert_eq!(TokenKind::keyword("while"), Some(TokenKind::While));
        assert_eq!(TokenKind::keyword("While"), None);
        assert_eq!(TokenKind::keyword("nill"), None);
    }

    #[test]
    fn display() {
        let token = Token::new(TokenKind::Number, "12", Line(1)).with_literal(12.0);
        assert_eq!(token.to_string(), "NUMBER 12 12.0");

        let token = Token::new(TokenKind::Str, "\"hi\"", Line(1)).with_literal("hi");
        assert_eq!(token.to_string(), "STRING \"hi\" hi");

        assert_eq!(Token::new(TokenKind::Plus, "+", Line(1)).to_string(), "PLUS + null");
        assert_eq!(Token::eof(Line(2)).to_string(), "EOF  null");
    }
}
