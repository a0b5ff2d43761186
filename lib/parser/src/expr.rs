use std::{
    fmt::{self, Display, Formatter},
    mem,
};

use scanner::Token;
use value::Value;

/// Expression tree. Each node owns its children; the tree is never mutated
/// after the parser builds it.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary { left: Box<Expr>, operator: Token, right: Box<Expr> },
    Grouping(Box<Expr>),
    Unary { operator: Token, right: Box<Expr> },
    Literal(Value),
}

impl Expr {
    pub fn binary(left: Expr, operator: Token, right: Expr) -> Self {
        Expr::Binary { left: Box::new(left), operator, right: Box::new(right) }
    }

    pub fn unary(operator: Token, right: Expr) -> Self {
        Expr::Unary { operator, right: Box::new(right) }
    }

    pub fn grouping(inner: Expr) -> Self {
        Expr::Grouping(Box::new(inner))
    }

    /// Renders the tree back into infix source text that parses into the
    /// same tree again.
    pub fn to_source(&self) -> String {
        Source(self).to_string()
    }

    /// Splits a left-leaning chain of binary nodes like `1 + 2 - 3 * 4` into
    /// its leftmost operand and the `(operator, right)` pairs applied to it,
    /// innermost first. Any other node comes back as its own leftmost operand
    /// with no pairs.
    pub fn left_spine(&self) -> (&Expr, Vec<(&Token, &Expr)>) {
        let mut spine = Vec::new();
        let mut leftmost = self;
        while let Expr::Binary { left, operator, right } = leftmost {
            spine.push((operator, right.as_ref()));
            leftmost = left.as_ref();
        }
        spine.reverse();
        (leftmost, spine)
    }
}

/// Parenthesized prefix form, e.g. `(* (group (+ 1 2)) 3)`.
impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Binary { .. } => {
                let (leftmost, spine) = self.left_spine();
                for (operator, _) in spine.iter().rev() {
                    write!(f, "({} ", operator.lexeme)?;
                }
                write!(f, "{}", leftmost)?;
                for (_, right) in spine {
                    write!(f, " {})", right)?;
                }
                Ok(())
            }
            Expr::Grouping(expression) => {
                write!(f, "(group {})", expression)
            }
            Expr::Unary { operator, right } => {
                write!(f, "({} {})", operator.lexeme, right)
            }
            Expr::Literal(Value::Str(s)) => write!(f, "\"{}\"", s),
            Expr::Literal(value) => write!(f, "{}", value),
        }
    }
}

// Long operator chains are left-leaning trees as deep as they are long, so
// tear them down with an explicit stack instead of one recursive drop per node.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.take_children(&mut pending);
        }
    }
}

impl Expr {
    /// Moves every non-literal child into `into`, leaving `nil` behind.
    fn take_children(&mut self, into: &mut Vec<Expr>) {
        let mut take = |child: &mut Box<Expr>| {
            if !matches!(**child, Expr::Literal(_)) {
                into.push(mem::replace(&mut **child, Expr::Literal(Value::Nil)));
            }
        };
        match self {
            Expr::Binary { left, right, .. } => {
                take(left);
                take(right);
            }
            Expr::Grouping(inner) | Expr::Unary { right: inner, .. } => take(inner),
            Expr::Literal(_) => {}
        }
    }
}

struct Source<'a>(&'a Expr);

impl Display for Source<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Expr::Binary { .. } => {
                let (leftmost, spine) = self.0.left_spine();
                write!(f, "{}", Source(leftmost))?;
                for (operator, right) in spine {
                    write!(f, " {} {}", operator.lexeme, Source(right))?;
                }
                Ok(())
            }
            Expr::Grouping(expression) => write!(f, "({})", Source(expression)),
            Expr::Unary { operator, right } => write!(f, "{}{}", operator.lexeme, Source(right)),
            // Digit runs past f64::MAX lex as infinity, so write one out again
            Expr::Literal(Value::Number(n)) if n.is_infinite() => {
                write!(f, "1{}", "0".repeat(309))
            }
            // Not going through Value's Display, which spells out infinities
            Expr::Literal(Value::Number(n)) => write!(f, "{}", n),
            Expr::Literal(Value::Str(s)) => write!(f, "\"{}\"", s),
            Expr::Literal(value) => write!(f, "{}", value),
        }
    }
}
