use errors::Diagnostic;
use parser::Expr;
use scanner::{Token, TokenKind};
pub use value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    UnaryOperandType,
    /// Operands of a numeric-only binary operator weren't both numbers.
    BinaryOperandsType,
    /// `+` takes two numbers or two strings, nothing else.
    PlusOperandsType,
    UnknownOperator,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{}", message(.kind, .token))]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    /// Operator the fault was raised for.
    pub token: Token,
}

fn message(kind: &RuntimeErrorKind, token: &Token) -> String {
    match kind {
        RuntimeErrorKind::UnaryOperandType => {
            format!("Unary {} operator: operand must be a number", token.kind)
        }
        RuntimeErrorKind::BinaryOperandsType => {
            format!("Binary {} operator: operands must be both numbers", token.kind)
        }
        RuntimeErrorKind::PlusOperandsType => {
            format!(
                "Binary {} operator: operands must be both numbers or both strings",
                token.kind
            )
        }
        RuntimeErrorKind::UnknownOperator => format!("Unknown operator: {}", token.lexeme),
    }
}

impl RuntimeError {
    fn new(kind: RuntimeErrorKind, token: &Token) -> Self {
        Self { kind, token: token.clone() }
    }
}

impl From<RuntimeError> for Diagnostic {
    fn from(error: RuntimeError) -> Self {
        Diagnostic::runtime(error.token.line, error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Lexes, parses and evaluates `source`, reporting the first fault of any
/// stage.
pub fn run(source: &str) -> errors::Result<Value> {
    let tokens = scanner::lex(source)?;
    let expr = parser::parse(tokens)?;
    Ok(evaluate(&expr)?)
}

/// Computes the value of `expr`. The tree is only read, so the same tree can
/// be evaluated any number of times.
pub fn evaluate(expr: &Expr) -> Result<Value> {
    match expr {
        Expr::Literal(value) => Ok(value.clone()),
        Expr::Grouping(expr) => evaluate(expr),
        Expr::Unary { operator, right } => {
            let right = evaluate(right)?;
            unary(operator, right)
        }
        Expr::Binary { .. } => binary_chain(expr),
    }
}

/// Folds a left-leaning operator chain without recursing down its left side.
/// Both sides of every operator are evaluated, left first.
fn binary_chain(expr: &Expr) -> Result<Value> {
    let (leftmost, spine) = expr.left_spine();
    let mut value = evaluate(leftmost)?;
    for (operator, right) in spine {
        let right = evaluate(right)?;
        value = binary(value, operator, right)?;
    }
    Ok(value)
}

fn unary(operator: &Token, right: Value) -> Result<Value> {
    use TokenKind::*;
    log::trace!("Applying {} to {:?}", operator.lexeme, right);
    match (operator.kind, right) {
        (Bang, v) => Ok(v.is_falsey().into()),
        (Minus, Value::Number(n)) => Ok((-n).into()),
        (Minus, _) => Err(RuntimeError::new(RuntimeErrorKind::UnaryOperandType, operator)),
        _ => Err(RuntimeError::new(RuntimeErrorKind::UnknownOperator, operator)),
    }
}

fn binary(left: Value, operator: &Token, right: Value) -> Result<Value> {
    use TokenKind::*;
    use Value::{Number, Str};
    log::trace!("Applying {} to {:?} and {:?}", operator.lexeme, left, right);
    match (operator.kind, left, right) {
        (Plus, Number(l), Number(r)) => Ok((l + r).into()),
        (Plus, Str(l), Str(r)) => Ok((l + &r).into()),
        (Plus, _, _) => Err(RuntimeError::new(RuntimeErrorKind::PlusOperandsType, operator)),

        (Minus, Number(l), Number(r)) => Ok((l - r).into()),
        (Star, Number(l), Number(r)) => Ok((l * r).into()),
        // Division by zero yields inf/NaN, not a fault
        (Slash, Number(l), Number(r)) => Ok((l / r).into()),
        (Greater, Number(l), Number(r)) => Ok((l > r).into()),
        (GreaterEqual, Number(l), Number(r)) => Ok((l >= r).into()),
        (Less, Number(l), Number(r)) => Ok((l < r).into()),
        (LessEqual, Number(l), Number(r)) => Ok((l <= r).into()),
        (Minus | Star | Slash | Greater | GreaterEqual | Less | LessEqual, _, _) => {
            Err(RuntimeError::new(RuntimeErrorKind::BinaryOperandsType, operator))
        }

        (EqualEqual, l, r) => Ok(l.equals(&r).into()),
        (BangEqual, l, r) => Ok((!l.equals(&r)).into()),

        _ => Err(RuntimeError::new(RuntimeErrorKind::UnknownOperator, operator)),
    }
}
