use std::fmt::{self, Display, Formatter};

/// Runtime value of an expression, also used as the literal payload of
/// number and string tokens.
#[derive(Clone, Debug, PartialEq, derive_more::From)]
pub enum Value {
    Number(f64),
    Str(String),
    Bool(bool),
    Nil,
}

impl Value {
    /// Only `nil` and `false` are falsey, `0` and `""` are truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    pub fn is_falsey(&self) -> bool {
        !self.is_truthy()
    }

    /// Equality as the `==` operator sees it. Values of different kinds are
    /// never equal. Numbers compare by bit pattern rather than with IEEE `==`:
    /// every `NaN` equals every other `NaN`, and `0` and `-0` differ.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Number(a), Value::Number(b)) => {
                (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

/// Renders a value the way the shell prints results. Numbers use the shortest
/// decimal text that reads back as the same `f64`, without exponent notation,
/// so `1e21` prints as `1000000000000000000000` and `1e-7` as `0.0000001`.
/// Integral numbers print without a fraction.
impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) if n.is_infinite() => {
                write!(f, "{}", if n.is_sign_positive() { "Infinity" } else { "-Infinity" })
            }
            // f64's Display already drops the `.0` of integral values
            Value::Number(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Nil => write!(f, "nil"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn truthiness() {
        assert!(Value::Nil.is_falsey());
        assert!(Value::Bool(false).is_falsey());
        assert!(Value::Bool(true).is_truthy());
        assert!(Value::Number(0.0).is_truthy());
        assert!(Value::from("").is_truthy());
    }

    #[test]
    fn equality() {
        assert!(Value::Nil.equals(&Value::Nil));
        assert!(Value::from(1.0).equals(&Value::from(1.0)));
        assert!(Value::from("a").equals(&Value::from("a")));
        assert!(!Value::from("a").equals(&Value::from("b")));
        assert!(Value::from(true).equals(&Value::from(true)));

        assert!(!Value::Nil.equals(&Value::Bool(false)));
        assert!(!Value::from(0.0).equals(&Value::Nil));
        assert!(!Value::from(1.0).equals(&Value::from("1")));
    }

    #[test]
    fn number_equality_by_bits() {
        assert!(Value::from(f64::NAN).equals(&Value::from(f64::NAN)));
        assert!(Value::from(f64::NAN).equals(&Value::from(-f64::NAN)));
        assert!(!Value::from(0.0).equals(&Value::from(-0.0)));
        assert!(Value::from(-0.0).equals(&Value::from(-0.0)));
        assert!(Value::from(f64::INFINITY).equals(&Value::from(f64::INFINITY)));
        assert!(!Value::from(f64::NAN).equals(&Value::from(0.0)));
    }

    #[test]
    fn rendering() {
        assert_eq!(Value::from(3.0).to_string(), "3");
        assert_eq!(Value::from(-12.0).to_string(), "-12");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::from(0.1 + 0.2).to_string(), "0.30000000000000004");
        assert_eq!(Value::from(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Value::from(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Value::from(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::from(1e21).to_string(), "1000000000000000000000");
        assert_eq!(Value::from(1e-7).to_string(), "0.0000001");
        assert_eq!(Value::from("hello").to_string(), "hello");
        assert_eq!(Value::from(false).to_string(), "false");
        assert_eq!(Value::Nil.to_string(), "nil");
    }
}
