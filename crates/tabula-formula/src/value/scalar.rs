//! Scalar leaves: numbers, booleans, strings and the empty state

use std::fmt;

use tabula_core::{ErrorKind, SharedString};

use super::Primitive;

/// A single primitive value, or the empty state
///
/// `Null` is what an empty cell evaluates to. It is distinct from
/// `Number(0.0)` even though both are falsy.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScalarValue {
    #[default]
    Null,
    Number(f64),
    Boolean(bool),
    String(SharedString),
}

impl ScalarValue {
    /// Create a string scalar
    pub fn string<S: AsRef<str>>(s: S) -> Self {
        ScalarValue::String(SharedString::new(s))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, ScalarValue::Boolean(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, ScalarValue::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, ScalarValue::String(_))
    }

    /// Spreadsheet truthiness
    ///
    /// Zero, `FALSE` and the empty string are falsy. `Null` is never truthy.
    /// Everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            ScalarValue::Null => false,
            ScalarValue::Number(n) => *n != 0.0,
            ScalarValue::Boolean(b) => *b,
            ScalarValue::String(s) => !s.is_empty(),
        }
    }

    /// Coerce to a number the way numeric functions read their operands
    ///
    /// Empty reads as 0, booleans as 1/0, and text only if it parses as a
    /// number. Anything else is `#VALUE!`.
    pub fn to_number(&self) -> Result<f64, ErrorKind> {
        match self {
            ScalarValue::Null => Ok(0.0),
            ScalarValue::Number(n) => Ok(*n),
            ScalarValue::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
            ScalarValue::String(s) => s.as_str().trim().parse().map_err(|_| ErrorKind::Value),
        }
    }

    /// The primitive this scalar wraps
    pub fn primitive(&self) -> Primitive {
        match self {
            ScalarValue::Null => Primitive::Null,
            ScalarValue::Number(n) => Primitive::Number(*n),
            ScalarValue::Boolean(b) => Primitive::Boolean(*b),
            ScalarValue::String(s) => Primitive::Text(s.clone()),
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Null => Ok(()),
            // No trailing zeros, integers printed without a fraction
            ScalarValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            ScalarValue::Number(n) => write!(f, "{}", n),
            ScalarValue::Boolean(true) => f.write_str("TRUE"),
            ScalarValue::Boolean(false) => f.write_str("FALSE"),
            ScalarValue::String(s) => f.write_str(s.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_truthiness() {
        assert!(!ScalarValue::Null.is_truthy());
        assert!(!ScalarValue::Number(0.0).is_truthy());
        assert!(!ScalarValue::Boolean(false).is_truthy());
        assert!(!ScalarValue::string("").is_truthy());

        assert!(ScalarValue::Number(-0.5).is_truthy());
        assert!(ScalarValue::Boolean(true).is_truthy());
        assert!(ScalarValue::string("FALSE").is_truthy());
    }

    #[test]
    fn test_null_is_not_zero() {
        assert_ne!(ScalarValue::Null, ScalarValue::Number(0.0));
        assert!(ScalarValue::Null.is_null());
        assert!(!ScalarValue::Number(0.0).is_null());
    }

    #[test]
    fn test_to_number() {
        assert_eq!(ScalarValue::Null.to_number(), Ok(0.0));
        assert_eq!(ScalarValue::Boolean(true).to_number(), Ok(1.0));
        assert_eq!(ScalarValue::string(" 2.5 ").to_number(), Ok(2.5));
        assert_eq!(ScalarValue::string("abc").to_number(), Err(ErrorKind::Value));
    }

    #[test]
    fn test_display() {
        assert_eq!(ScalarValue::Number(42.0).to_string(), "42");
        assert_eq!(ScalarValue::Number(0.25).to_string(), "0.25");
        assert_eq!(ScalarValue::Boolean(false).to_string(), "FALSE");
        assert_eq!(ScalarValue::Null.to_string(), "");
    }
}
