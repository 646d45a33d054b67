//! The value model
//!
//! A [`Value`] is exactly one of a scalar, an array or an error. Consumers
//! match on the variant instead of probing capabilities, so every function has
//! to say what it does with all three.
//!
//! Values are immutable once built. Every transformation returns a new value.

mod array;
mod error;
mod scalar;

use std::fmt;

use tabula_core::{CellValue, ErrorKind, SharedString};

use crate::broadcast::Shape;

pub use array::ArrayValue;
pub use error::ErrorValue;
pub use scalar::ScalarValue;

/// A formula value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(ScalarValue),
    Array(ArrayValue),
    Error(ErrorValue),
}

/// The primitive underneath a value, as returned by [`Value::get_value`]
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Null,
    Number(f64),
    Boolean(bool),
    Text(SharedString),
    Error(ErrorKind),
}

impl Value {
    /// The empty value
    pub fn null() -> Self {
        Value::Scalar(ScalarValue::Null)
    }

    /// An error value of the given kind
    pub fn error(kind: ErrorKind) -> Self {
        Value::Error(ErrorValue::new(kind))
    }

    /// `#N/A`
    pub fn na() -> Self {
        Value::Error(ErrorValue::na())
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Scalar(ScalarValue::Null))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Scalar(ScalarValue::Boolean(_)))
    }

    /// The underlying primitive
    ///
    /// An array answers with its top-left cell.
    pub fn get_value(&self) -> Primitive {
        match self {
            Value::Scalar(s) => s.primitive(),
            Value::Error(e) => Primitive::Error(e.kind()),
            Value::Array(a) => a.first_cell().get_value(),
        }
    }

    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&ErrorValue> {
        match self {
            Value::Error(e) => Some(e),
            _ => None,
        }
    }

    /// The error kind, if this is an error
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.as_error().map(ErrorValue::kind)
    }

    /// The value's extent; scalars and errors are 1×1
    pub fn shape(&self) -> Shape {
        match self {
            Value::Array(a) => a.shape(),
            _ => Shape::SCALAR,
        }
    }

    /// Replace a 1×1 array with its only cell
    pub fn unwrap_singleton(self) -> Value {
        match self {
            Value::Array(a) if a.is_single_cell() => a.first_cell(),
            other => other,
        }
    }

    /// Apply `f` to every cell
    ///
    /// Arrays produce a new array of the same shape. Scalars and errors are
    /// passed to `f` once, at `(0, 0)`.
    pub fn map(&self, mut f: impl FnMut(&Value, usize, usize) -> Value) -> Value {
        match self {
            Value::Array(a) => Value::Array(a.map(f)),
            other => f(other, 0, 0),
        }
    }

    /// Arrays cannot sit inside arrays; collapse one to its first cell
    pub(crate) fn into_cell(self) -> Value {
        match self {
            Value::Array(a) => a.first_cell(),
            other => other,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::null()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(s) => write!(f, "{}", s),
            Value::Array(a) => write!(f, "{}", a),
            Value::Error(e) => write!(f, "{}", e),
        }
    }
}

impl From<ScalarValue> for Value {
    fn from(s: ScalarValue) -> Self {
        Value::Scalar(s)
    }
}

impl From<ErrorValue> for Value {
    fn from(e: ErrorValue) -> Self {
        Value::Error(e)
    }
}

impl From<ErrorKind> for Value {
    fn from(kind: ErrorKind) -> Self {
        Value::error(kind)
    }
}

impl From<ArrayValue> for Value {
    fn from(a: ArrayValue) -> Self {
        Value::Array(a)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Scalar(ScalarValue::Number(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Scalar(ScalarValue::Number(n as f64))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Scalar(ScalarValue::Boolean(b))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(ScalarValue::string(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(ScalarValue::String(s.into()))
    }
}

impl From<CellValue> for Value {
    fn from(value: CellValue) -> Self {
        match value {
            CellValue::Empty => Value::null(),
            CellValue::Boolean(b) => b.into(),
            CellValue::Number(n) => n.into(),
            CellValue::String(s) => Value::Scalar(ScalarValue::String(s)),
            CellValue::Error(e) => e.into(),
        }
    }
}

impl From<Option<CellValue>> for Value {
    fn from(value: Option<CellValue>) -> Self {
        value.map(Value::from).unwrap_or_default()
    }
}

impl From<Value> for CellValue {
    /// Storage holds one literal per cell, so an array becomes `#VALUE!`
    fn from(value: Value) -> Self {
        match value {
            Value::Scalar(ScalarValue::Null) => CellValue::Empty,
            Value::Scalar(ScalarValue::Number(n)) => CellValue::Number(n),
            Value::Scalar(ScalarValue::Boolean(b)) => CellValue::Boolean(b),
            Value::Scalar(ScalarValue::String(s)) => CellValue::String(s),
            Value::Error(e) => CellValue::Error(e.kind()),
            Value::Array(_) => CellValue::Error(ErrorKind::Value),
        }
    }
}
