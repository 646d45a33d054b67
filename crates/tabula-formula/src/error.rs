//! Formula error types
//!
//! These are host-facing failures (bad function name, bad call shape, bad
//! array literal). Spreadsheet-level failures are [`Value::Error`] results,
//! never `Err`.
//!
//! [`Value::Error`]: crate::Value::Error

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur when building values or dispatching calls
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormulaError {
    /// Unknown function
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Wrong number of arguments
    #[error("Wrong number of arguments for {function}: expected {expected}, got {actual}")]
    ArgumentCount {
        function: String,
        expected: String,
        actual: usize,
    },

    /// Array literal that is empty or ragged
    #[error("Invalid array shape: {0}")]
    InvalidShape(String),

    /// Array literal containing another array
    #[error("Array element at row {row}, column {col} is itself an array")]
    NestedArray { row: usize, col: usize },
}
