//! # tabula-formula
//!
//! Value model and evaluation engine for tabula's built-in functions.
//!
//! This crate provides:
//! - [`Value`] - A cell value that is a scalar, an array or an error
//! - Broadcasting of mismatched operand shapes onto one grid ([`broadcast`])
//! - A [`Dispatcher`] that validates arity, fills defaults, short-circuits
//!   errors and maps a function's per-cell rule over broadcast grids
//! - A registry of built-in functions ([`functions`])
//!
//! Parsing and reference resolution happen elsewhere: the caller hands the
//! dispatcher already-resolved argument values.
//!
//! ## Example
//!
//! ```rust
//! use tabula_formula::{ArrayValue, Dispatcher, Value};
//!
//! let dispatcher = Dispatcher::global();
//!
//! let result = dispatcher.call("IF", &[Value::from(true), 5.0.into(), 10.0.into()]).unwrap();
//! assert_eq!(result, Value::from(5.0));
//!
//! let condition = ArrayValue::from_rows(vec![vec![true.into(), false.into()]]).unwrap();
//! let result = dispatcher
//!     .call("IF", &[condition.into(), "yes".into(), "no".into()])
//!     .unwrap();
//! assert_eq!(result.to_string(), "{yes,no}");
//! ```

pub mod broadcast;
pub mod dispatch;
pub mod error;
pub mod functions;
pub mod settings;
pub mod value;

pub use broadcast::Shape;
pub use dispatch::Dispatcher;
pub use error::{FormulaError, FormulaResult};
pub use functions::{
    BuiltinFunction, FormulaFunction, FunctionDescriptor, FunctionRegistry, Lifting, ParamSpec,
};
pub use settings::{EvaluationSettings, ExpansionMode};
pub use value::{ArrayValue, ErrorValue, Primitive, ScalarValue, Value};

pub use tabula_core::ErrorKind;
