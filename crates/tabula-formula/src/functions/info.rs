//! Information functions

use tabula_core::ErrorKind;

use super::{BuiltinFunction, CellRule, FunctionDescriptor, Lifting, ParamSpec};
use crate::value::{ScalarValue, Value};

/// An IS* predicate taking one value
///
/// The argument is lazy: an error is something to report on, not to
/// propagate.
pub fn is_function(name: &'static str, rule: CellRule) -> BuiltinFunction {
    BuiltinFunction::new(
        FunctionDescriptor::new(name, vec![ParamSpec::required("value").lazy()], Lifting::Elementwise),
        rule,
    )
}

/// ISBLANK(value)
pub fn is_blank(args: &[Value]) -> Value {
    Value::from(args[0].is_null())
}

/// ISERROR(value)
pub fn is_error(args: &[Value]) -> Value {
    Value::from(args[0].is_error())
}

/// ISERR(value): any error except `#N/A`
pub fn is_err(args: &[Value]) -> Value {
    Value::from(matches!(args[0].error_kind(), Some(kind) if kind != ErrorKind::Na))
}

/// ISNA(value)
pub fn is_na(args: &[Value]) -> Value {
    Value::from(args[0].error_kind() == Some(ErrorKind::Na))
}

/// ISNUMBER(value)
pub fn is_number(args: &[Value]) -> Value {
    Value::from(matches!(&args[0], Value::Scalar(s) if s.is_number()))
}

/// ISTEXT(value)
pub fn is_text(args: &[Value]) -> Value {
    Value::from(matches!(&args[0], Value::Scalar(ScalarValue::String(_))))
}

/// ISLOGICAL(value)
pub fn is_logical(args: &[Value]) -> Value {
    Value::from(args[0].is_boolean())
}

/// NA()
pub fn na_function() -> BuiltinFunction {
    BuiltinFunction::new(FunctionDescriptor::new("NA", vec![], Lifting::Elementwise), |_| {
        Value::na()
    })
}
