//! Logical functions

use tabula_core::ErrorKind;

use super::{BuiltinFunction, FunctionDescriptor, Lifting, ParamSpec};
use crate::value::{ScalarValue, Value};

/// IF(logical_test, value_if_true, [value_if_false])
///
/// Only the condition decides between the scalar and the array path. Errors
/// in `value_if_false` are left alone until that branch is selected.
pub fn if_function() -> BuiltinFunction {
    BuiltinFunction::new(
        FunctionDescriptor::new(
            "IF",
            vec![
                ParamSpec::required("logical_test"),
                ParamSpec::required("value_if_true"),
                ParamSpec::optional("value_if_false", false).lazy(),
            ],
            Lifting::DrivenBy(0),
        ),
        if_cell,
    )
    .with_scalar_rule(if_scalar)
}

/// Scalar condition: hand back the selected branch as it is
fn if_scalar(args: &[Value]) -> Value {
    let condition = &args[0];
    match condition {
        Value::Error(_) => condition.clone(),
        Value::Scalar(ScalarValue::Null) => Value::na(),
        Value::Scalar(s) if s.is_truthy() => args[1].clone(),
        _ => args[2].clone(),
    }
}

/// One aligned cell of an array condition
fn if_cell(args: &[Value]) -> Value {
    let condition = &args[0];
    let selected = match condition {
        Value::Error(_) => return condition.clone(),
        Value::Scalar(ScalarValue::Null) => return Value::na(),
        Value::Scalar(s) if s.is_truthy() => &args[1],
        _ => &args[2],
    };

    // An empty selected branch is a missing operand, not an empty result
    if selected.is_null() {
        Value::na()
    } else {
        selected.clone()
    }
}

/// NOT(logical)
pub fn not_function() -> BuiltinFunction {
    BuiltinFunction::new(
        FunctionDescriptor::new("NOT", vec![ParamSpec::required("logical")], Lifting::Elementwise),
        fn_not,
    )
}

fn fn_not(args: &[Value]) -> Value {
    match to_logical(&args[0]) {
        Ok(b) => Value::from(!b),
        Err(e) => e,
    }
}

/// IFERROR(value, value_if_error)
pub fn iferror_function() -> BuiltinFunction {
    BuiltinFunction::new(
        FunctionDescriptor::new(
            "IFERROR",
            vec![
                ParamSpec::required("value").lazy(),
                ParamSpec::required("value_if_error").lazy(),
            ],
            Lifting::Elementwise,
        ),
        fn_iferror,
    )
}

fn fn_iferror(args: &[Value]) -> Value {
    if args[0].is_error() {
        empty_as_zero(&args[1])
    } else {
        empty_as_zero(&args[0])
    }
}

/// IFNA(value, value_if_na)
pub fn ifna_function() -> BuiltinFunction {
    BuiltinFunction::new(
        FunctionDescriptor::new(
            "IFNA",
            vec![
                ParamSpec::required("value").lazy(),
                ParamSpec::required("value_if_na").lazy(),
            ],
            Lifting::Elementwise,
        ),
        fn_ifna,
    )
}

fn fn_ifna(args: &[Value]) -> Value {
    if args[0].error_kind() == Some(ErrorKind::Na) {
        empty_as_zero(&args[1])
    } else {
        empty_as_zero(&args[0])
    }
}

/// TRUE()
pub fn true_function() -> BuiltinFunction {
    BuiltinFunction::new(
        FunctionDescriptor::new("TRUE", vec![], Lifting::Elementwise),
        |_| Value::from(true),
    )
}

/// FALSE()
pub fn false_function() -> BuiltinFunction {
    BuiltinFunction::new(
        FunctionDescriptor::new("FALSE", vec![], Lifting::Elementwise),
        |_| Value::from(false),
    )
}

/// Read a cell as a boolean
///
/// Text is accepted only when it spells `TRUE` or `FALSE`.
fn to_logical(value: &Value) -> Result<bool, Value> {
    match value {
        Value::Error(_) => Err(value.clone()),
        Value::Array(a) => to_logical(&a.first_cell()),
        Value::Scalar(ScalarValue::String(s)) => {
            let text = s.as_str().trim();
            if text.eq_ignore_ascii_case("TRUE") {
                Ok(true)
            } else if text.eq_ignore_ascii_case("FALSE") {
                Ok(false)
            } else {
                Err(Value::error(ErrorKind::Value))
            }
        }
        Value::Scalar(s) => Ok(s.is_truthy()),
    }
}

fn empty_as_zero(value: &Value) -> Value {
    if value.is_null() {
        Value::from(0.0)
    } else {
        value.clone()
    }
}
