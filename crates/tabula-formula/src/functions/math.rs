//! Math functions

use tabula_core::ErrorKind;

use super::{BuiltinFunction, CellRule, FunctionDescriptor, Lifting, ParamSpec};
use crate::value::Value;

/// A one-argument numeric function
pub fn unary(name: &'static str, rule: CellRule) -> BuiltinFunction {
    BuiltinFunction::new(
        FunctionDescriptor::new(name, vec![ParamSpec::required("number")], Lifting::Elementwise),
        rule,
    )
}

/// A two-argument numeric function
pub fn binary(name: &'static str, second: &'static str, rule: CellRule) -> BuiltinFunction {
    BuiltinFunction::new(
        FunctionDescriptor::new(
            name,
            vec![ParamSpec::required("number"), ParamSpec::required(second)],
            Lifting::Elementwise,
        ),
        rule,
    )
}

/// ROUND(number, [num_digits])
pub fn round_function() -> BuiltinFunction {
    BuiltinFunction::new(
        FunctionDescriptor::new(
            "ROUND",
            vec![ParamSpec::required("number"), ParamSpec::optional("num_digits", 0.0)],
            Lifting::Elementwise,
        ),
        round,
    )
}

/// ABS(number)
pub fn abs(args: &[Value]) -> Value {
    with_numbers(args, |n| n[0].abs())
}

/// SIGN(number)
pub fn sign(args: &[Value]) -> Value {
    with_numbers(args, |n| {
        if n[0] > 0.0 {
            1.0
        } else if n[0] < 0.0 {
            -1.0
        } else {
            0.0
        }
    })
}

/// INT(number): round down to the nearest integer
pub fn int(args: &[Value]) -> Value {
    with_numbers(args, |n| n[0].floor())
}

/// ROUND(number, num_digits): half away from zero
pub fn round(args: &[Value]) -> Value {
    with_numbers(args, |n| {
        let (number, digits) = (n[0], n[1].trunc() as i32);
        if digits >= 0 {
            let scaled = number * 10f64.powi(digits);
            // Beyond 2^52 there are no fractional digits left to round
            if !scaled.is_finite() || scaled.abs() >= 4_503_599_627_370_496.0 {
                return number;
            }
            scaled.round() / 10f64.powi(digits)
        } else {
            let divisor = 10f64.powi(digits.saturating_neg());
            if !divisor.is_finite() {
                return 0.0;
            }
            (number / divisor).round() * divisor
        }
    })
}

/// MOD(number, divisor): the result takes the divisor's sign
pub fn modulo(args: &[Value]) -> Value {
    let n = match numbers(args) {
        Ok(n) => n,
        Err(e) => return e,
    };
    if n[1] == 0.0 {
        return Value::error(ErrorKind::Div0);
    }
    finite(n[0] - n[1] * (n[0] / n[1]).floor())
}

/// POWER(number, power)
pub fn power(args: &[Value]) -> Value {
    with_numbers(args, |n| n[0].powf(n[1]))
}

/// Coerce every argument and run `f` on the numbers
fn with_numbers(args: &[Value], f: impl FnOnce(&[f64]) -> f64) -> Value {
    match numbers(args) {
        Ok(n) => finite(f(&n)),
        Err(e) => e,
    }
}

/// The first argument that is an error, or that cannot be read as a number,
/// decides the result
fn numbers(args: &[Value]) -> Result<Vec<f64>, Value> {
    args.iter().map(number).collect()
}

fn finite(result: f64) -> Value {
    if result.is_finite() {
        Value::from(result)
    } else {
        Value::error(ErrorKind::Num)
    }
}

fn number(value: &Value) -> Result<f64, Value> {
    match value {
        Value::Scalar(s) => s.to_number().map_err(Value::error),
        Value::Error(_) => Err(value.clone()),
        Value::Array(a) => number(&a.first_cell()),
    }
}
