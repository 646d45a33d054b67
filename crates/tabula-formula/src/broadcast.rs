//! Broadcasting: aligning operands of different shapes onto one grid
//!
//! The target grid is the per-dimension maximum of every operand's extent
//! (scalars count as 1×1), so broadcasting only ever grows an operand:
//!
//! - a scalar or error is replicated into every cell;
//! - an array already of the target shape is reused as-is;
//! - a 1×1 array's cell is replicated into every cell;
//! - any other array keeps its own cells, and positions outside it take the
//!   caller's fill value (see [`ExpansionMode`] for vector replication).
//!
//! Broadcast grids are materialized eagerly.

use std::fmt;

use crate::settings::ExpansionMode;
use crate::value::{ArrayValue, Value};

/// Row and column extent of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    /// The extent of a scalar
    pub const SCALAR: Shape = Shape { rows: 1, cols: 1 };

    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Number of cells, or `None` on overflow
    pub fn checked_cell_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_single_cell(&self) -> bool {
        self.rows == 1 && self.cols == 1
    }

    /// Whether `self` fits inside `other` in both dimensions
    pub fn fits_within(&self, other: Shape) -> bool {
        self.rows <= other.rows && self.cols <= other.cols
    }

    /// Component-wise maximum
    pub fn union(self, other: Shape) -> Shape {
        Shape::new(self.rows.max(other.rows), self.cols.max(other.cols))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// The common grid every operand is broadcast to
pub fn target_shape<'a>(values: impl IntoIterator<Item = &'a Value>) -> Shape {
    values
        .into_iter()
        .map(Value::shape)
        .fold(Shape::SCALAR, Shape::union)
}

/// Stretch `value` to `target`
///
/// `fill` occupies positions that lie outside a smaller array operand.
///
/// # Panics
///
/// Panics if `value` is an array larger than `target` in either dimension;
/// the target is always the maximum of the operands, so that is a caller bug.
pub fn expand(value: &Value, target: Shape, fill: &Value, mode: ExpansionMode) -> ArrayValue {
    let array = match value {
        Value::Array(array) => array,
        scalar_or_error => return ArrayValue::filled(target, scalar_or_error.clone()),
    };

    let shape = array.shape();
    assert!(
        shape.fits_within(target),
        "cannot broadcast a {} array down to {}",
        shape,
        target
    );

    if shape == target {
        return array.clone();
    }
    if shape.is_single_cell() {
        return ArrayValue::filled(target, array.first_cell());
    }

    let repeat_rows = mode == ExpansionMode::ReplicateVectors && shape.rows == 1;
    let repeat_cols = mode == ExpansionMode::ReplicateVectors && shape.cols == 1;

    ArrayValue::from_fn(target, |r, c| {
        let r = if repeat_rows { 0 } else { r };
        let c = if repeat_cols { 0 } else { c };
        array.try_get(r, c).unwrap_or_else(|| fill.clone())
    })
}

/// Stretch every operand to their common target shape
pub fn expand_all(values: &[Value], fill: &Value, mode: ExpansionMode) -> (Shape, Vec<ArrayValue>) {
    let target = target_shape(values);
    let expanded = values
        .iter()
        .map(|value| expand(value, target, fill, mode))
        .collect();
    (target, expanded)
}
