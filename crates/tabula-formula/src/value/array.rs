//! Immutable 2-D grids of values

use std::fmt;
use std::sync::Arc;

use tabula_core::{CellAddress, CellRange, GridView};

use crate::broadcast::Shape;
use crate::error::{FormulaError, FormulaResult};

use super::Value;

/// A dense, immutable, rectangular grid of values
///
/// Every array has at least one row and one column, and no cell is itself an
/// array. Clones share their cells; transformations such as [`map`] always
/// build a new grid.
///
/// [`map`]: ArrayValue::map
#[derive(Clone)]
pub struct ArrayValue {
    rows: usize,
    cols: usize,
    cells: Cells,
}

#[derive(Clone)]
enum Cells {
    /// Row-major owned cells
    Dense(Arc<[Value]>),
    /// A window onto sheet storage, read on access
    Grid {
        source: Arc<dyn GridView + Send + Sync>,
        origin: CellAddress,
    },
}

impl ArrayValue {
    /// Build an array from row vectors
    ///
    /// Rejects empty input, ragged rows and nested arrays.
    pub fn from_rows(rows: Vec<Vec<Value>>) -> FormulaResult<Self> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if rows.is_empty() || cols == 0 {
            return Err(FormulaError::InvalidShape(
                "an array needs at least one row and one column".into(),
            ));
        }

        let row_count = rows.len();
        let mut cells = Vec::with_capacity(row_count * cols);
        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(FormulaError::InvalidShape(format!(
                    "row {} has {} columns, expected {}",
                    r,
                    row.len(),
                    cols
                )));
            }
            for (c, cell) in row.into_iter().enumerate() {
                if cell.is_array() {
                    return Err(FormulaError::NestedArray { row: r, col: c });
                }
                cells.push(cell);
            }
        }

        Ok(Self {
            rows: row_count,
            cols,
            cells: Cells::Dense(cells.into()),
        })
    }

    /// Build an array by evaluating `f` for every `(row, col)` in row-major
    /// order
    ///
    /// An array returned by `f` is collapsed to its first cell.
    ///
    /// # Panics
    ///
    /// Panics if `shape` has zero rows or columns.
    pub fn from_fn(shape: Shape, mut f: impl FnMut(usize, usize) -> Value) -> Self {
        assert!(
            shape.rows > 0 && shape.cols > 0,
            "array shape must be at least 1x1, got {}",
            shape
        );

        let mut cells = Vec::with_capacity(shape.cell_count());
        for r in 0..shape.rows {
            for c in 0..shape.cols {
                cells.push(f(r, c).into_cell());
            }
        }

        Self {
            rows: shape.rows,
            cols: shape.cols,
            cells: Cells::Dense(cells.into()),
        }
    }

    /// An array with every cell set to `value`
    pub fn filled(shape: Shape, value: Value) -> Self {
        let cell = value.into_cell();
        Self::from_fn(shape, |_, _| cell.clone())
    }

    /// A view over a region of sheet storage
    ///
    /// Cells are read from `source` on access; nothing is copied until the
    /// view is transformed.
    pub fn from_grid(source: Arc<dyn GridView + Send + Sync>, range: CellRange) -> Self {
        Self {
            rows: range.row_count() as usize,
            cols: range.col_count() as usize,
            cells: Cells::Grid {
                source,
                origin: range.start,
            },
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> Shape {
        Shape::new(self.rows, self.cols)
    }

    pub fn is_single_cell(&self) -> bool {
        self.rows == 1 && self.cols == 1
    }

    /// Get the cell at `(row, col)`
    ///
    /// # Panics
    ///
    /// Panics if the position lies outside the array. Out-of-range access is
    /// a bug in the caller, not a spreadsheet error.
    pub fn get(&self, row: usize, col: usize) -> Value {
        match self.try_get(row, col) {
            Some(value) => value,
            None => panic!(
                "cell ({}, {}) is outside a {}x{} array",
                row, col, self.rows, self.cols
            ),
        }
    }

    /// Get the cell at `(row, col)`, or `None` when out of range
    pub fn try_get(&self, row: usize, col: usize) -> Option<Value> {
        if row >= self.rows || col >= self.cols {
            return None;
        }

        Some(match &self.cells {
            Cells::Dense(cells) => cells[row * self.cols + col].clone(),
            Cells::Grid { source, origin } => {
                Value::from(source.get(origin.row + row as u32, origin.col + col as u16))
            }
        })
    }

    /// The top-left cell
    pub fn first_cell(&self) -> Value {
        self.get(0, 0)
    }

    /// Transform every cell into a new array of the same shape
    pub fn map(&self, mut f: impl FnMut(&Value, usize, usize) -> Value) -> ArrayValue {
        ArrayValue::from_fn(self.shape(), |r, c| f(&self.get(r, c), r, c))
    }

    /// Iterate over `(row, col, cell)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Value)> + '_ {
        (0..self.rows).flat_map(move |r| (0..self.cols).map(move |c| (r, c, self.get(r, c))))
    }

    /// Copy the cells out as row vectors
    pub fn to_rows(&self) -> Vec<Vec<Value>> {
        (0..self.rows)
            .map(|r| (0..self.cols).map(|c| self.get(r, c)).collect())
            .collect()
    }

    /// Whether two arrays are backed by the same cells
    pub fn shares_cells(&self, other: &ArrayValue) -> bool {
        match (&self.cells, &other.cells) {
            (Cells::Dense(a), Cells::Dense(b)) => Arc::ptr_eq(a, b),
            (
                Cells::Grid { source: a, origin: oa },
                Cells::Grid { source: b, origin: ob },
            ) => Arc::ptr_eq(a, b) && oa == ob && self.shape() == other.shape(),
            _ => false,
        }
    }
}

impl PartialEq for ArrayValue {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape()
            && self
                .iter()
                .all(|(r, c, cell)| cell == other.get(r, c))
    }
}

impl fmt::Debug for ArrayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayValue")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("cells", &self.to_rows())
            .finish()
    }
}

impl fmt::Display for ArrayValue {
    /// Array-literal notation: `{1,2;3,4}`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for r in 0..self.rows {
            if r > 0 {
                f.write_str(";")?;
            }
            for c in 0..self.cols {
                if c > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{}", self.get(r, c))?;
            }
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ScalarValue;
    use pretty_assertions::assert_eq;
    use tabula_core::{CellGrid, ErrorKind};

    fn grid_2x2() -> ArrayValue {
        ArrayValue::from_rows(vec![
            vec![1.0.into(), 2.0.into()],
            vec![3.0.into(), 4.0.into()],
        ])
        .unwrap()
    }

    #[test]
    fn test_from_rows_shape() {
        let array = grid_2x2();
        assert_eq!(array.shape(), Shape::new(2, 2));
        assert_eq!(array.get(1, 0), Value::from(3.0));
        assert_eq!(array.first_cell(), Value::from(1.0));
        assert!(!array.is_single_cell());
    }

    #[test]
    fn test_from_rows_rejects_bad_input() {
        assert!(matches!(
            ArrayValue::from_rows(vec![]),
            Err(FormulaError::InvalidShape(_))
        ));
        assert!(matches!(
            ArrayValue::from_rows(vec![vec![]]),
            Err(FormulaError::InvalidShape(_))
        ));
        assert!(matches!(
            ArrayValue::from_rows(vec![vec![1.0.into()], vec![1.0.into(), 2.0.into()]]),
            Err(FormulaError::InvalidShape(_))
        ));
        assert_eq!(
            ArrayValue::from_rows(vec![vec![1.0.into(), grid_2x2().into()]]).err(),
            Some(FormulaError::NestedArray { row: 0, col: 1 })
        );
    }

    #[test]
    fn test_try_get_bounds() {
        let array = grid_2x2();
        assert_eq!(array.try_get(1, 1), Some(Value::from(4.0)));
        assert_eq!(array.try_get(2, 0), None);
        assert_eq!(array.try_get(0, 2), None);
    }

    #[test]
    #[should_panic(expected = "outside a 2x2 array")]
    fn test_get_out_of_bounds_panics() {
        grid_2x2().get(0, 2);
    }

    #[test]
    #[should_panic(expected = "at least 1x1")]
    fn test_from_fn_rejects_empty_shape() {
        ArrayValue::from_fn(Shape::new(0, 3), |_, _| Value::null());
    }

    #[test]
    fn test_map_builds_new_array() {
        let array = grid_2x2();
        let mapped = array.map(|cell, r, c| match cell {
            Value::Scalar(ScalarValue::Number(n)) => Value::from(n * 10.0 + (r * 2 + c) as f64),
            other => other.clone(),
        });

        assert_eq!(mapped.to_string(), "{10,21;32,43}");
        assert_eq!(array.to_string(), "{1,2;3,4}");
        assert!(!mapped.shares_cells(&array));
    }

    #[test]
    fn test_from_fn_collapses_nested_arrays() {
        let inner = grid_2x2();
        let array = ArrayValue::from_fn(Shape::new(1, 2), |_, _| inner.clone().into());
        assert_eq!(array.to_string(), "{1,1}");
    }

    #[test]
    fn test_clone_shares_cells() {
        let array = grid_2x2();
        assert!(array.clone().shares_cells(&array));
    }

    #[test]
    fn test_grid_view_reads_through() {
        let mut grid = CellGrid::new();
        grid.set(1, 1, 5.0);
        grid.set(1, 2, "x");
        grid.set(2, 2, ErrorKind::Div0);
        let source: Arc<dyn GridView + Send + Sync> = Arc::new(grid);

        let view = ArrayValue::from_grid(source.clone(), CellRange::from_indices(1, 1, 2, 2));
        assert_eq!(view.shape(), Shape::new(2, 2));
        assert_eq!(view.get(0, 0), Value::from(5.0));
        assert_eq!(view.get(0, 1), Value::from("x"));
        assert!(view.get(1, 0).is_null());
        assert_eq!(view.get(1, 1), Value::from(ErrorKind::Div0));

        let same = ArrayValue::from_grid(source, CellRange::from_indices(1, 1, 2, 2));
        assert!(view.shares_cells(&same));
        assert_eq!(view, same);
    }
}
