//! Grid views and sparse cell storage
//!
//! The formula engine never owns sheet storage. It reads cells through
//! [`GridView`], which hosts implement over whatever storage they use.
//! [`CellGrid`] is a ready-made sparse implementation.

use std::collections::BTreeMap;

use crate::cell::{CellRange, CellValue};

/// Read access to a rectangular grid of cell literals
///
/// `None` means the cell holds nothing. Implementations must be cheap to call
/// repeatedly; the engine reads cells lazily and may read the same cell more
/// than once.
pub trait GridView {
    /// Get the literal stored at `(row, col)`
    fn get(&self, row: u32, col: u16) -> Option<CellValue>;
}

/// Sparse row-based storage for cell literals
///
/// Structure: `BTreeMap<row_index, BTreeMap<col_index, CellValue>>`.
/// Only non-empty cells are stored, so setting [`CellValue::Empty`] removes
/// the entry.
#[derive(Debug, Default, Clone)]
pub struct CellGrid {
    rows: BTreeMap<u32, BTreeMap<u16, CellValue>>,
}

impl CellGrid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell literal
    pub fn set(&mut self, row: u32, col: u16, value: impl Into<CellValue>) {
        let value = value.into();
        if value.is_empty() {
            self.remove(row, col);
        } else {
            self.rows.entry(row).or_default().insert(col, value);
        }
    }

    /// Remove a cell, returning its previous literal
    pub fn remove(&mut self, row: u32, col: u16) -> Option<CellValue> {
        let row_map = self.rows.get_mut(&row)?;
        let removed = row_map.remove(&col);
        if row_map.is_empty() {
            self.rows.remove(&row);
        }
        removed
    }

    /// Get the number of non-empty cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(|r| r.len()).sum()
    }

    /// Check if the grid holds no cells
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The smallest range covering every non-empty cell
    pub fn used_range(&self) -> Option<CellRange> {
        let min_row = *self.rows.keys().next()?;
        let max_row = *self.rows.keys().next_back()?;

        let mut min_col = u16::MAX;
        let mut max_col = 0u16;
        for cols in self.rows.values() {
            if let Some(&col) = cols.keys().next() {
                min_col = min_col.min(col);
            }
            if let Some(&col) = cols.keys().next_back() {
                max_col = max_col.max(col);
            }
        }

        Some(CellRange::from_indices(min_row, min_col, max_row, max_col))
    }

    /// Iterate over all cells in row order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u16, &CellValue)> {
        self.rows
            .iter()
            .flat_map(|(&row, cols)| cols.iter().map(move |(&col, value)| (row, col, value)))
    }
}

impl GridView for CellGrid {
    fn get(&self, row: u32, col: u16) -> Option<CellValue> {
        self.rows.get(&row).and_then(|r| r.get(&col)).cloned()
    }
}

impl<T: GridView + ?Sized> GridView for &T {
    fn get(&self, row: u32, col: u16) -> Option<CellValue> {
        (**self).get(row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_and_get() {
        let mut grid = CellGrid::new();
        grid.set(0, 0, 1.5);
        grid.set(2, 3, "x");
        grid.set(4, 1, ErrorKind::Ref);

        assert_eq!(grid.get(0, 0), Some(CellValue::Number(1.5)));
        assert_eq!(grid.get(2, 3), Some(CellValue::string("x")));
        assert_eq!(grid.get(4, 1), Some(CellValue::Error(ErrorKind::Ref)));
        assert_eq!(grid.get(1, 1), None);
        assert_eq!(grid.cell_count(), 3);
    }

    #[test]
    fn test_setting_empty_removes() {
        let mut grid = CellGrid::new();
        grid.set(1, 1, true);
        grid.set(1, 1, CellValue::Empty);

        assert!(grid.is_empty());
        assert_eq!(grid.remove(1, 1), None);
    }

    #[test]
    fn test_used_range() {
        let mut grid = CellGrid::new();
        assert_eq!(grid.used_range(), None);

        grid.set(3, 2, 1.0);
        grid.set(1, 5, 2.0);
        grid.set(6, 0, 3.0);

        assert_eq!(grid.used_range(), Some(CellRange::from_indices(1, 0, 6, 5)));
    }

    #[test]
    fn test_iter_is_row_major() {
        let mut grid = CellGrid::new();
        grid.set(1, 0, 3.0);
        grid.set(0, 1, 2.0);
        grid.set(0, 0, 1.0);

        let order: Vec<_> = grid.iter().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (1, 0)]);
    }
}
