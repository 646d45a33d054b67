//! # tabula-core
//!
//! Core data structures shared by the tabula formula engine and its hosts.
//!
//! This crate provides:
//! - [`CellValue`] - The literal a grid stores for one cell
//! - [`ErrorKind`] - The spreadsheet error taxonomy (`#N/A`, `#VALUE!`, ...)
//! - [`CellAddress`] and [`CellRange`] - Cell addressing and rectangular regions
//! - [`GridView`] - The read contract a grid exposes to the engine
//! - [`CellGrid`] - A sparse in-memory grid implementing [`GridView`]
//!
//! ## Example
//!
//! ```rust
//! use tabula_core::{CellGrid, CellValue, GridView};
//!
//! let mut grid = CellGrid::new();
//! grid.set(0, 0, 42.0);
//! grid.set(1, 0, "text");
//!
//! assert_eq!(grid.get(0, 0), Some(CellValue::Number(42.0)));
//! assert_eq!(grid.get(5, 5), None);
//! ```

pub mod cell;
pub mod error;
pub mod grid;

pub use cell::{CellAddress, CellRange, CellValue, ErrorKind, SharedString};
pub use error::{Error, Result};
pub use grid::{CellGrid, GridView};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;
