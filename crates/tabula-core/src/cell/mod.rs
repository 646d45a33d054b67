//! Cell-related types
//!
//! This module contains:
//! - [`CellValue`] - The literal stored in a grid cell
//! - [`ErrorKind`] - Spreadsheet error markers and their literal tokens
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A rectangular block of cells (e.g., "A1:B10")

mod address;
mod value;

pub use address::{CellAddress, CellRange, CellRangeIterator};
pub use value::{CellValue, ErrorKind, SharedString};
