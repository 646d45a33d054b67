//! Tests for reading ranges of a grid through `GridView`

use pretty_assertions::assert_eq;
use tabula_core::{CellAddress, CellGrid, CellRange, CellValue, ErrorKind, GridView};

fn sample_grid() -> CellGrid {
    let mut grid = CellGrid::new();
    grid.set(0, 0, "Name");
    grid.set(0, 1, "Score");
    grid.set(1, 0, "ada");
    grid.set(1, 1, 91.5);
    grid.set(2, 0, "bob");
    grid.set(2, 1, ErrorKind::Div0);
    grid
}

/// Test walking a parsed range over the grid
#[test]
fn test_read_range() {
    let grid = sample_grid();
    let range: CellRange = "A2:B3".parse().unwrap();

    let values: Vec<Option<CellValue>> = range
        .cells()
        .map(|addr| grid.get(addr.row, addr.col))
        .collect();

    assert_eq!(
        values,
        vec![
            Some(CellValue::from("ada")),
            Some(CellValue::Number(91.5)),
            Some(CellValue::from("bob")),
            Some(CellValue::Error(ErrorKind::Div0)),
        ]
    );
}

/// Test that unset cells read as absent
#[test]
fn test_empty_cells_are_absent() {
    let mut grid = sample_grid();
    assert_eq!(grid.get(10, 10), None);

    grid.set(1, 1, CellValue::Empty);
    assert_eq!(grid.get(1, 1), None);
    assert_eq!(grid.cell_count(), 5);
}

/// Test the used range after edits
#[test]
fn test_used_range_tracks_edits() {
    let mut grid = sample_grid();
    assert_eq!(grid.used_range().map(|r| r.to_string()), Some("A1:B3".to_string()));

    grid.set(4, 3, true);
    assert_eq!(grid.used_range().map(|r| r.to_string()), Some("A1:D5".to_string()));

    let mut empty = CellGrid::new();
    assert_eq!(empty.used_range(), None);
    empty.set(0, 0, 1.0);
    empty.remove(0, 0);
    assert!(empty.is_empty());
}

/// Test that a borrowed grid is a view too
#[test]
fn test_reference_is_a_view() {
    fn first_cell(view: impl GridView, addr: CellAddress) -> Option<CellValue> {
        view.get(addr.row, addr.col)
    }

    let grid = sample_grid();
    let addr: CellAddress = "$B$2".parse().unwrap();
    assert_eq!(first_cell(&grid, addr), Some(CellValue::Number(91.5)));
}

/// Test that every error literal parses back to its kind
#[test]
fn test_error_literals_round_trip() {
    for kind in ErrorKind::ALL {
        let token = kind.to_string();
        assert_eq!(token.parse::<ErrorKind>().unwrap(), kind);
        assert_eq!(ErrorKind::from_code(kind.code()), Some(kind));
    }
    assert!("#WHAT?".parse::<ErrorKind>().is_err());
}

#[cfg(feature = "serde")]
#[test]
fn test_error_kind_serde() {
    let json = serde_json::to_string(&ErrorKind::Spill).unwrap();
    assert_eq!(json, "\"Spill\"");
    let kind: ErrorKind = serde_json::from_str(&json).unwrap();
    assert_eq!(kind, ErrorKind::Spill);
}
