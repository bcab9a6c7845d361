//! Coordinates on both sides of the bridge.
//!
//! A chart point is addressed by `(series, index)`, both 0-based. A table
//! cell is addressed by `(row, column)` in table coordinates, where row 0 is
//! the header row and column 0 holds the category labels. The two grids
//! differ by a constant header offset; [`to_table_index`] and
//! [`to_data_index`] are the only places that offset is applied.

use crate::error::LookupFailure;

/// Number of header rows above the data rows, and header columns left of the data columns.
pub const HEADER_OFFSET: usize = 1;

/// Data-region index (series or point) to table index (column or row).
#[inline]
pub const fn to_table_index(data_index: usize) -> usize {
    data_index + HEADER_OFFSET
}

/// Table index (column or row) to data-region index. `None` for header positions.
#[inline]
pub const fn to_data_index(table_index: usize) -> Option<usize> {
    table_index.checked_sub(HEADER_OFFSET)
}

/// One point of one chart series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointRef {
    pub series: usize,
    pub index: usize,
}

impl PointRef {
    pub const fn new(series: usize, index: usize) -> Self {
        Self { series, index }
    }

    /// The table cell showing this point.
    pub const fn cell(self) -> TableCell {
        TableCell {
            row: to_table_index(self.index),
            column: to_table_index(self.series),
        }
    }
}

/// Where a table position sits relative to the header row and category column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRole {
    /// Top-left corner (row 0, column 0).
    Corner,
    /// A series name in the header row.
    ColumnHeader,
    /// A category label in the first column.
    RowHeader,
    /// A value.
    Data,
}

/// One table cell in table coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableCell {
    pub row: usize,
    pub column: usize,
}

impl TableCell {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Header cell of the given table column.
    pub const fn column_header(column: usize) -> Self {
        Self { row: 0, column }
    }

    /// Category label cell of the given table row.
    pub const fn row_header(row: usize) -> Self {
        Self { row, column: 0 }
    }

    pub fn role(self) -> CellRole {
        match (to_data_index(self.row), to_data_index(self.column)) {
            (None, None) => CellRole::Corner,
            (None, Some(_)) => CellRole::ColumnHeader,
            (Some(_), None) => CellRole::RowHeader,
            (Some(_), Some(_)) => CellRole::Data,
        }
    }

    /// The chart point shown in this cell. Header positions are rejected.
    pub fn point(self) -> Result<PointRef, LookupFailure> {
        match (to_data_index(self.column), to_data_index(self.row)) {
            (Some(series), Some(index)) => Ok(PointRef { series, index }),
            _ => Err(LookupFailure::HeaderCell {
                row: self.row,
                column: self.column,
            }),
        }
    }
}

impl std::fmt::Display for TableCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_and_cell_are_inverse() {
        let p = PointRef::new(2, 5);
        let c = p.cell();
        assert_eq!(c, TableCell::new(6, 3));
        assert_eq!(c.point().unwrap(), p);
    }

    #[test]
    fn header_positions_are_not_points() {
        assert!(TableCell::new(0, 0).point().is_err());
        assert!(TableCell::column_header(2).point().is_err());
        assert!(TableCell::row_header(4).point().is_err());
        assert_eq!(
            TableCell::row_header(4).point(),
            Err(LookupFailure::HeaderCell { row: 4, column: 0 })
        );
    }

    #[test]
    fn roles() {
        assert_eq!(TableCell::new(0, 0).role(), CellRole::Corner);
        assert_eq!(TableCell::new(0, 1).role(), CellRole::ColumnHeader);
        assert_eq!(TableCell::new(3, 0).role(), CellRole::RowHeader);
        assert_eq!(TableCell::new(1, 1).role(), CellRole::Data);
    }
}
