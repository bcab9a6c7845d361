//! Data table generated from a dataset.
//!
//! Layout follows the usual rendering of a chart's data table: row 0 holds
//! the column headers (`"Category"` then the series names), column 0 holds
//! the category labels, and the remaining cells hold the formatted values.
//! Every data cell carries a selected marker.

use crate::bridge::TableView;
use crate::data::coords::{to_data_index, to_table_index, CellRole, TableCell};
use crate::data::dataset::DataSet;
use crate::error::LookupFailure;

/// Text of the top-left header cell.
pub const CATEGORY_HEADER: &str = "Category";

#[derive(Debug, Clone, PartialEq)]
struct DataCell {
    text: String,
    selected: bool,
}

/// Generated table with per-cell selected markers.
#[derive(Debug, Clone, Default)]
pub struct TableModel {
    headers: Vec<String>,
    row_labels: Vec<String>,
    cells: Vec<Vec<DataCell>>,
    generation: u64,
}

impl TableModel {
    pub fn from_dataset(ds: &DataSet) -> Self {
        let mut t = Self::default();
        t.fill(ds);
        t
    }

    /// Rebuild every cell from `ds`. All markers are cleared and the
    /// generation is bumped, so any mapping cached from the old layout is stale.
    pub fn regenerate(&mut self, ds: &DataSet) {
        self.fill(ds);
        self.generation += 1;
        log::debug!(
            "table regenerated: {} rows x {} columns (generation {})",
            self.row_count(),
            self.column_count(),
            self.generation
        );
    }

    fn fill(&mut self, ds: &DataSet) {
        self.headers = std::iter::once(CATEGORY_HEADER.to_string())
            .chain(ds.series.iter().map(|s| s.name.clone()))
            .collect();
        self.row_labels = ds.categories.clone();
        self.cells = (0..ds.categories.len())
            .map(|row| {
                ds.series
                    .iter()
                    .map(|s| DataCell {
                        text: s.data.get(row).map(|v| format_value(*v)).unwrap_or_default(),
                        selected: false,
                    })
                    .collect()
            })
            .collect();
    }

    /// Number of body rows (categories).
    pub fn body_rows(&self) -> usize {
        self.row_labels.len()
    }

    pub fn header_text(&self, column: usize) -> Option<&str> {
        self.headers.get(column).map(String::as_str)
    }

    /// Displayed text of any table position, headers included.
    pub fn cell_text(&self, cell: TableCell) -> Option<&str> {
        match cell.role() {
            CellRole::Corner | CellRole::ColumnHeader => self.header_text(cell.column),
            CellRole::RowHeader => self
                .row_labels
                .get(to_data_index(cell.row)?)
                .map(String::as_str),
            CellRole::Data => self.data_cell(cell).map(|c| c.text.as_str()),
        }
    }

    /// All data cells whose marker is set, row-major.
    pub fn selected_cells(&self) -> Vec<TableCell> {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(r, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(_, c)| c.selected)
                    .map(move |(c, _)| TableCell::new(to_table_index(r), to_table_index(c)))
            })
            .collect()
    }

    fn data_cell(&self, cell: TableCell) -> Option<&DataCell> {
        let (r, c) = (to_data_index(cell.row)?, to_data_index(cell.column)?);
        self.cells.get(r)?.get(c)
    }

    fn data_cell_mut(&mut self, cell: TableCell) -> Result<&mut DataCell, LookupFailure> {
        let TableCell { row, column } = cell;
        let (r, c) = match (to_data_index(row), to_data_index(column)) {
            (Some(r), Some(c)) => (r, c),
            _ => return Err(LookupFailure::HeaderCell { row, column }),
        };
        self.cells
            .get_mut(r)
            .and_then(|cells| cells.get_mut(c))
            .ok_or(LookupFailure::OutOfBounds { row, column })
    }
}

impl TableView for TableModel {
    fn generation(&self) -> u64 {
        self.generation
    }

    fn category_labels(&self) -> Vec<String> {
        self.row_labels.clone()
    }

    fn series_labels(&self) -> Vec<String> {
        self.headers.iter().skip(to_table_index(0)).cloned().collect()
    }

    fn row_count(&self) -> usize {
        to_table_index(self.row_labels.len())
    }

    fn column_count(&self) -> usize {
        self.headers.len()
    }

    fn is_selected(&self, cell: TableCell) -> Option<bool> {
        self.data_cell(cell).map(|c| c.selected)
    }

    fn set_selected(&mut self, cell: TableCell, selected: bool) -> Result<(), LookupFailure> {
        self.data_cell_mut(cell)?.selected = selected;
        Ok(())
    }
}

/// Integers without decimals, everything else with up to three.
fn format_value(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        let s = format!("{:.3}", v);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
