use eframe::egui::{Color32, Label, RichText, Sense, Ui};
use egui_table::{HeaderRow as EgHeaderRow, Table, TableDelegate};

use super::panel_trait::{Panel, PanelState};
use crate::bridge::TableView;
use crate::data::coords::{to_table_index, TableCell};
use crate::data::table::TableModel;

// Feature-gated debug logging for table clicks and layout.
// Enable prints with: cargo run --features table_debug
// When the feature is disabled, logs are compiled out.
#[cfg(feature = "table_debug")]
#[allow(unused_macros)]
macro_rules! table_debug { ($($arg:tt)*) => { eprintln!($($arg)*); } }

#[cfg(not(feature = "table_debug"))]
#[allow(unused_macros)]
macro_rules! table_debug {
    ($($arg:tt)*) => {{ /* no-op */ }};
}

/// Data table with a sticky category column.
pub struct TablePanel {
    pub state: PanelState,
    pub row_height: f32,
    pub category_width: f32,
    pub value_width: f32,
}

impl Default for TablePanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("Data table", egui_phosphor::regular::TABLE),
            row_height: 22.0,
            category_width: 120.0,
            value_width: 130.0,
        }
    }
}

impl Panel for TablePanel {
    fn state(&self) -> &PanelState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }
}

struct CellsDelegate<'a> {
    table: &'a TableModel,
    highlight: Color32,
    row_height: f32,
    clicked: Option<TableCell>,
}

impl TableDelegate for CellsDelegate<'_> {
    fn header_cell_ui(&mut self, ui: &mut Ui, cell: &egui_table::HeaderCellInfo) {
        let col = cell.col_range.start;
        let text = self.table.header_text(col).unwrap_or_default();
        ui.add_space(4.0);
        if col == 0 {
            ui.strong(text);
            return;
        }
        let resp = ui
            .add(Label::new(RichText::new(text).strong()).sense(Sense::click()))
            .on_hover_text("Toggle every point of this series");
        if resp.clicked() {
            self.clicked = Some(TableCell::column_header(col));
        }
    }

    fn cell_ui(&mut self, ui: &mut Ui, cell: &egui_table::CellInfo) {
        let tc = TableCell::new(to_table_index(cell.row_nr as usize), cell.col_nr);
        if self.table.is_selected(tc) == Some(true) {
            ui.painter().rect_filled(ui.max_rect(), 0.0, self.highlight);
        }
        ui.add_space(4.0);
        let text = self.table.cell_text(tc).unwrap_or_default();
        let label = if cell.col_nr == 0 {
            Label::new(RichText::new(text).strong())
        } else {
            Label::new(text)
        };
        let hint = if cell.col_nr == 0 {
            "Toggle every point of this category"
        } else {
            "Toggle this point"
        };
        if ui.add(label.sense(Sense::click())).on_hover_text(hint).clicked() {
            self.clicked = Some(tc);
        }
    }

    fn default_row_height(&self) -> f32 {
        self.row_height
    }
}

impl TablePanel {
    /// Draw the table. Returns the table position clicked this frame, if any.
    pub fn show(&mut self, ui: &mut Ui, table: &TableModel, highlight: Color32) -> Option<TableCell> {
        ui.label(RichText::new(self.label()).strong());
        let mut delegate = CellsDelegate {
            table,
            highlight,
            row_height: self.row_height,
            clicked: None,
        };
        let cols: Vec<egui_table::Column> = (0..table.column_count())
            .map(|c| {
                let w = if c == 0 { self.category_width } else { self.value_width };
                egui_table::Column::new(w).resizable(true)
            })
            .collect();
        table_debug!(
            "table: {} body rows, {} columns, avail_w={}",
            table.body_rows(),
            cols.len(),
            ui.available_width()
        );
        Table::new()
            .id_salt("linkplot_table")
            .num_rows(table.body_rows() as u64)
            .columns(cols)
            .num_sticky_cols(1)
            .headers(vec![EgHeaderRow::new(self.row_height + 2.0)])
            .show(ui, &mut delegate);
        table_debug!("table click: {:?}", delegate.clicked);
        delegate.clicked
    }
}
