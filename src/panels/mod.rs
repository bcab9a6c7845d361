pub mod chart_ui;
pub mod panel_trait;
pub mod table_ui;

pub use chart_ui::{ChartAction, ChartPanel};
pub use panel_trait::{Panel, PanelState};
pub use table_ui::TablePanel;
