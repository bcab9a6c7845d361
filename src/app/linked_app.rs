//! [`LinkedApp`]: a chart and a data table over one dataset, kept in sync.
//!
//! The app owns the chart model, the table model and the bridge. User input
//! from the panels is turned into bridge calls here; the eframe glue lives in
//! [`layout`](super::layout).

use std::path::Path;

use crate::bridge::{ChartWidget, SelectionSyncBridge, SyncOutcome, TableView};
use crate::config::SyncConfig;
use crate::controllers::{SelectedPoint, SelectionController, SelectionRequest};
use crate::data::chart::ChartModel;
use crate::data::coords::{PointRef, TableCell};
use crate::data::dataset::DataSet;
use crate::data::table::TableModel;
use crate::error::Result;
use crate::events::{DatasetMeta, EventController, EventKind, SyncEvent};
use crate::panels::{ChartAction, ChartPanel, TablePanel};

/// Chart plus data table with synchronized selection.
pub struct LinkedApp {
    pub(crate) dataset: DataSet,
    pub(crate) chart: ChartModel,
    pub(crate) table: TableModel,
    pub(crate) bridge: SelectionSyncBridge,

    pub(crate) chart_panel: ChartPanel,
    pub(crate) table_panel: TablePanel,
    pub(crate) config: SyncConfig,

    // ── Optional external controllers ────────────────────────────────────────
    pub(crate) selection_ctrl: Option<SelectionController>,
    pub(crate) event_ctrl: Option<EventController>,

    /// Last error or notice shown in the status bar.
    pub(crate) status: Option<String>,
}

impl LinkedApp {
    pub fn new(dataset: DataSet, config: SyncConfig) -> Self {
        let selection_ctrl = config.controllers.selection.clone();
        let event_ctrl = config.controllers.event.clone();
        let bridge = match &event_ctrl {
            Some(ev) => SelectionSyncBridge::with_events(ev.clone()),
            None => SelectionSyncBridge::new(),
        };
        let mut table_panel = TablePanel::default();
        table_panel.state.visible = config.features.table;
        Self {
            chart: ChartModel::from_dataset(&dataset),
            table: TableModel::from_dataset(&dataset),
            chart_panel: ChartPanel::new(dataset.series.len()),
            table_panel,
            dataset,
            bridge,
            config,
            selection_ctrl,
            event_ctrl,
            status: None,
        }
    }

    pub fn dataset(&self) -> &DataSet {
        &self.dataset
    }

    pub fn chart(&self) -> &ChartModel {
        &self.chart
    }

    pub fn table(&self) -> &TableModel {
        &self.table
    }

    pub fn bridge(&self) -> &SelectionSyncBridge {
        &self.bridge
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Headline text: the configured one, else the dataset title.
    pub fn headline(&self) -> Option<&str> {
        self.config
            .headline
            .as_deref()
            .or(self.dataset.title.as_deref())
    }

    /// Replace the dataset. Chart and table are regenerated and the bridge's
    /// cached mapping is invalidated.
    pub fn load_dataset(&mut self, dataset: DataSet) {
        self.chart = ChartModel::from_dataset(&dataset);
        self.table.regenerate(&dataset);
        self.bridge.invalidate();
        self.chart_panel.set_series(dataset.series.len());
        if let Some(ev) = &self.event_ctrl {
            let mut e = SyncEvent::new(EventKind::DATASET_LOADED);
            e.dataset = Some(DatasetMeta {
                title: dataset.title.clone(),
                categories: dataset.categories.len(),
                series: dataset.series.len(),
            });
            ev.emit(e);
        }
        self.dataset = dataset;
        self.status = None;
        self.publish_selection();
    }

    /// Load a dataset file and replace the current dataset. On error the
    /// current dataset is kept and the error is shown in the status bar.
    pub fn open_path(&mut self, path: &Path) -> Result<()> {
        match DataSet::load_from_path(path) {
            Ok(ds) => {
                self.load_dataset(ds);
                Ok(())
            }
            Err(e) => {
                log::error!("failed to load {:?}: {}", path, e);
                self.status = Some(format!("Failed to load {}: {}", path.display(), e));
                Err(e)
            }
        }
    }

    pub fn save_path(&mut self, path: &Path) -> Result<()> {
        match self.dataset.save_to_path(path) {
            Ok(()) => {
                log::info!("saved dataset to {:?}", path);
                self.status = Some(format!("Saved {}", path.display()));
                Ok(())
            }
            Err(e) => {
                log::error!("failed to save {:?}: {}", path, e);
                self.status = Some(format!("Failed to save {}: {}", path.display(), e));
                Err(e)
            }
        }
    }

    pub(crate) fn open_dataset_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Dataset", &["json", "yaml", "yml"])
            .pick_file()
        {
            let _ = self.open_path(&path);
        }
    }

    pub(crate) fn save_dataset_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .add_filter("YAML", &["yaml", "yml"])
            .set_file_name("dataset.json")
            .save_file()
        {
            let _ = self.save_path(&path);
        }
    }

    // ── User input ──────────────────────────────────────────────────────────

    /// Apply an action reported by the chart panel.
    pub fn handle_chart_action(&mut self, action: ChartAction) -> SyncOutcome {
        let outcome = match action {
            ChartAction::PointClicked { point, accumulate } => {
                if let Err(e) = self.chart.click_point(point, accumulate) {
                    log::warn!("point click ignored: {}", e);
                }
                self.forward_chart_notifications()
            }
            ChartAction::AreaSelected(region) => {
                self.bridge
                    .select_area(&region, &mut self.chart, &mut self.table)
            }
            ChartAction::CanvasClicked => {
                self.bridge.clear_selection(&mut self.chart, &mut self.table)
            }
        };
        self.publish_selection();
        outcome
    }

    /// Apply a click at a table position.
    pub fn handle_cell_click(&mut self, cell: TableCell) -> SyncOutcome {
        let outcome = self
            .bridge
            .cell_clicked(cell.row, cell.column, &mut self.chart, &mut self.table);
        self.publish_selection();
        outcome
    }

    /// Clear the selection from the menu.
    pub fn clear_selection(&mut self) -> SyncOutcome {
        let outcome = self.bridge.clear_selection(&mut self.chart, &mut self.table);
        self.publish_selection();
        outcome
    }

    /// Mirror every pending chart notification into the table.
    pub(crate) fn forward_chart_notifications(&mut self) -> SyncOutcome {
        let mut merged = SyncOutcome::default();
        for change in self.chart.take_notifications() {
            let o = self.bridge.point_selection_changed(&change, &mut self.table);
            merged.selected.extend(o.selected);
            merged.unselected.extend(o.unselected);
            merged.cells_written += o.cells_written;
            merged.failures.extend(o.failures);
            merged.suppressed |= o.suppressed;
        }
        merged
    }

    // ── Controllers ─────────────────────────────────────────────────────────

    /// Apply requests queued on the selection controller. Called once per frame.
    pub fn apply_controllers(&mut self) {
        let Some(ctrl) = self.selection_ctrl.clone() else {
            return;
        };
        let requests = ctrl.take_requests();
        if requests.is_empty() {
            return;
        }
        for req in requests {
            match req {
                SelectionRequest::Clear => {
                    self.bridge.clear_selection(&mut self.chart, &mut self.table);
                }
                SelectionRequest::Select {
                    series_name,
                    category,
                    selected,
                } => match self.find_point(&series_name, &category) {
                    Some(point) => {
                        if let Err(e) = self.chart.select(point, selected) {
                            log::warn!("select request ignored: {}", e);
                        }
                        self.forward_chart_notifications();
                    }
                    None => {
                        log::warn!(
                            "select request for unknown point {:?}/{:?} ignored",
                            series_name,
                            category
                        );
                    }
                },
            }
        }
        self.publish_selection();
    }

    fn find_point(&self, series_name: &str, category: &str) -> Option<PointRef> {
        let series = self
            .chart
            .series()
            .iter()
            .position(|s| s.name == series_name)?;
        let index = self.chart.categories().iter().position(|c| c == category)?;
        Some(PointRef::new(series, index))
    }

    /// Points currently selected on the chart, by name.
    pub fn selected_points(&self) -> Vec<SelectedPoint> {
        self.chart
            .selected_points()
            .into_iter()
            .filter_map(|p| self.chart.point(p))
            .map(|p| SelectedPoint {
                series: p.series_name,
                category: p.category,
                value: p.y,
            })
            .collect()
    }

    pub(crate) fn publish_selection(&self) {
        if let Some(ctrl) = &self.selection_ctrl {
            ctrl.publish(self.selected_points());
        }
    }

    /// `true` when every chart point and its table cell agree.
    pub fn is_consistent(&self) -> bool {
        self.chart
            .points()
            .into_iter()
            .all(|p| self.table.is_selected(p.cell()) == Some(self.chart.is_selected(p)))
    }
}
