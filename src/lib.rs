//! LinkPlot: a chart and its generated data table with linked point selection.
//!
//! Selecting a point on the chart highlights the matching table cell, and
//! clicking a cell (or a whole row or column header) toggles the matching
//! points. The crate is organised into:
//! - `bridge`: the [`SelectionSyncBridge`] and the narrow [`ChartWidget`] /
//!   [`TableView`] contracts it talks through
//! - `data`: coordinates, index mapping, datasets and the chart/table models
//! - `events`: event flags and the [`EventController`] for observers
//! - `controllers`: the [`SelectionController`] for external code
//! - `config`: [`SyncConfig`] and its sub-configs
//! - `panels` / `app`: the egui panels and the eframe application

pub mod app;
pub mod bridge;
pub mod config;
pub mod controllers;
pub mod data;
pub mod error;
pub mod events;
pub mod logger;
pub mod panels;

// Public re-exports for a compact external API
pub use app::{run_linked, LinkedApp};
pub use bridge::{
    CellMutation, ChartPoint, ChartWidget, PointMutation, PointSelectionChange,
    SelectionSyncBridge, SyncOutcome, TableView,
};
pub use config::{Controllers, FeatureFlags, SelectionLook, SyncConfig};
pub use controllers::{SelectedPoint, SelectionController};
pub use data::chart::{ChartModel, Region};
pub use data::coords::{CellRole, PointRef, TableCell, HEADER_OFFSET};
pub use data::dataset::{DataFormat, DataSet, SeriesData};
pub use data::mapping::{IndexMapping, MappingCache};
pub use data::table::TableModel;
pub use error::{DataError, LookupFailure};
pub use events::{EventController, EventFilter, EventKind, SyncEvent};
pub use logger::StderrLogger;
