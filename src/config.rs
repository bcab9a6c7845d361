//! Configuration for the linked chart/table view.

use eframe::egui::Color32;

use crate::controllers::SelectionController;
use crate::events::EventController;

// ─────────────────────────────────────────────────────────────────────────────
// Feature flags
// ─────────────────────────────────────────────────────────────────────────────

/// Toggle individual interactions and UI elements on or off.
///
/// All features default to `true` (enabled).
#[derive(Clone, Debug)]
pub struct FeatureFlags {
    /// Clicking a marker selects the point.
    pub point_select: bool,
    /// Dragging on the chart selects every point inside the rubber band.
    pub drag_select: bool,
    /// Clicking empty chart canvas clears the selection.
    pub click_to_clear: bool,
    /// Show the chart legend.
    pub legend: bool,
    /// Show the data table below the chart.
    pub table: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            point_select: true,
            drag_select: true,
            click_to_clear: true,
            legend: true,
            table: true,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Selection look
// ─────────────────────────────────────────────────────────────────────────────

/// Colors used to draw selected points and cells.
#[derive(Clone, Debug)]
pub struct SelectionLook {
    /// Fill of a selected marker. Default: tomato.
    pub marker_fill: Color32,
    /// Border of a selected marker. Default: green.
    pub marker_border: Color32,
    /// Background of a selected table cell.
    pub cell_highlight: Color32,
    /// Fill of the rubber band while dragging.
    pub drag_fill: Color32,
}

impl Default for SelectionLook {
    fn default() -> Self {
        Self {
            marker_fill: Color32::from_rgb(255, 99, 71),
            marker_border: Color32::from_rgb(0, 128, 0),
            cell_highlight: Color32::from_rgba_unmultiplied(255, 99, 71, 96),
            drag_fill: Color32::from_rgba_unmultiplied(51, 92, 173, 64),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Controllers sub-config
// ─────────────────────────────────────────────────────────────────────────────

/// Optional programmatic controllers attached to the view.
#[derive(Clone, Default)]
pub struct Controllers {
    pub selection: Option<SelectionController>,
    pub event: Option<EventController>,
}

// ─────────────────────────────────────────────────────────────────────────────
// SyncConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration for the linked view.
///
/// | Field          | Purpose |
/// |----------------|---------|
/// | `features`     | Toggle interactions and UI elements |
/// | `look`         | Selection colors |
/// | `controllers`  | Programmatic interaction handles |
#[derive(Clone)]
pub struct SyncConfig {
    // ── Window / chrome ──────────────────────────────────────────────────────
    /// Native window title.
    pub title: String,
    /// Optional headline rendered above the chart. Falls back to the dataset title.
    pub headline: Option<String>,
    /// Optional subheadline below the headline.
    pub subheadline: Option<String>,
    /// Optional credits line below the table.
    pub credits: Option<String>,
    /// Label of the Y axis.
    pub y_axis_title: Option<String>,
    /// Optional eframe native-window options.
    pub native_options: Option<eframe::NativeOptions>,

    // ── Behaviour / appearance ───────────────────────────────────────────────
    pub features: FeatureFlags,
    pub look: SelectionLook,

    // ── Programmatic controllers ─────────────────────────────────────────────
    pub controllers: Controllers,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            title: "LinkPlot".to_string(),
            headline: None,
            subheadline: Some(
                "Click points, cells or headers. Drag on the chart to select an area.".to_string(),
            ),
            credits: None,
            y_axis_title: None,
            native_options: None,
            features: FeatureFlags::default(),
            look: SelectionLook::default(),
            controllers: Controllers::default(),
        }
    }
}
