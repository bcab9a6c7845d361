use eframe::egui::{self, Stroke, Ui};
use egui_plot::{GridMark, Legend, Line, Plot, PlotPoint, Points, Polygon};

use super::panel_trait::{Panel, PanelState};
use crate::config::{FeatureFlags, SelectionLook};
use crate::data::chart::{ChartModel, Region};
use crate::data::coords::PointRef;
use crate::data::series_look::SeriesLook;

/// What the user did on the chart during one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartAction {
    /// A marker was clicked. `accumulate` is set when shift or ctrl/cmd was held.
    PointClicked { point: PointRef, accumulate: bool },
    /// A primary-button drag finished.
    AreaSelected(Region),
    /// A click that hit no marker.
    CanvasClicked,
}

/// Legend whose entries cannot hide a series.
///
/// A hidden series would still be hit-tested and area-selected while its
/// column stays in the table, so the visibility override is pinned to empty.
pub(crate) fn locked_legend() -> Legend {
    Legend::default().hidden_items(std::iter::empty::<egui::Id>())
}

/// Line chart with one marker per point and rubber-band selection.
pub struct ChartPanel {
    pub state: PanelState,
    looks: Vec<SeriesLook>,
    /// Marker hit radius in screen pixels.
    pub hit_radius: f32,
    drag_origin: Option<[f64; 2]>,
    drag_current: Option<[f64; 2]>,
    look_editor: Option<usize>,
}

impl Default for ChartPanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("Chart", egui_phosphor::regular::CHART_LINE),
            looks: Vec::new(),
            hit_radius: 8.0,
            drag_origin: None,
            drag_current: None,
            look_editor: None,
        }
    }
}

impl Panel for ChartPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }
}

impl ChartPanel {
    pub fn new(series_count: usize) -> Self {
        let mut panel = Self::default();
        panel.set_series(series_count);
        panel
    }

    /// Reset per-series looks after the dataset changed.
    pub fn set_series(&mut self, series_count: usize) {
        self.looks = SeriesLook::for_series(series_count);
        self.look_editor = None;
        self.drag_origin = None;
        self.drag_current = None;
    }

    pub fn looks(&self) -> &[SeriesLook] {
        &self.looks
    }

    /// Drag rectangle currently being drawn, if any.
    pub fn pending_region(&self) -> Option<Region> {
        Some(Region::from_corners(self.drag_origin?, self.drag_current?))
    }

    /// Series look editor entries for the View menu.
    pub fn render_look_menu(&mut self, ui: &mut Ui, chart: &ChartModel) {
        for (i, series) in chart.series().iter().enumerate() {
            let open = self.look_editor == Some(i);
            if ui.selectable_label(open, series.name.as_str()).clicked() {
                self.look_editor = if open { None } else { Some(i) };
            }
            if open {
                if let Some(look) = self.looks.get_mut(i) {
                    look.render_editor(ui);
                }
            }
        }
    }

    pub fn show(
        &mut self,
        ui: &mut Ui,
        chart: &ChartModel,
        features: &FeatureFlags,
        look: &SelectionLook,
        y_axis_title: Option<&str>,
    ) -> Option<ChartAction> {
        let categories = chart.categories();
        let n = categories.len();
        let y_bounds = chart.y_bounds();

        let mut plot = Plot::new("linkplot_chart")
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .allow_double_click_reset(false)
            .x_grid_spacer(egui_plot::uniform_grid_spacer(|_| [1.0, 1.0, 1.0]))
            .x_axis_formatter(move |mark: GridMark, _range| {
                let v = mark.value;
                if v < 0.0 || (v - v.round()).abs() > 1e-6 {
                    return String::new();
                }
                categories.get(v.round() as usize).cloned().unwrap_or_default()
            });
        if let Some(t) = y_axis_title {
            plot = plot.y_axis_label(t);
        }
        if features.legend {
            plot = plot.legend(locked_legend());
        }

        let hit_radius = self.hit_radius;
        let resp = plot.show(ui, |plot_ui| {
            plot_ui.set_plot_bounds_x(-0.5..=(n.max(1) as f64 - 0.5));
            plot_ui.set_plot_bounds_y(y_bounds);

            for (i, series) in chart.series().iter().enumerate() {
                let sl = self.looks.get(i).cloned().unwrap_or_else(|| SeriesLook::new(i));
                let pts: Vec<[f64; 2]> = series.points.iter().map(|p| [p.x, p.y]).collect();
                let selected: Vec<[f64; 2]> = series
                    .points
                    .iter()
                    .filter(|p| p.selected)
                    .map(|p| [p.x, p.y])
                    .collect();
                plot_ui.line(
                    Line::new(&series.name, pts.clone())
                        .color(sl.color)
                        .width(sl.width),
                );
                plot_ui.points(
                    Points::new(&series.name, pts)
                        .radius(sl.point_size)
                        .shape(sl.marker)
                        .color(sl.color)
                        .filled(true),
                );
                if !selected.is_empty() {
                    plot_ui.points(
                        Points::new(&series.name, selected.clone())
                            .radius(sl.point_size + 2.0)
                            .shape(sl.marker)
                            .color(look.marker_border)
                            .filled(true),
                    );
                    plot_ui.points(
                        Points::new(&series.name, selected)
                            .radius(sl.point_size)
                            .shape(sl.marker)
                            .color(look.marker_fill)
                            .filled(true),
                    );
                }
            }

            let response = plot_ui.response().clone();
            let mut action = None;

            if features.drag_select {
                if response.drag_started_by(egui::PointerButton::Primary) {
                    let origin = response
                        .ctx
                        .input(|i| i.pointer.press_origin())
                        .map(|p| plot_ui.plot_from_screen(p));
                    self.drag_origin = origin.map(|p| [p.x, p.y]);
                }
                if response.dragged_by(egui::PointerButton::Primary) {
                    self.drag_current = plot_ui.pointer_coordinate().map(|p| [p.x, p.y]);
                }
                if response.drag_stopped_by(egui::PointerButton::Primary) {
                    action = self.pending_region().map(ChartAction::AreaSelected);
                    self.drag_origin = None;
                    self.drag_current = None;
                }
                if let Some(region) = self.pending_region() {
                    plot_ui.polygon(
                        Polygon::new("", region.outline())
                            .fill_color(look.drag_fill)
                            .stroke(Stroke::new(1.0, look.drag_fill.to_opaque())),
                    );
                }
            }

            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let hit = if features.point_select {
                        chart.nearest(hit_radius, |x, y| {
                            plot_ui.screen_from_plot(PlotPoint::new(x, y)).distance(pos)
                        })
                    } else {
                        None
                    };
                    let modifiers = response.ctx.input(|i| i.modifiers);
                    action = match hit {
                        Some(point) => Some(ChartAction::PointClicked {
                            point,
                            accumulate: modifiers.shift || modifiers.command,
                        }),
                        None if features.click_to_clear => Some(ChartAction::CanvasClicked),
                        None => None,
                    };
                }
            }
            action
        });

        if let Some(a) = &resp.inner {
            log::debug!("chart action: {:?}", a);
        }
        resp.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legend_overrides_hidden_items() {
        let legend = locked_legend();
        assert!(legend != Legend::default());
        assert!(legend == Legend::default().hidden_items(std::iter::empty::<egui::Id>()));
    }
}
