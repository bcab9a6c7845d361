//! SeriesLook: visual styling for chart series.

use eframe::egui;
use egui_plot::MarkerShape;

/// The visual presentation of a series (color, line width, markers).
#[derive(Debug, Clone)]
pub struct SeriesLook {
    pub color: egui::Color32,
    pub width: f32,
    pub point_size: f32,
    pub marker: MarkerShape,
}

impl Default for SeriesLook {
    fn default() -> Self {
        Self {
            color: egui::Color32::GRAY,
            width: 2.0,
            point_size: 4.0,
            marker: MarkerShape::Circle,
        }
    }
}

impl SeriesLook {
    /// Create a new SeriesLook with a color and marker allocated based on the series index.
    pub fn new(index: usize) -> Self {
        Self {
            color: Self::alloc_color(index),
            marker: Self::alloc_marker(index),
            ..Default::default()
        }
    }

    /// One look per series of a dataset with `count` series.
    pub fn for_series(count: usize) -> Vec<Self> {
        (0..count).map(Self::new).collect()
    }

    /// Allocate a distinct color for the given series index.
    pub fn alloc_color(index: usize) -> egui::Color32 {
        const PALETTE: [egui::Color32; 10] = [
            egui::Color32::from_rgb(124, 181, 236),
            egui::Color32::from_rgb(67, 67, 72),
            egui::Color32::from_rgb(144, 237, 125),
            egui::Color32::from_rgb(247, 163, 92),
            egui::Color32::from_rgb(128, 133, 233),
            egui::Color32::from_rgb(241, 92, 128),
            egui::Color32::from_rgb(228, 211, 84),
            egui::Color32::from_rgb(43, 144, 143),
            egui::Color32::from_rgb(244, 91, 91),
            egui::Color32::from_rgb(145, 232, 225),
        ];
        PALETTE[index % PALETTE.len()]
    }

    /// Cycle marker shapes so series stay distinguishable without color.
    pub fn alloc_marker(index: usize) -> MarkerShape {
        const SHAPES: [MarkerShape; 5] = [
            MarkerShape::Circle,
            MarkerShape::Diamond,
            MarkerShape::Square,
            MarkerShape::Up,
            MarkerShape::Down,
        ];
        SHAPES[index % SHAPES.len()]
    }

    /// Inline editor for color, width and marker.
    pub(crate) fn render_editor(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Color");
            let mut c = self.color;
            if ui.color_edit_button_srgba(&mut c).changed() {
                self.color = c;
            }
            ui.label("Width");
            ui.add(
                egui::DragValue::new(&mut self.width)
                    .range(0.5..=8.0)
                    .speed(0.1),
            );
            ui.label("Size");
            ui.add(
                egui::DragValue::new(&mut self.point_size)
                    .range(1.0..=10.0)
                    .speed(0.1),
            );
        });
        egui::ComboBox::from_id_salt(ui.next_auto_id())
            .selected_text(marker_name(self.marker))
            .show_ui(ui, |ui| {
                for shape in [
                    MarkerShape::Circle,
                    MarkerShape::Square,
                    MarkerShape::Diamond,
                    MarkerShape::Up,
                    MarkerShape::Down,
                ] {
                    if ui
                        .selectable_label(self.marker == shape, marker_name(shape))
                        .clicked()
                    {
                        self.marker = shape;
                    }
                }
            });
    }
}

fn marker_name(shape: MarkerShape) -> &'static str {
    match shape {
        MarkerShape::Circle => "Circle",
        MarkerShape::Square => "Square",
        MarkerShape::Diamond => "Diamond",
        MarkerShape::Up => "Triangle up",
        MarkerShape::Down => "Triangle down",
        _ => "Other",
    }
}
