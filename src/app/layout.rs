//! Per-frame layout: menu bar, headline, chart, table and status line.

use eframe::egui;

use super::linked_app::LinkedApp;
use crate::panels::Panel;

impl LinkedApp {
    fn render_menu_bar(&mut self, ui: &mut egui::Ui) {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui
                    .button(format!("{} Open dataset…", egui_phosphor::regular::FOLDER_OPEN))
                    .clicked()
                {
                    ui.close();
                    self.open_dataset_dialog();
                }
                if ui
                    .button(format!("{} Save dataset…", egui_phosphor::regular::FLOPPY_DISK))
                    .clicked()
                {
                    ui.close();
                    self.save_dataset_dialog();
                }
            });
            ui.menu_button("View", |ui| {
                self.table_panel.render_menu(ui);
                ui.separator();
                ui.label("Series looks");
                self.chart_panel.render_look_menu(ui, &self.chart);
            });
            if ui
                .button(format!("{} Clear selection", egui_phosphor::regular::X_CIRCLE))
                .clicked()
            {
                self.clear_selection();
            }
        });
    }

    fn render_headline(&self, ui: &mut egui::Ui) {
        if let Some(h) = self.headline() {
            ui.heading(h);
        }
        if let Some(sub) = &self.config.subheadline {
            ui.label(sub);
        }
    }
}

impl eframe::App for LinkedApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_controllers();

        egui::TopBottomPanel::top("linkplot_top").show(ctx, |ui| {
            self.render_menu_bar(ui);
            self.render_headline(ui);
        });

        if self.config.credits.is_some() || self.status.is_some() {
            egui::TopBottomPanel::bottom("linkplot_status").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if let Some(status) = &self.status {
                        ui.colored_label(ui.visuals().warn_fg_color, status);
                    }
                    if let Some(credits) = &self.config.credits {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.small(credits);
                        });
                    }
                });
            });
        }

        let mut clicked_cell = None;
        if self.table_panel.state.visible {
            egui::TopBottomPanel::bottom("linkplot_table")
                .resizable(true)
                .default_height(260.0)
                .min_height(120.0)
                .show(ctx, |ui| {
                    clicked_cell =
                        self.table_panel
                            .show(ui, &self.table, self.config.look.cell_highlight);
                });
        }

        let mut chart_action = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            chart_action = self.chart_panel.show(
                ui,
                &self.chart,
                &self.config.features,
                &self.config.look,
                self.config.y_axis_title.as_deref(),
            );
        });

        if let Some(cell) = clicked_cell {
            self.handle_cell_click(cell);
        }
        if let Some(action) = chart_action {
            self.handle_chart_action(action);
        }
        // Changes made by other code paths on the chart still reach the table.
        if self.chart.has_notifications() {
            self.forward_chart_notifications();
            self.publish_selection();
        }
    }
}
