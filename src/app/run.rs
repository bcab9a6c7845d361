//! Top-level entry point for running the linked view as a native window.

use eframe::egui;

use super::linked_app::LinkedApp;
use crate::config::SyncConfig;
use crate::data::dataset::DataSet;

/// Launch the linked chart/table view in a native window.
///
/// Blocks until the window is closed.
pub fn run_linked(dataset: DataSet, mut cfg: SyncConfig) -> eframe::Result<()> {
    let title = cfg.title.clone();
    let mut opts = cfg
        .native_options
        .take()
        .unwrap_or_else(eframe::NativeOptions::default);

    // Set a bigger default window size if one is not provided by config.
    if opts.viewport.inner_size.is_none() {
        opts.viewport = opts
            .viewport
            .clone()
            .with_inner_size(egui::vec2(1100.0, 860.0));
    }

    log::info!(
        "starting {:?} with {} categories x {} series",
        title,
        dataset.categories.len(),
        dataset.series.len()
    );
    let app = LinkedApp::new(dataset, cfg);

    eframe::run_native(
        &title,
        opts,
        Box::new(|cc| {
            // Install Phosphor icon font before creating the app.
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
}
