//! Application module for the linked chart/table view.
//!
//! | Sub-module       | Responsibility |
//! | ---------------- | -------------- |
//! | [`linked_app`]   | [`LinkedApp`] state, dataset loading, input handling and controller wiring |
//! | [`layout`]       | Per-frame eframe layout: menu bar, headline, chart, table, status line |
//! | [`run`]          | Top-level [`run_linked()`] entry point |

mod layout;
mod linked_app;
mod run;

pub use linked_app::LinkedApp;
pub use run::run_linked;
