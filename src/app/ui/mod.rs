// src/app/ui/mod.rs
pub mod grid;
pub mod list;
pub mod topbar;

use eframe::egui::{self as eg};

pub(crate) fn loading_panel(ui: &mut eg::Ui, what: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.heading(format!("Loading {what}…"));
        ui.add(eg::Spinner::new().size(16.0));
    });
}

pub(crate) fn error_panel(ui: &mut eg::Ui, message: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.colored_label(ui.visuals().error_fg_color, message);
    });
}

pub(crate) fn empty_results_panel(ui: &mut eg::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        ui.label(eg::RichText::new("No matching movies found").weak());
    });
}
