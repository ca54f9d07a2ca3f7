// src/app/ui/topbar.rs
use eframe::egui::{self as eg};

use crate::app::types::{ListSource, SortKey, View};

impl crate::app::MexApp {
    // ---------- TOP BAR ----------
    pub(crate) fn ui_render_topbar(&mut self, ui: &mut eg::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Movie Explorer");
            ui.separator();

            // View switcher (the detail view is only entered by activating
            // a movie, so it gets no tab of its own).
            if ui
                .selectable_label(self.view == View::List, "List")
                .clicked()
                && self.view != View::List
            {
                self.switch_to_list();
            }
            if ui
                .selectable_label(self.view == View::Gallery, "Gallery")
                .clicked()
                && self.view != View::Gallery
            {
                self.switch_to_gallery();
            }

            if self.view != View::List {
                return;
            }

            ui.separator();

            // Search: typing filters the on-screen set per keystroke,
            // Enter runs the remote catalog search.
            let resp = ui.add(
                eg::TextEdit::singleline(&mut self.list.query)
                    .hint_text("Search movies…")
                    .desired_width(200.0),
            );
            if resp.lost_focus() && ui.input(|i| i.key_pressed(eg::Key::Enter)) {
                let query = self.list.query.trim().to_string();
                if query.is_empty() {
                    self.start_list_load(ListSource::Popular);
                } else {
                    self.start_list_load(ListSource::Search(query));
                }
            }
            if let ListSource::Search(q) = &self.list.source {
                let label = format!("results for “{q}”");
                if ui
                    .small_button("⨯")
                    .on_hover_text("Back to popular movies")
                    .clicked()
                {
                    self.list.query.clear();
                    self.start_list_load(ListSource::Popular);
                } else {
                    ui.label(eg::RichText::new(label).weak());
                }
            }

            ui.separator();

            // Sort
            eg::ComboBox::from_id_source("sort_by_combo")
                .selected_text(format!("Sort: {}", self.list.sort_key.label()))
                .show_ui(ui, |ui| {
                    for key in [
                        SortKey::Title,
                        SortKey::ReleaseDate,
                        SortKey::VoteAverage,
                        SortKey::Popularity,
                    ] {
                        ui.selectable_value(&mut self.list.sort_key, key, key.label());
                    }
                });

            if ui
                .button(self.list.sort_order.arrow())
                .on_hover_text("Toggle sort direction")
                .clicked()
            {
                self.list.sort_order = self.list.sort_order.toggled();
            }
        });
    }
}
