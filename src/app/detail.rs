// src/app/detail.rs
use eframe::egui::{self as eg};
use itertools::Itertools;

use crate::app::nav::MovieId;
use crate::app::types::FetchState;
use crate::app::utils::{format_currency, format_release_date, format_runtime};
use crate::tmdb::{image_url, ImageSize, MovieDetails};

const BACKDROP_MAX_H: f32 = 320.0;

fn meta_row(ui: &mut eg::Ui, label: &str, value: &str) {
    ui.horizontal(|ui| {
        ui.label(eg::RichText::new(label).strong());
        ui.label(value);
    });
}

impl crate::app::MexApp {
    pub(crate) fn ui_render_detail_page(&mut self, ui: &mut eg::Ui) {
        let Some(state) = self.detail.as_ref() else {
            // Detail without state: someone landed here without activating
            // a movie; send them back.
            self.switch_to_list();
            return;
        };

        // Header: back link + prev/next. Navigation is driven purely by the
        // active sequence, so it works even while details are loading.
        let mut back = false;
        let mut go_to: Option<(MovieId, Vec<MovieId>)> = None;

        ui.horizontal(|ui| {
            if ui.link("← Back to List").clicked() {
                back = true;
            }
            ui.with_layout(eg::Layout::right_to_left(eg::Align::Center), |ui| {
                let prev = state.nav.previous(state.id);
                let next = state.nav.next(state.id);

                if ui
                    .add_enabled(next.is_some(), eg::Button::new("Next →"))
                    .clicked()
                {
                    if let Some(id) = next {
                        go_to = Some((id, state.nav.sequence().to_vec()));
                    }
                }
                if ui
                    .add_enabled(prev.is_some(), eg::Button::new("← Previous"))
                    .clicked()
                {
                    if let Some(id) = prev {
                        go_to = Some((id, state.nav.sequence().to_vec()));
                    }
                }
            });
        });
        ui.separator();

        match &state.fetch {
            FetchState::Loading => super::ui::loading_panel(ui, "movie details"),
            FetchState::Error(msg) => {
                super::ui::error_panel(ui, msg);
                ui.vertical_centered(|ui| {
                    if ui.link("Back to Home").clicked() {
                        back = true;
                    }
                });
            }
            FetchState::Ready(details) => {
                self.ui_render_detail_body(ui, details);
            }
        }

        if back {
            self.switch_to_list();
        } else if let Some((id, sequence)) = go_to {
            self.open_detail(id, Some(sequence));
        }
    }

    fn ui_render_detail_body(&self, ui: &mut eg::Ui, details: &MovieDetails) {
        eg::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                // Backdrop, falling back to the poster, falling back to the
                // placeholder card.
                let backdrop = image_url(details.backdrop_path.as_deref(), ImageSize::Original);
                let poster = image_url(details.poster_path.as_deref(), ImageSize::W500);
                let tex = backdrop
                    .as_deref()
                    .and_then(|u| self.posters.texture(u))
                    .or_else(|| poster.as_deref().and_then(|u| self.posters.texture(u)));

                let avail_w = ui.available_width();
                match tex {
                    Some(tex) => {
                        let size = tex.size_vec2();
                        let scale = (avail_w / size.x).min(BACKDROP_MAX_H / size.y).min(1.0);
                        ui.image((tex.id(), size * scale));
                    }
                    None => {
                        let (rect, _) = ui.allocate_exact_size(
                            eg::vec2(avail_w, BACKDROP_MAX_H * 0.6),
                            eg::Sense::hover(),
                        );
                        ui.painter().rect_filled(rect, 8.0, eg::Color32::from_gray(40));
                    }
                }

                ui.add_space(8.0);
                ui.heading(&details.title);
                if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
                    ui.label(eg::RichText::new(format!("“{tagline}”")).italics().weak());
                }

                ui.add_space(8.0);
                meta_row(
                    ui,
                    "Release Date:",
                    &format_release_date(details.release_date.as_deref()),
                );
                meta_row(
                    ui,
                    "Rating:",
                    &format!("⭐ {:.1} ({} votes)", details.vote_average, details.vote_count),
                );
                if let Some(runtime) = details.runtime.filter(|r| *r > 0) {
                    meta_row(ui, "Runtime:", &format_runtime(runtime));
                }
                if let Some(status) = details.status.as_deref().filter(|s| !s.is_empty()) {
                    meta_row(ui, "Status:", status);
                }

                if !details.genres.is_empty() {
                    let genres = details.genres.iter().map(|g| g.name.as_str()).join(", ");
                    meta_row(ui, "Genres:", &genres);
                }

                ui.add_space(8.0);
                ui.separator();
                ui.label(eg::RichText::new("Overview").strong());
                if details.overview.is_empty() {
                    ui.label(eg::RichText::new("No overview available.").weak());
                } else {
                    ui.label(&details.overview);
                }

                ui.add_space(8.0);
                ui.separator();

                if !details.production_companies.is_empty() {
                    let companies = details
                        .production_companies
                        .iter()
                        .map(|c| c.name.as_str())
                        .join(", ");
                    meta_row(ui, "Production Companies:", &companies);
                }
                if !details.production_countries.is_empty() {
                    let countries = details
                        .production_countries
                        .iter()
                        .map(|c| c.name.as_str())
                        .join(", ");
                    meta_row(ui, "Production Countries:", &countries);
                }
                if !details.spoken_languages.is_empty() {
                    let languages = details
                        .spoken_languages
                        .iter()
                        .map(|l| l.english_name.as_str())
                        .filter(|n| !n.is_empty())
                        .join(", ");
                    meta_row(ui, "Languages:", &languages);
                }

                ui.add_space(8.0);
                meta_row(ui, "Budget:", &format_currency(details.budget));
                meta_row(ui, "Revenue:", &format_currency(details.revenue));
                ui.add_space(16.0);
            });
    }
}
