// src/app/ui/grid.rs
use eframe::egui::{self as eg};

use crate::app::nav::{result_ids, MovieId};
use crate::app::types::FetchState;
use crate::app::utils::{format_rating, release_year};
use crate::app::{gallery, posters::PosterStore};
use crate::tmdb::{image_url, ImageSize, MovieSummary};

pub const H_SPACING: f32 = 8.0;
pub const V_SPACING: f32 = 12.0;
const CARD_W: f32 = 140.0;
const TEXT_H: f32 = 48.0;

fn draw_poster(
    ui: &mut eg::Ui,
    posters: &PosterStore,
    movie: &MovieSummary,
    rect: eg::Rect,
) {
    let url = image_url(movie.poster_path.as_deref(), ImageSize::W300);
    let tex = url.as_deref().and_then(|u| posters.texture(u));
    match tex {
        Some(tex) => {
            ui.painter().image(
                tex.id(),
                rect,
                eg::Rect::from_min_max(eg::pos2(0.0, 0.0), eg::pos2(1.0, 1.0)),
                eg::Color32::WHITE,
            );
        }
        None => {
            ui.painter().rect_filled(rect, 6.0, eg::Color32::from_gray(40));
        }
    }
}

impl crate::app::MexApp {
    // ---------- GENRE FILTER CHIPS ----------
    fn ui_render_genre_filters(&mut self, ui: &mut eg::Ui) {
        if self.gallery.options.is_empty() {
            return;
        }

        ui.horizontal_wrapped(|ui| {
            ui.label(eg::RichText::new("Filter by genre:").strong());

            let mut toggled: Option<u64> = None;
            for opt in &self.gallery.options {
                if ui.selectable_label(opt.selected, &opt.name).clicked() {
                    toggled = Some(opt.id);
                }
            }
            if let Some(id) = toggled {
                gallery::toggle_genre(&mut self.gallery.options, id);
            }

            if self.gallery.options.iter().any(|o| o.selected)
                && ui.small_button("Clear filters").clicked()
            {
                gallery::clear_selection(&mut self.gallery.options);
            }
        });
        ui.separator();
    }

    // ---------- GALLERY ----------
    pub(crate) fn ui_render_gallery(&mut self, ui: &mut eg::Ui) {
        self.ui_render_genre_filters(ui);

        let movies = match &self.gallery.fetch {
            FetchState::Loading => {
                super::loading_panel(ui, "gallery");
                return;
            }
            FetchState::Error(msg) => {
                super::error_panel(ui, msg);
                return;
            }
            FetchState::Ready(movies) => movies,
        };

        let selected = gallery::selected_ids(&self.gallery.options);
        let order = gallery::filter(movies, &selected);
        if order.is_empty() {
            super::empty_results_panel(ui);
            return;
        }
        let ids = result_ids(movies, &order);

        let card_h = CARD_W * 1.5 + TEXT_H;
        let mut open: Option<(MovieId, Vec<MovieId>)> = None;

        eg::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                // Columns + centering
                let avail = ui.available_width();
                let cols = ((avail + H_SPACING) / (CARD_W + H_SPACING)).floor().max(1.0) as usize;
                let used = cols as f32 * CARD_W + (cols.saturating_sub(1)) as f32 * H_SPACING;
                let left_pad = ((avail - used) * 0.5).max(0.0);
                if left_pad > 0.0 {
                    ui.add_space(left_pad);
                }

                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing = eg::vec2(H_SPACING, V_SPACING);

                    for (col, &idx) in order.iter().enumerate() {
                        if col > 0 && col % cols == 0 {
                            ui.end_row();
                        }

                        let movie = &movies[idx];
                        ui.allocate_ui_with_layout(
                            eg::vec2(CARD_W, card_h),
                            eg::Layout::top_down(eg::Align::Min),
                            |ui| {
                                ui.set_min_size(eg::vec2(CARD_W, card_h));
                                let rect = ui.max_rect();

                                let id = eg::Id::new(("gallery_card", movie.id));
                                let resp = ui.interact(rect, id, eg::Sense::click());
                                if resp.clicked() {
                                    open = Some((movie.id, ids.clone()));
                                }

                                let poster_rect = eg::Rect::from_min_max(
                                    rect.min,
                                    eg::pos2(rect.min.x + CARD_W, rect.min.y + CARD_W * 1.5),
                                );
                                let text_rect = eg::Rect::from_min_max(
                                    eg::pos2(rect.min.x, poster_rect.max.y),
                                    rect.max,
                                );

                                draw_poster(ui, &self.posters, movie, poster_rect);

                                let title_line = match release_year(movie.release_date.as_deref())
                                {
                                    Some(y) => format!("{} ({})", movie.title, y),
                                    None => movie.title.clone(),
                                };
                                let label_text =
                                    format!("{title_line}\n{}", format_rating(movie.vote_average));

                                ui.allocate_ui_at_rect(text_rect, |ui| {
                                    ui.add(
                                        eg::Label::new(
                                            eg::RichText::new(label_text).size(13.0),
                                        )
                                        .wrap(),
                                    );
                                });

                                if resp.hovered() {
                                    ui.painter().rect_stroke(
                                        poster_rect.shrink(1.0),
                                        6.0,
                                        eg::Stroke::new(2.0, eg::Color32::LIGHT_BLUE),
                                    );
                                }
                            },
                        );
                    }

                    ui.end_row();
                });
            });

        if let Some((id, sequence)) = open {
            self.open_detail(id, Some(sequence));
        }
    }
}
