// src/app/ui/list.rs
use eframe::egui::{self as eg};
use egui_extras::{Column, TableBuilder};

use crate::app::nav::{result_ids, MovieId};
use crate::app::transform::{highlight, transform};
use crate::app::types::FetchState;
use crate::app::utils::{format_rating, format_release_date, snippet};
use crate::tmdb::{image_url, ImageSize};

const ROW_HEIGHT: f32 = 64.0;
const THUMB_W: f32 = 40.0;
const THUMB_H: f32 = 60.0;
const OVERVIEW_SNIPPET_CHARS: usize = 100;

/// Plain/marked spans of the query rendered as one rich-text block.
fn highlight_job(ui: &eg::Ui, text: &str, query: &str) -> eg::text::LayoutJob {
    let plain = eg::TextFormat {
        color: ui.visuals().text_color(),
        ..Default::default()
    };
    let marked = eg::TextFormat {
        color: eg::Color32::BLACK,
        background: eg::Color32::from_rgb(255, 213, 79),
        ..Default::default()
    };

    let mut job = eg::text::LayoutJob::default();
    for span in highlight(text, query) {
        let fmt = if span.matched { marked.clone() } else { plain.clone() };
        job.append(&span.text, 0.0, fmt);
    }
    job
}

impl crate::app::MexApp {
    pub(crate) fn ui_render_list(&mut self, ui: &mut eg::Ui) {
        let movies = match &self.list.fetch {
            FetchState::Loading => {
                super::loading_panel(ui, "movies");
                return;
            }
            FetchState::Error(msg) => {
                super::error_panel(ui, msg);
                return;
            }
            FetchState::Ready(movies) => movies,
        };

        let order = transform(
            movies,
            &self.list.query,
            self.list.sort_key,
            self.list.sort_order,
        );
        if order.is_empty() {
            super::empty_results_panel(ui);
            return;
        }
        let ids = result_ids(movies, &order);

        // Deferred so the table borrows stay immutable.
        let mut open: Option<(MovieId, Vec<MovieId>)> = None;

        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(eg::Layout::left_to_right(eg::Align::Center))
            .column(Column::exact(THUMB_W + 8.0))
            .column(Column::remainder().at_least(180.0).clip(true))
            .column(Column::auto())
            .column(Column::auto())
            .column(Column::remainder().clip(true))
            .header(20.0, |mut header| {
                header.col(|_ui| {});
                header.col(|ui| {
                    ui.strong("Title");
                });
                header.col(|ui| {
                    ui.strong("Released");
                });
                header.col(|ui| {
                    ui.strong("Rating");
                });
                header.col(|ui| {
                    ui.strong("Overview");
                });
            })
            .body(|mut body| {
                for &idx in &order {
                    let movie = &movies[idx];
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui| {
                            let url = image_url(movie.poster_path.as_deref(), ImageSize::W300);
                            let tex = url.as_deref().and_then(|u| self.posters.texture(u));
                            let thumb = eg::vec2(THUMB_W, THUMB_H);
                            match tex {
                                Some(tex) => {
                                    ui.image((tex.id(), thumb));
                                }
                                None => {
                                    let (rect, _) =
                                        ui.allocate_exact_size(thumb, eg::Sense::hover());
                                    ui.painter().rect_filled(
                                        rect,
                                        4.0,
                                        eg::Color32::from_gray(40),
                                    );
                                }
                            }
                        });
                        row.col(|ui| {
                            let job = highlight_job(ui, &movie.title, &self.list.query);
                            let resp = ui
                                .add(eg::Label::new(job).sense(eg::Sense::click()))
                                .on_hover_cursor(eg::CursorIcon::PointingHand)
                                .on_hover_text("Open details");
                            if resp.clicked() {
                                open = Some((movie.id, ids.clone()));
                            }
                        });
                        row.col(|ui| {
                            ui.label(format_release_date(movie.release_date.as_deref()));
                        });
                        row.col(|ui| {
                            ui.label(format_rating(movie.vote_average));
                        });
                        row.col(|ui| {
                            let text = snippet(&movie.overview, OVERVIEW_SNIPPET_CHARS);
                            let job = highlight_job(ui, &text, &self.list.query);
                            ui.add(eg::Label::new(job).wrap());
                        });
                    });
                }
            });

        if let Some((id, sequence)) = open {
            self.open_detail(id, Some(sequence));
        }
    }
}
