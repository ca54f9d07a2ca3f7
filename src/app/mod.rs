// src/app/mod.rs — view routing + background loads over mpsc channels
use std::sync::mpsc::{self, TryRecvError};
use std::thread;
use std::time::Duration;

use eframe::egui::{self as eg};
use tracing::{info, warn};

pub mod gallery;
pub mod nav;
pub mod posters;
pub mod transform;
pub mod types;

mod detail;
mod ui;
mod utils;

use crate::config::{load_config, AppConfig};
use crate::tmdb::TmdbClient;
use nav::MovieId;
use posters::PosterStore;
use types::{
    DetailMsg, DetailState, FetchState, GalleryMsg, GalleryState, ListMsg, ListSource, ListState,
    View,
};

pub struct MexApp {
    cfg: AppConfig,
    view: View,
    list: ListState,
    gallery: GalleryState,
    detail: Option<DetailState>,
    posters: PosterStore,
    did_init: bool,
}

impl Default for MexApp {
    fn default() -> Self {
        Self {
            cfg: load_config(),
            view: View::List,
            list: ListState::new(),
            gallery: GalleryState::new(),
            detail: None,
            posters: PosterStore::new(),
            did_init: false,
        }
    }
}

// ---------- navigation ----------
impl MexApp {
    /// Entering a view discards its previous state and refetches; there is
    /// no cross-view data cache.
    pub(crate) fn switch_to_list(&mut self) {
        self.view = View::List;
        self.detail = None;
        self.list = ListState::new();
        self.start_list_load(ListSource::Popular);
    }

    pub(crate) fn switch_to_gallery(&mut self) {
        self.view = View::Gallery;
        self.detail = None;
        self.gallery = GalleryState::new();
        self.start_gallery_load();
    }

    /// `sequence` is the rendered id order of the originating view at click
    /// time; prev/next hand the same sequence forward unchanged.
    pub(crate) fn open_detail(&mut self, id: MovieId, sequence: Option<Vec<MovieId>>) {
        self.view = View::Detail;
        let mut state = DetailState::new(id, sequence);
        self.start_detail_load(&mut state);
        self.detail = Some(state);
    }
}

// ---------- background loads ----------
// Every load owns a fresh channel and the state keeps only the newest
// receiver, so a superseded request's messages land on a disconnected
// channel and are dropped (last-request-wins).
impl MexApp {
    pub(crate) fn start_list_load(&mut self, source: ListSource) {
        let (tx, rx) = mpsc::channel::<ListMsg>();
        self.list.fetch = FetchState::Loading;
        self.list.source = source.clone();
        self.list.rx = Some(rx);

        let cfg = self.cfg.clone();
        thread::spawn(move || {
            let client = match TmdbClient::new(&cfg) {
                Ok(c) => c,
                Err(e) => {
                    warn!("list load aborted: {e}");
                    let _ = tx.send(ListMsg::Failed(format!("Failed to load movies: {e}")));
                    return;
                }
            };
            let fetched = match &source {
                ListSource::Popular => client.popular_movies(cfg.page),
                ListSource::Search(query) => client.search_movies(query, cfg.page),
            };
            let msg = match fetched {
                Ok(page) => ListMsg::Loaded(page.results),
                Err(e) => {
                    warn!("list load failed: {e}");
                    ListMsg::Failed("Failed to load movies".into())
                }
            };
            let _ = tx.send(msg);
        });
    }

    fn start_gallery_load(&mut self) {
        let (tx, rx) = mpsc::channel::<GalleryMsg>();
        self.gallery.fetch = FetchState::Loading;
        self.gallery.rx = Some(rx);

        let cfg = self.cfg.clone();
        thread::spawn(move || {
            let client = match TmdbClient::new(&cfg) {
                Ok(c) => c,
                Err(e) => {
                    warn!("gallery load aborted: {e}");
                    let _ = tx.send(GalleryMsg::Failed(format!("Failed to load data: {e}")));
                    return;
                }
            };

            // Movies and the genre catalog fetch in parallel; the view only
            // becomes Ready once both resolve, and either failure fails the
            // combined load.
            let genre_client = client.clone();
            let genres_handle = thread::spawn(move || genre_client.genre_list());
            let movies = client.popular_movies(cfg.page);
            let genres = genres_handle
                .join()
                .unwrap_or_else(|_| Err(crate::tmdb::TmdbError::Transport("genre fetch died".into())));

            let msg = match (movies, genres) {
                (Ok(page), Ok(genres)) => GalleryMsg::Loaded {
                    movies: page.results,
                    genres,
                },
                (Err(e), _) | (_, Err(e)) => {
                    warn!("gallery load failed: {e}");
                    GalleryMsg::Failed("Failed to load data".into())
                }
            };
            let _ = tx.send(msg);
        });
    }

    fn start_detail_load(&mut self, state: &mut DetailState) {
        let (tx, rx) = mpsc::channel::<DetailMsg>();
        state.rx = Some(rx);

        let cfg = self.cfg.clone();
        let id = state.id;
        let want_fallback = state.nav.needs_fallback();
        thread::spawn(move || {
            let client = match TmdbClient::new(&cfg) {
                Ok(c) => c,
                Err(e) => {
                    warn!("detail load aborted: {e}");
                    let _ = tx.send(DetailMsg::Failed(format!("Failed to load movie details: {e}")));
                    return;
                }
            };

            // Direct entry has no browsing context; fetch the default
            // sequence alongside the details. A fallback failure only
            // leaves prev/next disabled.
            if want_fallback {
                let fb_client = client.clone();
                let fb_tx = tx.clone();
                let page = cfg.page;
                thread::spawn(move || {
                    let ids = fb_client
                        .popular_movies(page)
                        .map(|p| p.results.into_iter().map(|m| m.id).collect())
                        .unwrap_or_default();
                    let _ = fb_tx.send(DetailMsg::Fallback(ids));
                });
            }

            let msg = match client.movie_details(id) {
                Ok(d) => DetailMsg::Loaded(Box::new(d)),
                Err(e) => {
                    warn!("detail load failed for {id}: {e}");
                    DetailMsg::Failed("Failed to load movie details".into())
                }
            };
            let _ = tx.send(msg);
        });
    }
}

// ---------- polling ----------
impl MexApp {
    fn poll_list(&mut self, ctx: &eg::Context) {
        let Some(rx) = &self.list.rx else { return };
        match rx.try_recv() {
            Ok(ListMsg::Loaded(movies)) => {
                info!("list loaded: {} movies", movies.len());
                self.posters.queue_summaries(&movies);
                self.list.fetch = FetchState::Ready(movies);
                self.list.rx = None;
                ctx.request_repaint();
            }
            Ok(ListMsg::Failed(msg)) => {
                self.list.fetch = FetchState::Error(msg);
                self.list.rx = None;
                ctx.request_repaint();
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                if matches!(self.list.fetch, FetchState::Loading) {
                    self.list.fetch = FetchState::Error("Failed to load movies".into());
                }
                self.list.rx = None;
            }
        }
    }

    fn poll_gallery(&mut self, ctx: &eg::Context) {
        let Some(rx) = &self.gallery.rx else { return };
        match rx.try_recv() {
            Ok(GalleryMsg::Loaded { movies, genres }) => {
                info!("gallery loaded: {} movies, {} genres", movies.len(), genres.len());
                self.posters.queue_summaries(&movies);
                gallery::init_genre_options(&mut self.gallery.options, &genres);
                self.gallery.fetch = FetchState::Ready(movies);
                self.gallery.rx = None;
                ctx.request_repaint();
            }
            Ok(GalleryMsg::Failed(msg)) => {
                self.gallery.fetch = FetchState::Error(msg);
                self.gallery.rx = None;
                ctx.request_repaint();
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                if matches!(self.gallery.fetch, FetchState::Loading) {
                    self.gallery.fetch = FetchState::Error("Failed to load data".into());
                }
                self.gallery.rx = None;
            }
        }
    }

    fn poll_detail(&mut self, ctx: &eg::Context) {
        let Some(state) = self.detail.as_mut() else { return };
        let Some(rx) = &state.rx else { return };

        // Fallback sequence and the details themselves arrive separately;
        // drain both. The receiver stays until every sender is gone.
        let mut repaint = false;
        loop {
            match rx.try_recv() {
                Ok(DetailMsg::Loaded(details)) => {
                    self.posters.queue_details(&details);
                    state.fetch = FetchState::Ready(details);
                    repaint = true;
                }
                Ok(DetailMsg::Fallback(ids)) => {
                    state.nav.resolve_fallback(ids);
                    repaint = true;
                }
                Ok(DetailMsg::Failed(msg)) => {
                    state.fetch = FetchState::Error(msg);
                    repaint = true;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if matches!(state.fetch, FetchState::Loading) {
                        state.fetch = FetchState::Error("Failed to load movie details".into());
                    }
                    state.rx = None;
                    break;
                }
            }
        }
        if repaint {
            ctx.request_repaint();
        }
    }

    fn has_work_in_flight(&self) -> bool {
        self.list.rx.is_some()
            || self.gallery.rx.is_some()
            || self.detail.as_ref().is_some_and(|d| d.rx.is_some())
            || self.posters.in_flight() > 0
    }
}

// ========== App impl ==========
impl eframe::App for MexApp {
    fn update(&mut self, ctx: &eg::Context, _frame: &mut eframe::Frame) {
        if !self.did_init {
            self.did_init = true;
            info!("starting up (language={})", self.cfg.language);
            self.start_list_load(ListSource::Popular);
        }

        self.posters.poll(ctx);
        // Drain every receiver, not just the current view's: a load kicked
        // off right before a view switch must still settle (its state is
        // rebuilt on re-entry anyway).
        self.poll_list(ctx);
        self.poll_gallery(ctx);
        self.poll_detail(ctx);

        eg::TopBottomPanel::top("topbar").show(ctx, |ui| {
            self.ui_render_topbar(ui);
        });

        eg::CentralPanel::default().show(ctx, |ui| match self.view {
            View::List => self.ui_render_list(ui),
            View::Gallery => self.ui_render_gallery(ui),
            View::Detail => self.ui_render_detail_page(ui),
        });

        // Keep polling while anything is still in flight.
        if self.has_work_in_flight() {
            ctx.request_repaint_after(Duration::from_millis(120));
        }
    }
}
