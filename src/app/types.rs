// src/app/types.rs
use std::sync::mpsc::Receiver;

use crate::app::nav::{MovieId, Navigator};
use crate::tmdb::{Genre, MovieDetails, MovieSummary};

// ---- cross-thread messages / data ----

pub enum ListMsg {
    Loaded(Vec<MovieSummary>),
    Failed(String),
}

pub enum GalleryMsg {
    Loaded {
        movies: Vec<MovieSummary>,
        genres: Vec<Genre>,
    },
    Failed(String),
}

pub enum DetailMsg {
    Loaded(Box<MovieDetails>),
    /// Default popular-movies id order; sent only when no sequence was
    /// inherited from the originating view.
    Fallback(Vec<MovieId>),
    Failed(String),
}

// ---- view display states ----

pub enum FetchState<T> {
    Loading,
    Error(String),
    Ready(T),
}

// ---- UI controls ----

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    ReleaseDate,
    VoteAverage,
    Popularity,
}

impl SortKey {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::ReleaseDate => "Release Date",
            Self::VoteAverage => "Rating",
            Self::Popularity => "Popularity",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "↑",
            Self::Descending => "↓",
        }
    }
}

#[derive(Clone, Debug)]
pub struct GenreOption {
    pub id: u64,
    pub name: String,
    pub selected: bool,
}

// ---- view routing ----

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum View {
    List,
    Gallery,
    Detail,
}

/// What the list view is currently showing: the default popular page, or the
/// results of an explicit remote search.
#[derive(Clone)]
pub enum ListSource {
    Popular,
    Search(String),
}

// ---- per-view state (discarded and rebuilt on every view entry) ----

pub struct ListState {
    pub fetch: FetchState<Vec<MovieSummary>>,
    pub source: ListSource,
    pub query: String,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    pub rx: Option<Receiver<ListMsg>>,
}

impl ListState {
    pub fn new() -> Self {
        Self {
            fetch: FetchState::Loading,
            source: ListSource::Popular,
            query: String::new(),
            sort_key: SortKey::Title,
            sort_order: SortOrder::Ascending,
            rx: None,
        }
    }
}

pub struct GalleryState {
    pub fetch: FetchState<Vec<MovieSummary>>,
    pub options: Vec<GenreOption>,
    pub rx: Option<Receiver<GalleryMsg>>,
}

impl GalleryState {
    pub fn new() -> Self {
        Self {
            fetch: FetchState::Loading,
            options: Vec::new(),
            rx: None,
        }
    }
}

pub struct DetailState {
    pub id: MovieId,
    pub fetch: FetchState<Box<MovieDetails>>,
    pub nav: Navigator,
    pub rx: Option<Receiver<DetailMsg>>,
}

impl DetailState {
    pub fn new(id: MovieId, inherited: Option<Vec<MovieId>>) -> Self {
        Self {
            id,
            fetch: FetchState::Loading,
            nav: Navigator::new(inherited),
            rx: None,
        }
    }
}
