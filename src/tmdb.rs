// src/tmdb.rs
use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use tracing::debug;

use crate::config::AppConfig;

const BASE_URL: &str = "https://api.themoviedb.org/3";
const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
const HTTP_TIMEOUT: Duration = Duration::from_secs(20);

// ---- image URL rule ----

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageSize {
    W200,
    W300,
    W500,
    Original,
}

impl ImageSize {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::W200 => "w200",
            Self::W300 => "w300",
            Self::W500 => "w500",
            Self::Original => "original",
        }
    }
}

/// CDN URL for a poster/backdrop path. `None` means "no artwork" — the UI
/// paints its placeholder card instead of fetching anything.
pub fn image_url(path: Option<&str>, size: ImageSize) -> Option<String> {
    let path = path.filter(|p| !p.is_empty())?;
    Some(format!("{IMAGE_BASE_URL}/{}{path}", size.as_str()))
}

// ---- errors ----

#[derive(Debug)]
pub enum TmdbError {
    MissingToken,
    Transport(String),
    Status { code: u16 },
    Decode(String),
}

impl TmdbError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { code: 404 })
    }
}

impl fmt::Display for TmdbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingToken => {
                write!(f, "no API token configured (config.json or TMDB_ACCESS_TOKEN)")
            }
            Self::Transport(msg) => write!(f, "request failed: {msg}"),
            Self::Status { code } => write!(f, "API returned HTTP {code}"),
            Self::Decode(msg) => write!(f, "unexpected response shape: {msg}"),
        }
    }
}

impl std::error::Error for TmdbError {}

// ---- wire models ----

#[derive(Clone, Debug, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MoviePage {
    pub page: u32,
    pub results: Vec<MovieSummary>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct GenreListResponse {
    genres: Vec<Genre>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ProductionCompany {
    pub id: u64,
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ProductionCountry {
    pub iso_3166_1: String,
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SpokenLanguage {
    pub iso_639_1: String,
    #[serde(default)]
    pub english_name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Runtime in minutes; TMDB reports 0 or null for unknown.
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub budget: u64,
    #[serde(default)]
    pub revenue: u64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub production_countries: Vec<ProductionCountry>,
    #[serde(default)]
    pub spoken_languages: Vec<SpokenLanguage>,
}

// ---- client ----

#[derive(Clone)]
pub struct TmdbClient {
    http: Client,
    language: String,
}

impl TmdbClient {
    pub fn new(cfg: &AppConfig) -> Result<Self, TmdbError> {
        let token = cfg
            .api_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(TmdbError::MissingToken)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| TmdbError::Transport(format!("bad token header: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = Client::builder()
            .user_agent(concat!("mex/", env!("CARGO_PKG_VERSION")))
            .timeout(HTTP_TIMEOUT)
            .pool_max_idle_per_host(4)
            .default_headers(headers)
            .build()
            .map_err(|e| TmdbError::Transport(format!("http client build failed: {e}")))?;

        Ok(Self {
            http,
            language: cfg.language.clone(),
        })
    }

    pub fn popular_movies(&self, page: u32) -> Result<MoviePage, TmdbError> {
        let url = format!(
            "{BASE_URL}/movie/popular?language={}&page={}",
            self.language, page
        );
        self.get_json(&url)
    }

    pub fn search_movies(&self, query: &str, page: u32) -> Result<MoviePage, TmdbError> {
        let url = format!(
            "{BASE_URL}/search/movie?query={}&language={}&page={}",
            urlencoding::encode(query),
            self.language,
            page
        );
        self.get_json(&url)
    }

    pub fn movie_details(&self, id: u64) -> Result<MovieDetails, TmdbError> {
        let url = format!("{BASE_URL}/movie/{id}?language={}", self.language);
        self.get_json(&url)
    }

    pub fn genre_list(&self) -> Result<Vec<Genre>, TmdbError> {
        let url = format!("{BASE_URL}/genre/movie/list?language={}", self.language);
        let resp: GenreListResponse = self.get_json(&url)?;
        Ok(resp.genres)
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, TmdbError> {
        debug!("GET {url}");
        let resp = self
            .http
            .get(url)
            .send()
            .map_err(|e| TmdbError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TmdbError::Status {
                code: status.as_u16(),
            });
        }

        let body = resp
            .text()
            .map_err(|e| TmdbError::Transport(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| TmdbError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_url_builds_cdn_path() {
        assert_eq!(
            image_url(Some("/abc.jpg"), ImageSize::W300).as_deref(),
            Some("https://image.tmdb.org/t/p/w300/abc.jpg")
        );
        assert_eq!(
            image_url(Some("/abc.jpg"), ImageSize::Original).as_deref(),
            Some("https://image.tmdb.org/t/p/original/abc.jpg")
        );
    }

    #[test]
    fn image_url_absent_or_empty_path_is_none() {
        assert_eq!(image_url(None, ImageSize::W300), None);
        assert_eq!(image_url(Some(""), ImageSize::W500), None);
    }

    #[test]
    fn decodes_popular_page() {
        let body = r#"{
            "page": 1,
            "results": [{
                "id": 550,
                "title": "Fight Club",
                "overview": "A ticking-time-bomb insomniac...",
                "release_date": "1999-10-15",
                "vote_average": 8.4,
                "vote_count": 27000,
                "popularity": 61.4,
                "poster_path": "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg",
                "backdrop_path": null,
                "genre_ids": [18, 53]
            }],
            "total_pages": 500,
            "total_results": 10000
        }"#;
        let page: MoviePage = serde_json::from_str(body).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.results.len(), 1);
        let m = &page.results[0];
        assert_eq!(m.id, 550);
        assert_eq!(m.genre_ids, vec![18, 53]);
        assert!(m.backdrop_path.is_none());
    }

    #[test]
    fn decodes_details_with_missing_optionals() {
        let body = r#"{
            "id": 550,
            "title": "Fight Club",
            "overview": "",
            "tagline": "Mischief. Mayhem. Soap.",
            "release_date": "1999-10-15",
            "vote_average": 8.4,
            "vote_count": 27000,
            "runtime": 139,
            "budget": 63000000,
            "revenue": 100853753,
            "status": "Released",
            "genres": [{"id": 18, "name": "Drama"}],
            "production_companies": [{"id": 508, "name": "Regency Enterprises"}],
            "production_countries": [{"iso_3166_1": "US", "name": "United States of America"}],
            "spoken_languages": [{"iso_639_1": "en", "english_name": "English"}]
        }"#;
        let d: MovieDetails = serde_json::from_str(body).unwrap();
        assert_eq!(d.runtime, Some(139));
        assert_eq!(d.genres[0].name, "Drama");
        assert_eq!(d.spoken_languages[0].english_name, "English");
        // popularity is absent above; defaults rather than failing
        assert_eq!(d.popularity, 0.0);
    }

    #[test]
    fn decodes_genre_catalog() {
        let body = r#"{"genres":[{"id":28,"name":"Action"},{"id":35,"name":"Comedy"}]}"#;
        let resp: GenreListResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.genres.len(), 2);
        assert_eq!(resp.genres[1], Genre { id: 35, name: "Comedy".into() });
    }

    #[test]
    fn not_found_is_distinguishable_but_uniformly_printable() {
        let err = TmdbError::Status { code: 404 };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "API returned HTTP 404");
        assert!(!TmdbError::Status { code: 500 }.is_not_found());
    }
}
