use std::{env, fs, path::Path};

use serde::Deserialize;
use tracing::{info, warn};

pub const TOKEN_ENV_VAR: &str = "TMDB_ACCESS_TOKEN";

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// TMDB v4 read access token, sent as a bearer header.
    pub api_token: Option<String>,
    pub language: String,
    pub page: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            language: "en-US".to_string(),
            page: 1,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    api_token: Option<String>,
    language: Option<String>,
    page: Option<u32>,
}

pub fn load_config() -> AppConfig {
    load_config_from(Path::new("config.json"))
}

pub fn load_config_from(cfg_path: &Path) -> AppConfig {
    let mut cfg = AppConfig::default();

    match fs::read_to_string(cfg_path) {
        Ok(raw) => match serde_json::from_str::<RawConfig>(&raw) {
            Ok(parsed) => {
                if parsed.api_token.is_some() {
                    cfg.api_token = parsed.api_token;
                }
                if let Some(lang) = parsed.language {
                    cfg.language = lang;
                }
                if let Some(page) = parsed.page {
                    cfg.page = page.max(1);
                }
                info!("Loaded config from {}", cfg_path.display());
            }
            Err(err) => {
                warn!("Failed to parse {} ({}). Using defaults.", cfg_path.display(), err);
            }
        },
        Err(_) => {
            info!("No {} found; using defaults", cfg_path.display());
        }
    }

    // The token may also come from the environment (takes effect only when
    // the file didn't set one, so a file entry stays authoritative).
    if cfg.api_token.is_none() {
        match env::var(TOKEN_ENV_VAR) {
            Ok(tok) if !tok.trim().is_empty() => {
                cfg.api_token = Some(tok.trim().to_string());
                info!("Using API token from {TOKEN_ENV_VAR}");
            }
            _ => warn!(
                "No API token configured; set `api_token` in config.json or {TOKEN_ENV_VAR}."
            ),
        }
    }

    cfg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{ "api_token": "abc123", "language": "fr-FR", "page": 3 }"#,
        )
        .unwrap();

        let cfg = load_config_from(&path);
        assert_eq!(cfg.api_token.as_deref(), Some("abc123"));
        assert_eq!(cfg.language, "fr-FR");
        assert_eq!(cfg.page, 3);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("nope.json"));
        assert_eq!(cfg.language, "en-US");
        assert_eq!(cfg.page, 1);
    }

    #[test]
    fn garbage_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        let cfg = load_config_from(&path);
        assert_eq!(cfg.language, "en-US");
    }

    #[test]
    fn env_token_fills_in_when_file_omits_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "language": "de-DE" }"#).unwrap();

        env::set_var(TOKEN_ENV_VAR, "env-token");
        let cfg = load_config_from(&path);
        env::remove_var(TOKEN_ENV_VAR);

        assert_eq!(cfg.api_token.as_deref(), Some("env-token"));
        assert_eq!(cfg.language, "de-DE");
    }

    #[test]
    fn page_is_clamped_to_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "page": 0 }"#).unwrap();
        let cfg = load_config_from(&path);
        assert_eq!(cfg.page, 1);
    }
}
