//! Configuration file parser for ~/.config/cook/config.toml.
//!
//! The config file is optional; a missing file yields `Config::default()`.
//! Unknown keys are accepted and logged as warnings. Precedence, highest
//! first: command-line flags, the `COOK_API_URL` environment variable, the
//! file, built-in defaults.
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Environment variable overriding `api_base_url`.
pub const API_URL_ENV: &str = "COOK_API_URL";

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_CATALOG_URL: &str = "https://www.themealdb.com/api/json/v1/1/categories.php";

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),

    #[error("Invalid URL for {key}: {reason}")]
    InvalidUrl { key: &'static str, reason: String },
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Which view the app opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartView {
    #[default]
    Home,
    Favourites,
}

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base address of the account backend (login, favourites, logout).
    pub api_base_url: String,

    /// Full address of the category catalog endpoint.
    pub catalog_url: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    pub start_view: StartView,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            request_timeout_secs: 30,
            start_view: StartView::Home,
        }
    }
}

/// Validated addresses handed to the API clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub api_base: Url,
    pub catalog: Url,
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 4] = [
        "api_base_url",
        "catalog_url",
        "request_timeout_secs",
        "start_view",
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)`
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(path = %path.display(), api = %config.api_base_url, "Loaded configuration");
        Ok(config)
    }

    /// Apply environment overrides through `lookup` (normally `std::env::var`).
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            tracing::debug!(env = API_URL_ENV, "API base URL overridden by environment");
            self.api_base_url = url.trim().to_string();
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Parse and check both addresses. Only `http` and `https` are accepted.
    pub fn endpoints(&self) -> Result<Endpoints, ConfigError> {
        Ok(Endpoints {
            api_base: parse_http_url("api_base_url", &self.api_base_url)?,
            catalog: parse_http_url("catalog_url", &self.catalog_url)?,
        })
    }
}

fn parse_http_url(key: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl {
        key,
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ConfigError::InvalidUrl {
                key,
                reason: format!("unsupported scheme '{}'", other),
            })
        }
    }
    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl {
            key,
            reason: "missing host".to_string(),
        });
    }
    Ok(url)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(name: &str, content: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(name);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert!(config.catalog_url.contains("themealdb.com"));
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.start_view, StartView::Home);
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/cook_test_nonexistent_config.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_empty_file_returns_default() {
        let path = write_config("cook_config_test_empty", "  \n ");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.request_timeout_secs, 30);
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_full_config() {
        let path = write_config(
            "cook_config_test_full",
            r#"
api_base_url = "https://api.cook.example.com/v1"
catalog_url = "https://catalog.example.com/categories.php"
request_timeout_secs = 10
start_view = "favourites"
"#,
        );
        let config = Config::load(&path).unwrap();
        assert_eq!(config.api_base_url, "https://api.cook.example.com/v1");
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.start_view, StartView::Favourites);
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let path = write_config(
            "cook_config_test_unknown",
            "api_base_url = \"http://localhost:9000\"\ntheme = \"dark\"\n",
        );
        let config = Config::load(&path).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:9000");
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let path = write_config("cook_config_test_invalid", "this is not [valid toml");
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Invalid TOML"));
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_unknown_start_view_is_error() {
        let path = write_config("cook_config_test_view", "start_view = \"settings\"\n");
        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::Parse(_))
        ));
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_too_large_file_rejected() {
        let path = write_config("cook_config_test_too_large", &"a".repeat(1_048_577));
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge(_)));
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_env_overrides_file_value() {
        let mut config = Config::default();
        config.apply_env(|key| {
            (key == API_URL_ENV).then(|| " https://backend.example.com ".to_string())
        });
        assert_eq!(config.api_base_url, "https://backend.example.com");
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let mut config = Config::default();
        config.apply_env(|_| Some("   ".to_string()));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_endpoints_parse() {
        let endpoints = Config::default().endpoints().unwrap();
        assert_eq!(endpoints.api_base.as_str(), "http://localhost:8000/");
        assert_eq!(endpoints.catalog.host_str(), Some("www.themealdb.com"));
    }

    #[test]
    fn test_endpoints_reject_bad_scheme() {
        let config = Config {
            api_base_url: "ftp://files.example.com".to_string(),
            ..Config::default()
        };
        let err = config.endpoints().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { key: "api_base_url", .. }));
    }

    #[test]
    fn test_endpoints_reject_garbage() {
        let config = Config {
            catalog_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            config.endpoints(),
            Err(ConfigError::InvalidUrl { key: "catalog_url", .. })
        ));
    }

    #[test]
    fn test_zero_timeout_clamped() {
        let config = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }
}
