//! Service configuration
//!
//! Configuration is a single JSON file. Every field is optional; missing
//! fields take the defaults below.
//!
//! ```json
//! {
//!   "database": {"url": "sqlite::memory:", "max_connections": 5, "acquire_timeout_ms": 5000},
//!   "http": {"host": "0.0.0.0", "port": 8080, "cors_origins": []},
//!   "logging": {"format": "pretty", "filter": "notesd=info,tower_http=info"}
//! }
//! ```

mod errors;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;

pub use errors::{ConfigError, ConfigResult};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub http: HttpServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a JSON file and validate it.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Load from `path` when the file exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate configuration from a JSON string.
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: Config =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Render as pretty JSON, the format `load` reads.
    pub fn to_json_pretty(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Check cross-field constraints serde cannot express.
    pub fn validate(&self) -> ConfigResult<()> {
        self.database.validate()?;
        if self.http.port == 0 {
            return Err(ConfigError::invalid("http.port", "must be > 0"));
        }
        if let Some(origin) = self.http.first_invalid_origin() {
            return Err(ConfigError::invalid(
                "http.cors_origins",
                format!("'{}' is not a valid origin", origin.escape_debug()),
            ));
        }
        Ok(())
    }
}

/// Embedded database settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx SQLite URL (default: in-memory)
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Pool size for file-backed databases. In-memory databases always
    /// use a single connection.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// How long a request waits for a pooled connection
    #[serde(default = "default_acquire_timeout_ms")]
    pub acquire_timeout_ms: u64,
}

fn default_database_url() -> String {
    "sqlite::memory:".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout_ms() -> u64 {
    5000
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            acquire_timeout_ms: default_acquire_timeout_ms(),
        }
    }
}

impl DatabaseConfig {
    /// Config for a file-backed database at `path`.
    pub fn file(path: &Path) -> Self {
        Self {
            url: format!("sqlite://{}", path.display()),
            ..Default::default()
        }
    }

    /// Whether the URL names a private in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }

    fn validate(&self) -> ConfigResult<()> {
        if !self.url.starts_with("sqlite:") {
            return Err(ConfigError::invalid(
                "database.url",
                format!("'{}' is not a sqlite URL", self.url),
            ));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::invalid("database.max_connections", "must be > 0"));
        }
        if self.acquire_timeout_ms == 0 {
            return Err(ConfigError::invalid("database.acquire_timeout_ms", "must be > 0"));
        }
        Ok(())
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines for development
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,

    /// `EnvFilter` directives; `RUST_LOG` takes precedence when set
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "notesd=info,tower_http=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: default_log_filter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.database.url, "sqlite::memory:");
        assert!(config.database.is_in_memory());
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = Config::from_json(r#"{"database": {"max_connections": 2}}"#).unwrap();
        assert_eq!(config.database.max_connections, 2);
        assert_eq!(config.database.acquire_timeout_ms, 5000);
        assert_eq!(config.database.url, "sqlite::memory:");
    }

    #[test]
    fn test_rejects_non_sqlite_url() {
        let err = Config::from_json(r#"{"database": {"url": "postgres://localhost/notes"}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "database.url"));
    }

    #[test]
    fn test_rejects_zero_pool() {
        let err = Config::from_json(r#"{"database": {"max_connections": 0}}"#).unwrap_err();
        assert_eq!(err.code(), "NOTES_CONFIG_INVALID");
    }

    #[test]
    fn test_rejects_unusable_cors_origin() {
        let err = Config::from_json(r#"{"http": {"cors_origins": ["http://ok.test", "bad\norigin"]}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "http.cors_origins"));

        let err = Config::from_json(r#"{"http": {"cors_origins": ["*"]}}"#).unwrap_err();
        assert_eq!(err.code(), "NOTES_CONFIG_INVALID");
    }

    #[test]
    fn test_accepts_listed_cors_origins() {
        let config =
            Config::from_json(r#"{"http": {"cors_origins": ["https://notes.example.com"]}}"#).unwrap();
        assert_eq!(config.http.cors_origins, vec!["https://notes.example.com"]);
    }

    #[test]
    fn test_rejects_unknown_log_format() {
        let err = Config::from_json(r#"{"logging": {"format": "xml"}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_file_url_is_not_memory() {
        let config = DatabaseConfig::file(Path::new("/tmp/notes.db"));
        assert_eq!(config.url, "sqlite:///tmp/notes.db");
        assert!(!config.is_in_memory());
    }

    #[test]
    fn test_load_round_trips_written_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notesd.json");
        let mut config = Config::default();
        config.http.port = 9191;
        fs::write(&path, config.to_json_pretty().unwrap()).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_or_default_without_file() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load_or_default(&tmp.path().join("missing.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let tmp = TempDir::new().unwrap();
        let err = Config::load(&tmp.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
