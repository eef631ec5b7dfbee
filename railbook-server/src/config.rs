//! Application configuration
//!
//! Loaded from a TOML file (default `railbook.toml`), then overridden by
//! environment variables:
//! - `DATABASE_URL`: database connection string
//! - `RAILBOOK_BIND`: listen address
//! - `RAILBOOK_AUTHOR`: value served by `/hello/app_var`
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:3000"
//! cors_permissive = false
//!
//! [database]
//! url = "sqlite://railbook.db"
//! max_connections = 5
//!
//! [app]
//! author = "Jane"
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::pool::DEFAULT_MAX_CONNECTIONS;

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "railbook.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid bind address '{value}'")]
    InvalidBind { value: String },
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub app: AppSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: SocketAddr,
    /// Allow any origin. Off means localhost origins only.
    pub cors_permissive: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cors_permissive: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: "sqlite://railbook.db".to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

/// Settings read by request handlers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSection {
    pub author: Option<String>,
}

impl AppConfig {
    /// Parse configuration from TOML text. Missing keys take defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load from an explicit file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Load `path` if given, else `railbook.toml` if it exists, else
    /// defaults. Environment overrides are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Self::default()
                }
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (the environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }

        if let Some(bind) = lookup("RAILBOOK_BIND") {
            self.server.bind = bind
                .parse()
                .map_err(|_| ConfigError::InvalidBind { value: bind })?;
        }

        if let Some(author) = lookup("RAILBOOK_AUTHOR") {
            self.app.author = Some(author);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind.port(), 3000);
        assert!(!config.server.cors_permissive);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.app.author, None);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str("[app]\nauthor = \"Jane\"\n").unwrap();
        assert_eq!(config.app.author.as_deref(), Some("Jane"));
        assert_eq!(config.database, DatabaseSection::default());
    }

    #[test]
    fn full_toml() {
        let config = AppConfig::from_toml_str(
            r#"
            [server]
            bind = "0.0.0.0:8080"
            cors_permissive = true

            [database]
            url = "sqlite::memory:"
            max_connections = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.server.bind, "0.0.0.0:8080".parse().unwrap());
        assert!(config.server.cors_permissive);
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.max_connections, 2);
    }

    #[test]
    fn rejects_bad_toml() {
        let err = AppConfig::from_toml_str("[server]\nbind = 42\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("DATABASE_URL", "sqlite://override.db"),
            ("RAILBOOK_AUTHOR", "Jane"),
            ("RAILBOOK_BIND", "127.0.0.1:4000"),
        ]);
        let mut config = AppConfig::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.database.url, "sqlite://override.db");
        assert_eq!(config.app.author.as_deref(), Some("Jane"));
        assert_eq!(config.server.bind.port(), 4000);
    }

    #[test]
    fn bad_bind_override() {
        let mut config = AppConfig::default();
        let err = config
            .apply_overrides(|key| (key == "RAILBOOK_BIND").then(|| "nowhere".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBind { .. }));
    }

    #[test]
    fn reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[app]\nauthor = \"From File\"").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.app.author.as_deref(), Some("From File"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = AppConfig::from_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
