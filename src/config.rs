//! Runtime configuration, read once at startup from the environment (and `.env`).

use crate::error::ConfigError;
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 8000;

/// Selects error disclosure and default log verbosity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuntimeMode {
    Production,
    Development,
    Test,
}

impl RuntimeMode {
    pub fn is_production(self) -> bool {
        matches!(self, RuntimeMode::Production)
    }
}

impl FromStr for RuntimeMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" => Ok(RuntimeMode::Production),
            "development" | "" => Ok(RuntimeMode::Development),
            "test" => Ok(RuntimeMode::Test),
            _ => Err(ConfigError::InvalidMode(s.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub mode: RuntimeMode,
    /// PostgreSQL connection string. `None` runs against the in-memory row store.
    pub database_url: Option<String>,
    pub port: u16,
}

impl AppConfig {
    /// Reads `APP_ENV`, `DATABASE_URL` and `PORT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mode = match lookup("APP_ENV") {
            Some(v) => v.parse()?,
            None => RuntimeMode::Development,
        };
        let database_url = lookup("DATABASE_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let port = match lookup("PORT") {
            Some(v) => v
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(v.clone()))?,
            None => DEFAULT_PORT,
        };
        Ok(AppConfig {
            mode,
            database_url,
            port,
        })
    }

    /// Config for tests and embedding: given mode, in-memory store, default port.
    pub fn for_mode(mode: RuntimeMode) -> Self {
        AppConfig {
            mode,
            database_url: None,
            port: DEFAULT_PORT,
        }
    }

    /// Default `EnvFilter` directives when `RUST_LOG` is unset.
    pub fn log_directives(&self) -> &'static str {
        if self.mode.is_production() {
            "blogful=info,tower_http=info"
        } else {
            "blogful=debug,tower_http=debug"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_to_development_in_memory() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.mode, RuntimeMode::Development);
        assert!(config.database_url.is_none());
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.log_directives(), "blogful=debug,tower_http=debug");
    }

    #[test]
    fn reads_production_settings() {
        let config = config_from(&[
            ("APP_ENV", "Production"),
            ("DATABASE_URL", "postgres://localhost/blogful"),
            ("PORT", "9090"),
        ])
        .unwrap();
        assert!(config.mode.is_production());
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/blogful"));
        assert_eq!(config.port, 9090);
        assert_eq!(config.log_directives(), "blogful=info,tower_http=info");
    }

    #[test]
    fn blank_database_url_means_memory_store() {
        let config = config_from(&[("DATABASE_URL", "  ")]).unwrap();
        assert!(config.database_url.is_none());
    }

    #[test]
    fn rejects_unknown_mode_and_bad_port() {
        assert!(matches!(
            config_from(&[("APP_ENV", "staging")]),
            Err(ConfigError::InvalidMode(_))
        ));
        assert!(matches!(
            config_from(&[("PORT", "eighty")]),
            Err(ConfigError::InvalidPort(_))
        ));
    }
}
