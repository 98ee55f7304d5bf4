//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Ledger behaviour configuration.
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Ledger configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Prefix for human-readable entry numbers (`JE-2025-00001`).
    #[serde(default = "default_entry_number_prefix")]
    pub entry_number_prefix: String,
    /// Number of digits in the entry number sequence.
    #[serde(default = "default_sequence_width")]
    pub sequence_width: usize,
    /// Ledger currency label. The ledger never converts currencies.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Name prefix hashed with the tenant id to derive the municipality entity.
    #[serde(default = "default_municipality_namespace")]
    pub municipality_namespace: String,
}

fn default_entry_number_prefix() -> String {
    "JE".to_string()
}

fn default_sequence_width() -> usize {
    5
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_municipality_namespace() -> String {
    "MUNICIPALITY-".to_string()
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            entry_number_prefix: default_entry_number_prefix(),
            sequence_width: default_sequence_width(),
            currency: default_currency(),
            municipality_namespace: default_municipality_namespace(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "muniledger=debug,sea_orm=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Reads `.env` first, then `config/default`, `config/{RUN_MODE}` and
    /// `MUNILEDGER__*` environment variables, later sources winning.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("MUNILEDGER").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_config_defaults() {
        let ledger = LedgerConfig::default();
        assert_eq!(ledger.entry_number_prefix, "JE");
        assert_eq!(ledger.sequence_width, 5);
        assert_eq!(ledger.currency, "USD");
        assert_eq!(ledger.municipality_namespace, "MUNICIPALITY-");
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("MUNILEDGER__DATABASE__URL", Some("sqlite::memory:")),
                ("MUNILEDGER__LEDGER__SEQUENCE_WIDTH", Some("6")),
                ("RUN_MODE", Some("test-nonexistent")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.database.url, "sqlite::memory:");
                assert_eq!(config.database.max_connections, 10);
                assert_eq!(config.ledger.sequence_width, 6);
                assert_eq!(config.ledger.entry_number_prefix, "JE");
                assert!(!config.logging.json);
            },
        );
    }

    #[test]
    fn test_load_requires_database_url() {
        temp_env::with_vars(
            [
                ("MUNILEDGER__DATABASE__URL", None::<&str>),
                ("RUN_MODE", Some("test-nonexistent")),
            ],
            || {
                assert!(AppConfig::load().is_err());
            },
        );
    }
}
