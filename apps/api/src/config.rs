//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. The denomination table optionally comes from a TOML file:
//!
//! ```toml
//! [[denominations]]
//! value_minor_units = 100
//! label_singular = "dollar"
//! label_plural = "dollars"
//!
//! [[denominations]]
//! value_minor_units = 1
//! label_singular = "penny"
//! label_plural = "pennies"
//! ```
//!
//! Lookup order for the file: `TENDER_DENOMINATIONS_FILE`, then
//! `denominations.toml` in the platform config directory
//! (`~/.config/tender/` on Linux). Neither present → US table.

use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use tender_core::validation::validate_random_divisor;
use tender_core::{DenominationTable, MAX_INPUT_BYTES};

/// File name looked up in the platform config directory.
const DENOMINATIONS_FILE_NAME: &str = "denominations.toml";

/// API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP port
    pub port: u16,

    /// Interface to bind
    pub bind_addr: String,

    /// SQLite file for the transaction log; `None` disables storage
    pub database_path: Option<PathBuf>,

    /// Default random divisor (0 disables randomized change)
    pub random_divisor: i64,

    /// Largest accepted batch body in bytes
    pub max_input_bytes: usize,

    /// Explicit denomination table file
    pub denominations_file: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            port: 3001,
            bind_addr: "0.0.0.0".to_string(),
            database_path: None,
            random_divisor: tender_core::policy::DEFAULT_RANDOM_DIVISOR,
            max_input_bytes: MAX_INPUT_BYTES,
            denominations_file: None,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup (the process
    /// environment in production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ApiConfig::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = ApiConfig {
            port: parse_or(non_empty("TENDER_PORT"), "TENDER_PORT", defaults.port)?,

            bind_addr: non_empty("TENDER_BIND_ADDR").unwrap_or(defaults.bind_addr),

            database_path: non_empty("TENDER_DATABASE_PATH").map(PathBuf::from),

            random_divisor: parse_or(
                non_empty("TENDER_RANDOM_DIVISOR"),
                "TENDER_RANDOM_DIVISOR",
                defaults.random_divisor,
            )?,

            max_input_bytes: parse_or(
                non_empty("TENDER_MAX_INPUT_BYTES"),
                "TENDER_MAX_INPUT_BYTES",
                defaults.max_input_bytes,
            )?,

            denominations_file: non_empty("TENDER_DENOMINATIONS_FILE").map(PathBuf::from),
        };

        validate_random_divisor(config.random_divisor)
            .map_err(|_| ConfigError::InvalidValue("TENDER_RANDOM_DIVISOR".to_string()))?;

        if config.max_input_bytes == 0 {
            return Err(ConfigError::InvalidValue("TENDER_MAX_INPUT_BYTES".to_string()));
        }

        Ok(config)
    }

    /// `bind_addr:port`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Resolves and loads the denomination table.
    pub fn load_denominations(&self) -> Result<DenominationTable, ConfigError> {
        if let Some(path) = &self.denominations_file {
            return load_denominations_file(path);
        }

        match Self::default_denominations_path() {
            Some(path) if path.exists() => load_denominations_file(&path),
            _ => {
                debug!("No denominations file, using US table");
                Ok(DenominationTable::us())
            }
        }
    }

    /// `denominations.toml` in the platform config directory.
    pub fn default_denominations_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "tender", "tender")
            .map(|dirs| dirs.config_dir().join(DENOMINATIONS_FILE_NAME))
    }
}

#[derive(Debug, Deserialize)]
struct DenominationsFile {
    denominations: DenominationTable,
}

/// Parses a `[[denominations]]` TOML file. Table invariants are checked
/// during deserialization.
pub fn load_denominations_file(path: &Path) -> Result<DenominationTable, ConfigError> {
    info!(?path, "Loading denomination table");

    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_denominations(&contents).map_err(|message| ConfigError::InvalidDenominations {
        path: path.to_path_buf(),
        message,
    })
}

fn parse_denominations(contents: &str) -> Result<DenominationTable, String> {
    toml::from_str::<DenominationsFile>(contents)
        .map(|file| file.denominations)
        .map_err(|e| e.to_string())
}

fn parse_or<T: std::str::FromStr>(
    value: Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid denomination table in {path}: {message}")]
    InvalidDenominations { path: PathBuf, message: String },
}
