//! # Engine Configuration
//!
//! Settings for the pricing store and the engine's display/validation
//! behaviour.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PRINTDESK_DB_PATH=/var/lib/printdesk/pricing.db                    │
//! │     PRINTDESK_STRICT_VALIDATION=true                                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/printdesk/pricing.toml (Linux)                           │
//! │     ~/Library/Application Support/com.printdesk.printdesk/pricing.toml │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # pricing.toml
//! [database]
//! path = "pricing.db"
//! max_connections = 5
//!
//! [pricing]
//! currency_symbol = "₱"
//! currency_decimals = 2
//! strict_validation = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};
use printdesk_core::{CurrencyFormat, ValidationMode};

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "pricing.toml";

// =============================================================================
// Sections
// =============================================================================

/// `[database]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file; created on first connect.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("pricing.db")
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// `[pricing]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    #[serde(default = "default_currency_decimals")]
    pub currency_decimals: u8,

    /// Adds name, price and duplicate-id checks on save.
    #[serde(default)]
    pub strict_validation: bool,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_currency_decimals() -> u8 {
    2
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            currency_symbol: default_currency_symbol(),
            currency_decimals: default_currency_decimals(),
            strict_validation: false,
        }
    }
}

// =============================================================================
// Engine Config
// =============================================================================

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub pricing: PricingSettings,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else `pricing.toml` in the platform dir)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => {
                info!(?path, "Loading engine config from file");
                Self::from_file(&path)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML file without env overrides or validation.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("database.path must not be empty".into()));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be greater than 0".into(),
            ));
        }

        // 10^18 still fits in i64 cents
        if self.pricing.currency_decimals > 18 {
            return Err(ConfigError::Invalid(
                "pricing.currency_decimals must be at most 18".into(),
            ));
        }

        Ok(())
    }

    /// Applies `PRINTDESK_*` overrides read through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("PRINTDESK_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = PathBuf::from(path);
        }

        if let Some(max) = lookup("PRINTDESK_DB_MAX_CONNECTIONS") {
            match max.parse::<u32>() {
                Ok(n) => self.database.max_connections = n,
                Err(_) => warn!(value = %max, "Invalid PRINTDESK_DB_MAX_CONNECTIONS"),
            }
        }

        if let Some(symbol) = lookup("PRINTDESK_CURRENCY_SYMBOL") {
            self.pricing.currency_symbol = symbol;
        }

        if let Some(decimals) = lookup("PRINTDESK_CURRENCY_DECIMALS") {
            match decimals.parse::<u8>() {
                Ok(n) => self.pricing.currency_decimals = n,
                Err(_) => warn!(value = %decimals, "Invalid PRINTDESK_CURRENCY_DECIMALS"),
            }
        }

        if let Some(strict) = lookup("PRINTDESK_STRICT_VALIDATION") {
            match strict.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.pricing.strict_validation = true,
                "0" | "false" | "no" | "off" => self.pricing.strict_validation = false,
                _ => warn!(value = %strict, "Invalid PRINTDESK_STRICT_VALIDATION"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "printdesk", "printdesk")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn currency_format(&self) -> CurrencyFormat {
        CurrencyFormat::new(
            self.pricing.currency_symbol.clone(),
            self.pricing.currency_decimals,
        )
    }

    pub fn validation_mode(&self) -> ValidationMode {
        ValidationMode::from_strict_flag(self.pricing.strict_validation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.database.path, PathBuf::from("pricing.db"));
        assert_eq!(config.currency_format(), CurrencyFormat::default());
        assert_eq!(config.validation_mode(), ValidationMode::Standard);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: EngineConfig = toml::from_str(
            r#"
            [pricing]
            currency_symbol = "₱"
            strict_validation = true
            "#,
        )
        .unwrap();

        assert_eq!(config.pricing.currency_symbol, "₱");
        assert_eq!(config.pricing.currency_decimals, 2);
        assert_eq!(config.validation_mode(), ValidationMode::Strict);
        assert_eq!(config.database, DatabaseSettings::default());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = EngineConfig::default();
        config.apply_env_overrides(env(&[
            ("PRINTDESK_DB_PATH", "/tmp/override.db"),
            ("PRINTDESK_DB_MAX_CONNECTIONS", "2"),
            ("PRINTDESK_STRICT_VALIDATION", "yes"),
            ("PRINTDESK_CURRENCY_DECIMALS", "not-a-number"),
        ]));

        assert_eq!(config.database.path, PathBuf::from("/tmp/override.db"));
        assert_eq!(config.database.max_connections, 2);
        assert!(config.pricing.strict_validation);
        assert_eq!(config.pricing.currency_decimals, 2);
    }

    #[test]
    fn test_config_validation() {
        let mut config = EngineConfig::default();
        config.database.max_connections = 0;
        assert!(config.validate().is_err());

        config.database.max_connections = 1;
        config.pricing.currency_decimals = 19;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_explicit_file() {
        let path = std::env::temp_dir().join(format!(
            "printdesk-config-test-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[database]\nmax_connections = 3\n").unwrap();

        let config = EngineConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.database.max_connections, 3);
        assert_eq!(config.database.path, PathBuf::from("pricing.db"));
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = EngineConfig::default().to_toml().unwrap();
        assert!(toml_str.contains("[database]"));
        assert!(toml_str.contains("[pricing]"));
    }
}
