//! # Client Configuration
//!
//! Settings that are not part of the positional startup arguments.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STORELINE_DB_HOST=db.internal                                      │
//! │     STORELINE_NEARBY_RADIUS=45                                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config PATH, or                                                  │
//! │     ~/.config/storeline/storeline.toml (Linux)                         │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     localhost, radius 30, 5 recent / popular rows                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storeline.toml
//! [database]
//! host = "localhost"
//! password = ""
//! connect_timeout_secs = 10
//!
//! [shopping]
//! nearby_radius = 30.0
//! recent_limit = 5
//! popular_limit = 5
//! allow_negative_stock = true
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use storeline_core::{DEFAULT_NEARBY_RADIUS, DEFAULT_POPULAR_LIMIT, DEFAULT_RECENT_LIMIT};
use tracing::{debug, info, warn};

use crate::error::ConfigError;

// =============================================================================
// Database Settings
// =============================================================================

/// Connection details not given on the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Server host. Default: localhost
    pub host: String,

    /// Password for the startup USER. Empty means none.
    pub password: String,

    /// Seconds to wait for the connection. Default: 10
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            host: "localhost".to_string(),
            password: String::new(),
            connect_timeout_secs: 10,
        }
    }
}

// =============================================================================
// Shopping Settings
// =============================================================================

/// Tunables for the customer and manager operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShoppingSettings {
    /// Distance within which a store counts as nearby (inclusive).
    pub nearby_radius: f64,

    /// Rows shown by "recent orders" and "recent product updates".
    pub recent_limit: u32,

    /// Rows shown by "popular items" and "popular customers".
    pub popular_limit: u32,

    /// When false, an order larger than the stock on hand is refused.
    pub allow_negative_stock: bool,
}

impl Default for ShoppingSettings {
    fn default() -> Self {
        ShoppingSettings {
            nearby_radius: DEFAULT_NEARBY_RADIUS,
            recent_limit: DEFAULT_RECENT_LIMIT,
            popular_limit: DEFAULT_POPULAR_LIMIT,
            allow_negative_stock: true,
        }
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub shopping: ShoppingSettings,
}

impl Settings {
    /// Loads settings: defaults, then the TOML file, then the environment.
    ///
    /// ## Arguments
    /// * `config_path` - Explicit file. Must exist. When `None`, the
    ///   per-user config file is read if present.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut settings = match config_path {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path)),
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(path)?,
                _ => {
                    debug!("No config file, using defaults");
                    Self::default()
                }
            },
        };

        settings.apply_overrides(|key| std::env::var(key).ok());
        settings.validate()?;
        Ok(settings)
    }

    fn from_file(path: PathBuf) -> Result<Self, ConfigError> {
        info!(?path, "Loading config from file");
        let contents =
            std::fs::read_to_string(&path).map_err(|source| ConfigError::Read { path, source })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies `STORELINE_*` overrides read through `lookup`.
    ///
    /// Unparseable numeric or boolean values are ignored with a warning.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("STORELINE_DB_HOST") {
            debug!(host = %host, "Overriding database host from environment");
            self.database.host = host;
        }

        if let Some(password) = lookup("STORELINE_DB_PASSWORD") {
            self.database.password = password;
        }

        if let Some(radius) = lookup("STORELINE_NEARBY_RADIUS") {
            match radius.parse::<f64>() {
                Ok(r) => self.shopping.nearby_radius = r,
                Err(_) => warn!(value = %radius, "Ignoring STORELINE_NEARBY_RADIUS"),
            }
        }

        if let Some(allow) = lookup("STORELINE_ALLOW_NEGATIVE_STOCK") {
            match allow.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => self.shopping.allow_negative_stock = true,
                "0" | "false" | "no" => self.shopping.allow_negative_stock = false,
                _ => warn!(value = %allow, "Ignoring STORELINE_ALLOW_NEGATIVE_STOCK"),
            }
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.host.trim().is_empty() {
            return Err(ConfigError::Invalid("database.host must not be empty".into()));
        }

        let radius = self.shopping.nearby_radius;
        if !radius.is_finite() || radius < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "shopping.nearby_radius must be a non-negative number, got {radius}"
            )));
        }

        if self.shopping.recent_limit == 0 || self.shopping.popular_limit == 0 {
            return Err(ConfigError::Invalid(
                "shopping.recent_limit and shopping.popular_limit must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storeline", "storeline")
            .map(|dirs| dirs.config_dir().join("storeline.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.database.host, "localhost");
        assert_eq!(settings.shopping.nearby_radius, 30.0);
        assert_eq!(settings.shopping.recent_limit, 5);
        assert!(settings.shopping.allow_negative_stock);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[shopping]\nnearby_radius = 45.5\nallow_negative_stock = false").unwrap();

        let settings = Settings::from_file(file.path().to_path_buf()).unwrap();
        assert_eq!(settings.shopping.nearby_radius, 45.5);
        assert!(!settings.shopping.allow_negative_stock);
        assert_eq!(settings.shopping.popular_limit, 5);
        assert_eq!(settings.database.host, "localhost");
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            Settings::load(Some(missing)),
            Err(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn test_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[shopping\nnearby_radius = ").unwrap();
        assert!(matches!(
            Settings::from_file(file.path().to_path_buf()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = Settings::default();
        settings.apply_overrides(lookup(&[
            ("STORELINE_DB_HOST", "db.internal"),
            ("STORELINE_NEARBY_RADIUS", "12.5"),
            ("STORELINE_ALLOW_NEGATIVE_STOCK", "no"),
        ]));

        assert_eq!(settings.database.host, "db.internal");
        assert_eq!(settings.shopping.nearby_radius, 12.5);
        assert!(!settings.shopping.allow_negative_stock);
    }

    #[test]
    fn test_bad_env_values_are_ignored() {
        let mut settings = Settings::default();
        settings.apply_overrides(lookup(&[
            ("STORELINE_NEARBY_RADIUS", "far"),
            ("STORELINE_ALLOW_NEGATIVE_STOCK", "maybe"),
        ]));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_validation() {
        let mut settings = Settings::default();
        settings.shopping.nearby_radius = -1.0;
        assert!(settings.validate().is_err());

        settings.shopping.nearby_radius = 30.0;
        settings.shopping.recent_limit = 0;
        assert!(settings.validate().is_err());

        settings.shopping.recent_limit = 5;
        settings.database.host = " ".into();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&Settings::default()).unwrap();
        assert!(toml_str.contains("[database]"));
        assert!(toml_str.contains("[shopping]"));
    }
}
