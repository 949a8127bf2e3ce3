//! # Lifecycle Configuration
//!
//! Settings for item intake and logging.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PARCEL_MAX_ITEM_LABEL_LEN=120                                      │
//! │     PARCEL_LOG_FILTER=debug                                            │
//! │                                                                         │
//! │  2. TOML Config File (path supplied by the caller)                     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # parcel.toml
//! [items]
//! max_label_len = 200
//!
//! [logging]
//! filter = "info,parcel=debug"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::CoreResult;
use crate::validation::{validate_log_filter, validate_max_label_len};

/// Environment variable overriding `items.max_label_len`.
pub const ENV_MAX_ITEM_LABEL_LEN: &str = "PARCEL_MAX_ITEM_LABEL_LEN";

/// Environment variable overriding `logging.filter`.
pub const ENV_LOG_FILTER: &str = "PARCEL_LOG_FILTER";

// =============================================================================
// Item Settings
// =============================================================================

/// Rules applied when building items from user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSettings {
    /// Longest accepted item label, in characters.
    #[serde(default = "default_max_label_len")]
    pub max_label_len: usize,
}

fn default_max_label_len() -> usize {
    200
}

impl Default for ItemSettings {
    fn default() -> Self {
        ItemSettings {
            max_label_len: default_max_label_len(),
        }
    }
}

// =============================================================================
// Logging Settings
// =============================================================================

/// Structured logging settings, consumed by [`crate::telemetry::init_tracing`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `tracing` filter directives. `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info,parcel=debug".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Lifecycle Config
// =============================================================================

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleConfig {
    /// Rules for building items from user input.
    #[serde(default)]
    pub items: ItemSettings,

    /// Structured logging settings.
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl LifecycleConfig {
    /// Loads configuration from all sources.
    ///
    /// ## Priority (highest to lowest)
    /// 1. Environment variables
    /// 2. Config file, when `config_path` is given and exists
    /// 3. Default values
    pub fn load(config_path: Option<&Path>) -> CoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path {
            if path.exists() {
                info!(?path, "Loading lifecycle config from file");
                let contents = std::fs::read_to_string(path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Like [`load`](Self::load), but falls back to defaults on any error.
    pub fn load_or_default(config_path: Option<&Path>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load lifecycle config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CoreResult<()> {
        validate_max_label_len(self.items.max_label_len)?;
        validate_log_filter(&self.logging.filter)?;
        Ok(())
    }

    /// Applies overrides from the process environment.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from an arbitrary key lookup.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(len) = lookup(ENV_MAX_ITEM_LABEL_LEN) {
            match len.parse::<usize>() {
                Ok(parsed) => {
                    debug!(max_label_len = parsed, "Overriding max label length from environment");
                    self.items.max_label_len = parsed;
                }
                Err(_) => warn!(value = %len, "Ignoring non-numeric {}", ENV_MAX_ITEM_LABEL_LEN),
            }
        }

        if let Some(filter) = lookup(ENV_LOG_FILTER) {
            debug!(filter = %filter, "Overriding log filter from environment");
            self.logging.filter = filter;
        }
    }
}
