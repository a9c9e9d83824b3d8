//! Shell configuration
//!
//! Defaults suit a device build. Every field can be overridden from the
//! environment:
//!
//! - `VISION_SHELL_KV_PATH` - path of the on-disk key-value store
//! - `VISION_SHELL_IN_MEMORY` - `true`/`false`, keep preferences in memory only
//! - `VISION_SHELL_LOG` - default log filter directives

use storage::{KvConfig, THEME_PREFERENCE_KEY};
use thiserror::Error;

/// Environment variable naming the key-value store path
pub const ENV_KV_PATH: &str = "VISION_SHELL_KV_PATH";
/// Environment variable selecting the in-memory store
pub const ENV_IN_MEMORY: &str = "VISION_SHELL_IN_MEMORY";
/// Environment variable holding the default log filter
pub const ENV_LOG: &str = "VISION_SHELL_LOG";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable is set but its value cannot be used
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue {
        /// Variable name
        name: &'static str,
        /// Offending value
        value: String,
    },
}

/// Result type for configuration
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Shell configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// On-disk store settings
    pub kv: KvConfig,
    /// Keep preferences in memory only
    pub in_memory: bool,
    /// Storage key of the theme preference
    pub theme_key: String,
    /// Default log filter; `RUST_LOG` takes precedence
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            kv: KvConfig::default(),
            in_memory: false,
            theme_key: THEME_PREFERENCE_KEY.to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Configuration for tests and demos: nothing touches the disk
    pub fn in_memory() -> Self {
        Self { in_memory: true, ..Default::default() }
    }

    /// Set the store settings
    pub fn kv(mut self, kv: KvConfig) -> Self {
        self.kv = kv;
        self
    }

    /// Keep preferences in memory only
    pub fn use_in_memory(mut self, enabled: bool) -> Self {
        self.in_memory = enabled;
        self
    }

    /// Persist the theme preference under a different key
    pub fn theme_key(mut self, key: impl Into<String>) -> Self {
        self.theme_key = key.into();
        self
    }

    /// Set the default log filter
    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_KV_PATH) {
            if path.trim().is_empty() {
                return Err(ConfigError::InvalidValue { name: ENV_KV_PATH, value: path });
            }
            config.kv.path = path;
        }

        if let Some(value) = lookup(ENV_IN_MEMORY) {
            config.in_memory = parse_bool(&value)
                .ok_or(ConfigError::InvalidValue { name: ENV_IN_MEMORY, value })?;
        }

        if let Some(filter) = lookup(ENV_LOG) {
            if !filter.trim().is_empty() {
                config.log_filter = filter;
            }
        }

        Ok(config)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
