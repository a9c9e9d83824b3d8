//! Persisted UI preferences
//!
//! The shell persists exactly one preference: the tri-state theme choice.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage key the theme preference lives under
pub const THEME_PREFERENCE_KEY: &str = "themePreference";

/// Theme preference chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// Always use light mode
    Light,
    /// Always use dark mode
    Dark,
    /// Follow the platform color scheme
    #[default]
    System,
}

/// Returned when a stored string is not a known preference
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown theme preference: {0}")]
pub struct UnknownThemePreference(pub String);

impl ThemePreference {
    /// Wire form written to the key-value store
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
            ThemePreference::System => "system",
        }
    }

    /// Whether this preference pins a fixed scheme
    pub fn is_explicit(&self) -> bool {
        !matches!(self, ThemePreference::System)
    }

    /// Explicit preference for a dark-mode switch position
    pub fn from_dark_toggle(is_dark: bool) -> Self {
        if is_dark {
            ThemePreference::Dark
        } else {
            ThemePreference::Light
        }
    }
}

impl std::fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ThemePreference {
    type Err = UnknownThemePreference;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            "system" => Ok(ThemePreference::System),
            other => Err(UnknownThemePreference(other.to_string())),
        }
    }
}
