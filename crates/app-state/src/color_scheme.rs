//! Color-scheme bridge
//!
//! The runtime facility that reports and overrides light-vs-dark rendering.
//! The theme store pushes the user's preference into it; it never reads the
//! preference back.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use storage::ThemePreference;

/// Rendered color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Light rendering
    #[default]
    Light,
    /// Dark rendering
    Dark,
}

impl ColorScheme {
    /// Scheme name
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }

    /// Whether this is the dark scheme
    pub fn is_dark(&self) -> bool {
        matches!(self, ColorScheme::Dark)
    }
}

impl From<ColorScheme> for ThemePreference {
    fn from(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => ThemePreference::Light,
            ColorScheme::Dark => ThemePreference::Dark,
        }
    }
}

/// Override handed to the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemeOverride {
    /// Force light
    Light,
    /// Force dark
    Dark,
    /// Follow the platform
    #[default]
    System,
}

impl From<ThemePreference> for SchemeOverride {
    fn from(preference: ThemePreference) -> Self {
        match preference {
            ThemePreference::Light => SchemeOverride::Light,
            ThemePreference::Dark => SchemeOverride::Dark,
            ThemePreference::System => SchemeOverride::System,
        }
    }
}

/// Runtime color-scheme signal
#[cfg_attr(test, mockall::automock)]
pub trait ColorSchemeBridge: Send + Sync {
    /// Effective scheme being rendered
    fn current(&self) -> ColorScheme;

    /// Pin a scheme or go back to following the platform
    fn set_override(&self, value: SchemeOverride);
}

#[derive(Debug, Clone, Copy)]
struct DeviceSchemeState {
    platform: ColorScheme,
    override_value: SchemeOverride,
}

/// Bridge combining the device-reported scheme with an app override
#[derive(Debug)]
pub struct DeviceColorScheme {
    state: RwLock<DeviceSchemeState>,
}

impl Default for DeviceColorScheme {
    fn default() -> Self {
        Self::new(ColorScheme::default())
    }
}

impl DeviceColorScheme {
    /// Create a bridge following the platform, which reports `platform`
    pub fn new(platform: ColorScheme) -> Self {
        Self {
            state: RwLock::new(DeviceSchemeState {
                platform,
                override_value: SchemeOverride::System,
            }),
        }
    }

    /// The device reported a new platform scheme
    pub fn set_platform_scheme(&self, scheme: ColorScheme) {
        self.state.write().platform = scheme;
    }

    /// Scheme the platform currently reports
    pub fn platform_scheme(&self) -> ColorScheme {
        self.state.read().platform
    }

    /// Override currently in force
    pub fn override_value(&self) -> SchemeOverride {
        self.state.read().override_value
    }
}

impl ColorSchemeBridge for DeviceColorScheme {
    fn current(&self) -> ColorScheme {
        let state = self.state.read();
        match state.override_value {
            SchemeOverride::Light => ColorScheme::Light,
            SchemeOverride::Dark => ColorScheme::Dark,
            SchemeOverride::System => state.platform,
        }
    }

    fn set_override(&self, value: SchemeOverride) {
        self.state.write().override_value = value;
        tracing::debug!(?value, "color scheme override set");
    }
}
