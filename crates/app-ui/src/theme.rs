//! Navigation palettes and scheme-dependent chrome
//!
//! The effective [`ColorScheme`] reported by the color-scheme bridge selects
//! everything here: the navigation container palette, the status bar content
//! style, and the footer icon tint.
//!
//! # Usage
//!
//! ```rust
//! use app_state::ColorScheme;
//! use app_ui::theme::{nav_theme, StatusBarStyle};
//!
//! let theme = nav_theme(Some(ColorScheme::Dark));
//! assert!(theme.dark);
//! assert_eq!(StatusBarStyle::for_scheme(Some(ColorScheme::Dark)), StatusBarStyle::Light);
//! ```

use app_state::ColorScheme;
use serde::{Deserialize, Serialize};

// =============================================================================
// Color Types
// =============================================================================

/// A color represented as an RGBA hex string (e.g., "#FFFFFF" or "#FFFFFF80")
pub type Color = &'static str;

/// Tailwind-style swatches used by the shell
pub mod swatch {
    /// Pure white
    pub const WHITE: &str = "#FFFFFF";
    /// Neutral 50
    pub const NEUTRAL_50: &str = "#FAFAFA";
    /// Neutral 200
    pub const NEUTRAL_200: &str = "#E5E5E5";
    /// Neutral 800
    pub const NEUTRAL_800: &str = "#262626";
    /// Neutral 900
    pub const NEUTRAL_900: &str = "#171717";
    /// Neutral 950
    pub const NEUTRAL_950: &str = "#0A0A0A";
    /// Red 500
    pub const RED_500: &str = "#EF4444";
    /// Red 600
    pub const RED_600: &str = "#DC2626";
    /// Emerald 400
    pub const EMERALD_400: &str = "#34D399";
    /// Emerald 600
    pub const EMERALD_600: &str = "#059669";
    /// Muted foreground at 70% (light)
    pub const MUTED_LIGHT: &str = "#737373B3";
    /// Muted foreground at 60% (dark)
    pub const MUTED_DARK: &str = "#A3A3A399";
}

// =============================================================================
// Navigation Theme
// =============================================================================

/// Colors handed to the navigation container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavColors {
    /// Screen background
    pub background: Color,
    /// Hairlines and header borders
    pub border: Color,
    /// Cards and headers
    pub card: Color,
    /// Badges
    pub notification: Color,
    /// Tint for active elements
    pub primary: Color,
    /// Body text
    pub text: Color,
}

/// Navigation container theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavTheme {
    /// Whether this is a dark theme
    pub dark: bool,
    /// Palette
    pub colors: NavColors,
}

impl NavTheme {
    /// Light navigation theme
    pub const LIGHT: NavTheme = NavTheme {
        dark: false,
        colors: NavColors {
            background: swatch::WHITE,
            border: swatch::NEUTRAL_200,
            card: swatch::WHITE,
            notification: swatch::RED_500,
            primary: swatch::NEUTRAL_900,
            text: swatch::NEUTRAL_950,
        },
    };

    /// Dark navigation theme
    pub const DARK: NavTheme = NavTheme {
        dark: true,
        colors: NavColors {
            background: swatch::NEUTRAL_950,
            border: swatch::NEUTRAL_800,
            card: swatch::NEUTRAL_950,
            notification: swatch::RED_600,
            primary: swatch::NEUTRAL_50,
            text: swatch::NEUTRAL_50,
        },
    };
}

/// Navigation theme for the effective scheme; light when unknown
pub fn nav_theme(scheme: Option<ColorScheme>) -> NavTheme {
    match scheme.unwrap_or_default() {
        ColorScheme::Light => NavTheme::LIGHT,
        ColorScheme::Dark => NavTheme::DARK,
    }
}

// =============================================================================
// Status Bar
// =============================================================================

/// Status bar content style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusBarStyle {
    /// Light content, for dark backgrounds
    Light,
    /// Dark content, for light backgrounds
    Dark,
}

impl StatusBarStyle {
    /// Content style contrasting with the effective scheme
    pub fn for_scheme(scheme: Option<ColorScheme>) -> Self {
        match scheme {
            Some(ColorScheme::Dark) => StatusBarStyle::Light,
            _ => StatusBarStyle::Dark,
        }
    }
}

// =============================================================================
// Footer Icons
// =============================================================================

/// Footer icon tints for one scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TabIconColors {
    /// Highlighted tab
    pub active: Color,
    /// Every other tab
    pub inactive: Color,
}

impl TabIconColors {
    /// Tints for the effective scheme
    pub fn for_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => Self {
                active: swatch::EMERALD_600,
                inactive: swatch::MUTED_LIGHT,
            },
            ColorScheme::Dark => Self {
                active: swatch::EMERALD_400,
                inactive: swatch::MUTED_DARK,
            },
        }
    }

    /// Tint for a tab given whether it is highlighted
    pub fn tint(&self, active: bool) -> Color {
        if active {
            self.active
        } else {
            self.inactive
        }
    }
}
