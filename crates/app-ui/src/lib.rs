//! User interface layer for Vision Shell
//!
//! This crate turns the state in `app-state` into what the screen layer
//! shows: which routes exist and which partition they belong to, the guarded
//! navigation stack, the footer tab bar, and the navigation theme derived from
//! the effective color scheme.
//!
//! # Modules
//!
//! - [`navigation`] - Routes, partitions, the guarded stack and tab resolution
//! - [`footer`] - Footer tab bar model
//! - [`theme`] - Navigation palettes and status bar style
//! - [`screens`] - Screen controllers with lifecycle-bound state
//!
//! # Example
//!
//! ```rust
//! use app_ui::navigation::{resolve_active_tab, NavigationTab};
//!
//! assert_eq!(resolve_active_tab("/profile/index"), Some(NavigationTab::Profile));
//! assert_eq!(resolve_active_tab("/unknown"), None);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod footer;
pub mod navigation;
pub mod screens;
pub mod theme;

pub use footer::{Footer, FooterTab};
pub use navigation::{
    resolve_active_tab, GuardedNavigator, NavigationOutcome, NavigationStack, NavigationTab,
    Presentation, Route, Router, ScreenOptions, StackEntry,
};
pub use screens::{AppearanceView, ProfileScreen, ProfileSummary, ScreenError, SignInRender, SignInScreen, UserProfile};
pub use theme::{nav_theme, NavColors, NavTheme, StatusBarStyle, TabIconColors};
