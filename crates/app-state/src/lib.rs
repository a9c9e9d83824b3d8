//! Application state management for Vision Shell
//!
//! This crate owns the stateful half of the screen layer: the session gate
//! that decides which navigation partition is mounted, the splash overlay
//! coordinator, and the persisted theme preference with its per-view
//! liveness tracking.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod color_scheme;
pub mod liveness;
pub mod session;
pub mod splash;
pub mod theme;

pub use auth::{AuthProvider, AuthProviderError, AuthState, WatchAuthProvider};
pub use color_scheme::{ColorScheme, ColorSchemeBridge, DeviceColorScheme, SchemeOverride};
pub use liveness::Liveness;
pub use session::{GateState, GateTransition, Partition, SessionGate};
pub use splash::{SplashCoordinator, SplashOverlay};
pub use theme::{ThemeController, ThemeError, ThemeStore, ThemeUpdate};
