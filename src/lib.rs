//! Vision Shell
//!
//! Screen layer of the Vision client: a session-gated navigation root, the
//! startup splash hand-off, and the persisted light/dark/system preference.
//!
//! [`RootLayout`] wires the workspace crates together:
//!
//! - `storage` persists the theme preference
//! - `app-state` turns auth snapshots into a mounted partition and owns the
//!   theme store
//! - `app-ui` guards the navigation stack and derives footer and chrome
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use app_state::{ColorScheme, DeviceColorScheme, SplashOverlay, WatchAuthProvider};
//! use vision_shell::{AppConfig, RootLayout};
//!
//! struct NoSplash;
//! impl SplashOverlay for NoSplash {
//!     fn prevent_auto_hide(&self) {}
//!     fn hide(&self) {}
//! }
//!
//! let auth = Arc::new(WatchAuthProvider::new());
//! let bridge = Arc::new(DeviceColorScheme::new(ColorScheme::Light));
//! let mut shell = RootLayout::from_config(&AppConfig::in_memory(), auth.clone(), Arc::new(NoSplash), bridge).unwrap();
//!
//! assert!(shell.render().splash_visible);
//! auth.finish_loading(false);
//! shell.sync();
//! assert_eq!(shell.render().route, Some(app_ui::Route::SignIn));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod logging;

use std::sync::Arc;

use app_state::{
    AuthProvider, AuthState, ColorSchemeBridge, GateState, GateTransition, Partition, SessionGate,
    SplashCoordinator, SplashOverlay, ThemeStore,
};
use app_ui::{
    nav_theme, Footer, GuardedNavigator, NavTheme, NavigationOutcome, NavigationTab, ProfileScreen,
    Route, ScreenError, ScreenOptions, SignInRender, SignInScreen, StatusBarStyle, UserProfile,
};
use storage::{KeyValueStore, KvError, KvStore, MemoryStore};
use thiserror::Error;
use tokio::sync::watch;

pub use config::{AppConfig, ConfigError};
pub use logging::init_logging;

/// Shell errors
#[derive(Debug, Error)]
pub enum ShellError {
    /// Preference store could not be opened
    #[error("Storage error: {0}")]
    Storage(#[from] KvError),

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A screen action failed
    #[error("Screen error: {0}")]
    Screen(#[from] ScreenError),
}

/// Result type for shell operations
pub type Result<T> = std::result::Result<T, ShellError>;

/// Everything the platform layer needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Splash overlay still up
    pub splash_visible: bool,
    /// Partition whose screens are mounted
    pub partition: Option<Partition>,
    /// Screen on top of the stack
    pub route: Option<Route>,
    /// Header options of the top screen
    pub options: Option<ScreenOptions>,
    /// Footer, only with the session partition
    pub footer: Option<Footer>,
    /// Status bar content style
    pub status_bar: StatusBarStyle,
    /// Navigation container palette
    pub nav_theme: NavTheme,
    /// Sign-in screen decision for the last auth change it saw
    pub sign_in: Option<SignInRender>,
}

/// Application root
///
/// Holds the single source of truth for which partition is mounted and
/// re-evaluates it on every auth change the provider publishes.
pub struct RootLayout {
    auth: Arc<dyn AuthProvider>,
    changes: watch::Receiver<AuthState>,
    splash: SplashCoordinator,
    gate: SessionGate,
    navigator: GuardedNavigator,
    sign_in: SignInScreen,
    sign_in_render: Option<SignInRender>,
    theme_store: Arc<ThemeStore>,
    profile: Option<ProfileScreen>,
    user: Option<UserProfile>,
}

impl std::fmt::Debug for RootLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RootLayout")
            .field("gate", &self.gate)
            .field("splash", &self.splash)
            .field("navigator", &self.navigator)
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}

impl RootLayout {
    /// Create the root; the splash overlay is held until the provider loads
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        overlay: Arc<dyn SplashOverlay>,
        theme_store: Arc<ThemeStore>,
    ) -> Self {
        let changes = auth.subscribe();
        Self {
            auth,
            changes,
            splash: SplashCoordinator::new(overlay),
            gate: SessionGate::new(),
            navigator: GuardedNavigator::new(),
            sign_in: SignInScreen::new(),
            sign_in_render: None,
            theme_store,
            profile: None,
            user: None,
        }
    }

    /// Create the root with the preference store described by `config`
    pub fn from_config(
        config: &AppConfig,
        auth: Arc<dyn AuthProvider>,
        overlay: Arc<dyn SplashOverlay>,
        bridge: Arc<dyn ColorSchemeBridge>,
    ) -> Result<Self> {
        let kv: Arc<dyn KeyValueStore> = if config.in_memory {
            Arc::new(MemoryStore::new())
        } else {
            Arc::new(KvStore::new(config.kv.clone())?)
        };
        let store = ThemeStore::new(kv, bridge).with_key(config.theme_key.clone());

        tracing::info!(in_memory = config.in_memory, key = %config.theme_key, "shell starting");
        Ok(Self::new(auth, overlay, Arc::new(store)))
    }

    /// Read the environment, start logging, and create the root
    pub fn from_env(
        auth: Arc<dyn AuthProvider>,
        overlay: Arc<dyn SplashOverlay>,
        bridge: Arc<dyn ColorSchemeBridge>,
    ) -> Result<Self> {
        let config = AppConfig::from_env()?;
        init_logging(&config.log_filter);
        Self::from_config(&config, auth, overlay, bridge)
    }

    /// Apply an auth snapshot
    ///
    /// Returns the partition transition it caused, if any.
    pub fn handle_auth(&mut self, auth: AuthState) -> Option<GateTransition> {
        self.splash.observe(auth);

        let on_sign_in = self.navigator.current_route() == Some(Route::SignIn);
        let transition = self.gate.apply(auth);
        if transition.is_some_and(|t| t.swaps_partition()) {
            self.navigator.mount(self.gate.mounted_partition());
            self.reconcile_screens();
        }

        self.sign_in_render = if on_sign_in || self.navigator.current_route() == Some(Route::SignIn) {
            Some(self.sign_in.on_auth(auth, &mut self.navigator))
        } else {
            None
        };

        transition
    }

    /// Apply the provider's latest snapshot
    pub fn sync(&mut self) -> Option<GateTransition> {
        let auth = *self.changes.borrow_and_update();
        self.handle_auth(auth)
    }

    /// Wait for the next auth change and apply it
    ///
    /// Returns `false` once the provider has gone away.
    pub async fn next_change(&mut self) -> bool {
        if self.changes.changed().await.is_err() {
            tracing::debug!("auth provider closed");
            return false;
        }
        self.sync();
        true
    }

    /// Apply auth changes until the provider goes away
    pub async fn run(&mut self) {
        self.sync();
        while self.next_change().await {}
    }

    /// Drop screens that are no longer on the stack
    fn reconcile_screens(&mut self) {
        let profile_mounted = self
            .navigator
            .stack()
            .is_some_and(|stack| stack.routes().contains(&Route::Profile));
        if !profile_mounted && self.profile.take().is_some() {
            tracing::debug!("profile screen unmounted");
        }
    }

    /// Current gate state
    pub fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    /// Navigation stack
    pub fn navigator(&self) -> &GuardedNavigator {
        &self.navigator
    }

    /// Shared theme store
    pub fn theme_store(&self) -> &Arc<ThemeStore> {
        &self.theme_store
    }

    /// Profile screen, while mounted
    pub fn profile(&self) -> Option<&ProfileScreen> {
        self.profile.as_ref()
    }

    /// User record shown by the profile screen
    pub fn set_user(&mut self, user: Option<UserProfile>) {
        self.user = user;
    }

    /// Navigate to a route
    pub async fn navigate(&mut self, route: Route) -> NavigationOutcome {
        let outcome = self.navigator.navigate(route);
        self.after_navigation().await;
        outcome
    }

    /// Navigate to whatever route a path names
    pub async fn navigate_path(&mut self, path: &str) -> NavigationOutcome {
        let outcome = self.navigator.navigate_path(path);
        self.after_navigation().await;
        outcome
    }

    /// A footer tab was pressed
    pub async fn press_tab(&mut self, tab: NavigationTab) -> NavigationOutcome {
        if !self.navigator.footer_visible() {
            return NavigationOutcome::Unmounted;
        }
        let outcome = Footer::press(tab, &mut self.navigator);
        self.after_navigation().await;
        outcome
    }

    /// Go back one screen
    pub fn go_back(&mut self) -> bool {
        let popped = self.navigator.go_back();
        self.reconcile_screens();
        popped
    }

    async fn after_navigation(&mut self) {
        self.reconcile_screens();
        if self.navigator.current_route() == Some(Route::Profile) && self.profile.is_none() {
            let screen = ProfileScreen::mount(
                Arc::clone(&self.theme_store),
                Arc::clone(&self.auth),
                self.user.clone(),
            )
            .await;
            self.profile = Some(screen);
        }
    }

    /// Sign out from the profile screen
    pub async fn sign_out(&mut self) -> Result<()> {
        match &self.profile {
            Some(profile) => profile.sign_out().await?,
            None => self.auth.sign_out().await.map_err(ScreenError::from)?,
        }
        self.sync();
        Ok(())
    }

    /// Clear the session from the profile screen
    pub async fn clear_session(&mut self) -> Result<NavigationOutcome> {
        let route = match &self.profile {
            Some(profile) => profile.clear_session().await?,
            None => return Err(ScreenError::UserNotLoaded.into()),
        };
        self.sync();
        Ok(self.navigator.replace(route))
    }

    /// Describe the current frame
    pub fn render(&self) -> Frame {
        let scheme = self.theme_store.current_scheme();
        let route = self.navigator.current_route();

        Frame {
            splash_visible: self.splash.is_visible(),
            partition: self.gate.mounted_partition(),
            route,
            options: route.map(|r| r.options()),
            footer: Footer::for_navigator(&self.navigator, scheme),
            status_bar: StatusBarStyle::for_scheme(Some(scheme)),
            nav_theme: nav_theme(Some(scheme)),
            sign_in: self.sign_in_render,
        }
    }
}
