//! Screen controllers
//!
//! Controllers hold the state a screen owns for as long as it is mounted.
//! Rendering is left to the platform layer; what lives here is what the screen
//! decides.

use std::sync::Arc;

use app_state::{
    AuthProvider, AuthProviderError, AuthState, ColorScheme, ThemeController, ThemeStore,
    ThemeUpdate,
};
use serde::{Deserialize, Serialize};
use storage::ThemePreference;
use thiserror::Error;

use crate::navigation::{GuardedNavigator, Route};

/// Screen errors
#[derive(Debug, Error)]
pub enum ScreenError {
    /// No user is available to act on
    #[error("User not loaded")]
    UserNotLoaded,

    /// The authentication provider failed
    #[error("Auth error: {0}")]
    Auth(#[from] AuthProviderError),
}

/// Result type for screen operations
pub type Result<T> = std::result::Result<T, ScreenError>;

// =============================================================================
// Sign In
// =============================================================================

/// What the sign-in screen shows for an auth snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInRender {
    /// Provider still loading
    Nothing,
    /// Credentials form
    Form,
    /// Already signed in; the screen replaced itself with `Route`
    Redirect(Route),
}

/// Sign-in screen
#[derive(Debug, Clone, Copy, Default)]
pub struct SignInScreen;

impl SignInScreen {
    /// Create the screen
    pub fn new() -> Self {
        Self
    }

    /// React to an auth snapshot
    ///
    /// A signed-in user never sees the form: the screen replaces itself with
    /// the home route so it does not stay back-reachable.
    pub fn on_auth(&self, auth: AuthState, navigator: &mut GuardedNavigator) -> SignInRender {
        match auth.session_status() {
            None => SignInRender::Nothing,
            Some(false) => SignInRender::Form,
            Some(true) => {
                let outcome = navigator.replace(Route::Home);
                tracing::debug!(?outcome, "sign-in screen redirecting signed-in user");
                SignInRender::Redirect(Route::Home)
            }
        }
    }
}

// =============================================================================
// Profile
// =============================================================================

/// User record as the authentication provider reports it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// First name
    pub first_name: Option<String>,
    /// Last name
    pub last_name: Option<String>,
    /// Display name
    pub full_name: Option<String>,
    /// Primary email address
    pub primary_email: Option<String>,
    /// All email addresses
    #[serde(default)]
    pub email_addresses: Vec<String>,
    /// Avatar URL
    pub image_url: Option<String>,
    /// Whether the primary email is verified
    #[serde(default)]
    pub email_verified: bool,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Display values derived from a [`UserProfile`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    /// Name shown under the avatar
    pub full_name: String,
    /// Avatar fallback letters
    pub initials: String,
    /// Email shown under the name; empty when unknown
    pub email: String,
    /// Avatar image
    pub avatar_url: Option<String>,
    /// "Verified" or "Unverified"
    pub email_status: &'static str,
}

impl ProfileSummary {
    /// Derive display values, falling back when fields are missing
    pub fn from_user(user: Option<&UserProfile>) -> Self {
        let first = user.and_then(|u| non_empty(&u.first_name)).unwrap_or_default();
        let last = user.and_then(|u| non_empty(&u.last_name)).unwrap_or_default();

        let full_name = match user.and_then(|u| non_empty(&u.full_name)) {
            Some(name) => name.to_string(),
            None => {
                let joined = [first, last]
                    .iter()
                    .filter(|s| !s.is_empty())
                    .copied()
                    .collect::<Vec<_>>()
                    .join(" ");
                if joined.is_empty() {
                    "User".to_string()
                } else {
                    joined
                }
            }
        };

        let initials: String = format!("{first}{last}").chars().take(2).collect::<String>().to_uppercase();
        let initials = if initials.is_empty() { "U".to_string() } else { initials };

        let email = user
            .and_then(|u| {
                non_empty(&u.primary_email)
                    .or_else(|| u.email_addresses.iter().map(String::as_str).find(|e| !e.is_empty()))
            })
            .unwrap_or_default()
            .to_string();

        let verified = user.is_some_and(|u| u.email_verified);

        Self {
            full_name,
            initials,
            email,
            avatar_url: user.and_then(|u| non_empty(&u.image_url)).map(str::to_string),
            email_status: if verified { "Verified" } else { "Unverified" },
        }
    }
}

/// Appearance card state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppearanceView {
    /// Dark-mode switch position
    pub dark_switch: bool,
    /// "Use system setting" is the active choice
    pub follows_system: bool,
    /// Scheme currently rendered
    pub effective: ColorScheme,
}

/// Profile screen
///
/// Owns a [`ThemeController`] for as long as it is mounted. Dropping the
/// screen tears the controller down, so theme loads and saves still in
/// flight stop touching it.
pub struct ProfileScreen {
    theme: Arc<ThemeController>,
    store: Arc<ThemeStore>,
    auth: Arc<dyn AuthProvider>,
    user: Option<UserProfile>,
}

impl std::fmt::Debug for ProfileScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileScreen")
            .field("theme", &self.theme)
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

impl ProfileScreen {
    /// Create the screen for `user`; `None` while the user record is loading
    pub fn new(
        store: Arc<ThemeStore>,
        auth: Arc<dyn AuthProvider>,
        user: Option<UserProfile>,
    ) -> Self {
        Self {
            theme: Arc::new(store.controller()),
            store,
            auth,
            user,
        }
    }

    /// Create the screen and load the persisted preference
    pub async fn mount(
        store: Arc<ThemeStore>,
        auth: Arc<dyn AuthProvider>,
        user: Option<UserProfile>,
    ) -> Self {
        let screen = Self::new(store, auth, user);
        screen.load_theme().await;
        screen
    }

    /// Load the persisted preference into the screen
    pub async fn load_theme(&self) -> ThemePreference {
        self.theme.load().await
    }

    /// Theme controller, for work that may outlive the screen
    pub fn theme(&self) -> Arc<ThemeController> {
        Arc::clone(&self.theme)
    }

    /// Whether the user record is available
    pub fn is_loaded(&self) -> bool {
        self.user.is_some()
    }

    /// Display values for the header card
    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary::from_user(self.user.as_ref())
    }

    /// Appearance card state
    pub fn appearance(&self) -> AppearanceView {
        AppearanceView {
            dark_switch: self.theme.is_dark(),
            follows_system: self.theme.follows_system(),
            effective: self.store.current_scheme(),
        }
    }

    /// Dark-mode switch changed position
    pub async fn toggle_theme(&self, is_dark: bool) -> ThemeUpdate {
        self.theme.toggle_dark(is_dark).await
    }

    /// "Use system setting" pressed
    pub async fn use_system_theme(&self) -> ThemeUpdate {
        self.theme.set_system().await
    }

    /// Sign out
    pub async fn sign_out(&self) -> Result<()> {
        self.auth.sign_out().await?;
        tracing::info!("signed out from profile");
        Ok(())
    }

    /// Clear the session of the loaded user
    ///
    /// Returns the route the stack must be replaced with once the session
    /// partition is gone.
    pub async fn clear_session(&self) -> Result<Route> {
        if self.user.is_none() {
            return Err(ScreenError::UserNotLoaded);
        }
        self.sign_out().await?;
        Ok(Route::SignIn)
    }
}

impl Drop for ProfileScreen {
    fn drop(&mut self) {
        self.theme.teardown();
    }
}
