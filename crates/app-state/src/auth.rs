//! Authentication provider seam
//!
//! The shell never authenticates anyone itself. It reads readiness and
//! signed-in status from an [`AuthProvider`] and may ask it to sign out.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;

/// Authentication provider errors
#[derive(Debug, Error)]
pub enum AuthProviderError {
    /// The provider has not finished initializing
    #[error("Authentication provider is not loaded")]
    NotLoaded,
}

/// Result type for authentication provider operations
pub type Result<T> = std::result::Result<T, AuthProviderError>;

/// Snapshot of the authentication provider's state
///
/// `is_signed_in` carries no meaning while `is_loaded` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    /// Provider has finished initializing
    pub is_loaded: bool,
    /// A user session is active
    pub is_signed_in: bool,
}

impl AuthState {
    /// Provider still initializing
    pub const fn loading() -> Self {
        Self { is_loaded: false, is_signed_in: false }
    }

    /// Loaded with an active session
    pub const fn signed_in() -> Self {
        Self { is_loaded: true, is_signed_in: true }
    }

    /// Loaded without a session
    pub const fn signed_out() -> Self {
        Self { is_loaded: true, is_signed_in: false }
    }

    /// Signed-in status, only once the provider is loaded
    pub fn session_status(&self) -> Option<bool> {
        self.is_loaded.then_some(self.is_signed_in)
    }
}

/// Authentication provider consumed by the shell
///
/// State changes are pushed through a watch channel; the shell re-evaluates
/// on every change.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Current state
    fn state(&self) -> AuthState;

    /// Subscribe to state changes
    fn subscribe(&self) -> watch::Receiver<AuthState>;

    /// End the active session
    async fn sign_out(&self) -> Result<()>;
}

/// In-process provider backed by a watch channel
///
/// Used by tests and demos, and as the adapter a platform auth SDK feeds its
/// callbacks into.
#[derive(Debug)]
pub struct WatchAuthProvider {
    tx: watch::Sender<AuthState>,
}

impl Default for WatchAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl WatchAuthProvider {
    /// Create a provider that is still loading
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(AuthState::loading());
        Self { tx }
    }

    /// Create a provider with an initial state
    pub fn with_state(state: AuthState) -> Self {
        let (tx, _rx) = watch::channel(state);
        Self { tx }
    }

    /// Publish a new state; duplicates do not notify subscribers
    pub fn set_state(&self, state: AuthState) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == state {
                false
            } else {
                *current = state;
                true
            }
        })
    }

    /// Mark initialization complete
    pub fn finish_loading(&self, is_signed_in: bool) -> bool {
        self.set_state(AuthState { is_loaded: true, is_signed_in })
    }

    /// Start a session
    pub fn sign_in(&self) -> bool {
        self.set_state(AuthState::signed_in())
    }
}

#[async_trait]
impl AuthProvider for WatchAuthProvider {
    fn state(&self) -> AuthState {
        *self.tx.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.tx.subscribe()
    }

    async fn sign_out(&self) -> Result<()> {
        if !self.state().is_loaded {
            return Err(AuthProviderError::NotLoaded);
        }
        self.set_state(AuthState::signed_out());
        tracing::info!("session ended");
        Ok(())
    }
}
