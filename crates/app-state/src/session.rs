//! Session gate
//!
//! An explicit finite-state router deciding which navigation partition is
//! mounted. The state is a pure function of the latest [`AuthState`]:
//!
//! | `is_loaded` | `is_signed_in` | state             | partition   |
//! |-------------|----------------|-------------------|-------------|
//! | false       | (ignored)      | `Uninitialized`   | none        |
//! | true        | false          | `Unauthenticated` | AuthOnly    |
//! | true        | true           | `Authenticated`   | SessionOnly |

use serde::{Deserialize, Serialize};

use crate::auth::AuthState;

/// Mutually exclusive screen sets gated by authentication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Partition {
    /// Sign-in, sign-up and password recovery screens
    AuthOnly,
    /// Screens that need an active session
    SessionOnly,
}

/// Session gate state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GateState {
    /// Provider not ready; nothing is mounted
    #[default]
    Uninitialized,
    /// Provider ready, no session
    Unauthenticated,
    /// Provider ready, session active
    Authenticated,
}

impl GateState {
    /// Transition target for an auth snapshot
    pub fn from_auth(auth: AuthState) -> Self {
        match auth.session_status() {
            None => GateState::Uninitialized,
            Some(false) => GateState::Unauthenticated,
            Some(true) => GateState::Authenticated,
        }
    }

    /// Partition mounted in this state
    pub fn partition(&self) -> Option<Partition> {
        match self {
            GateState::Uninitialized => None,
            GateState::Unauthenticated => Some(Partition::AuthOnly),
            GateState::Authenticated => Some(Partition::SessionOnly),
        }
    }

    /// The footer belongs to the session partition only
    pub fn footer_visible(&self) -> bool {
        matches!(self, GateState::Authenticated)
    }
}

/// A change of gate state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateTransition {
    /// State before the update
    pub from: GateState,
    /// State after the update
    pub to: GateState,
}

impl GateTransition {
    /// Whether the mounted partition changed
    pub fn swaps_partition(&self) -> bool {
        self.from.partition() != self.to.partition()
    }
}

/// Session gate
///
/// Starts `Uninitialized` and stays there for as long as the provider is
/// not loaded, however long that is.
#[derive(Debug, Clone, Default)]
pub struct SessionGate {
    state: GateState,
}

impl SessionGate {
    /// Create a gate in the `Uninitialized` state
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn state(&self) -> GateState {
        self.state
    }

    /// Partition currently mounted, if any
    pub fn mounted_partition(&self) -> Option<Partition> {
        self.state.partition()
    }

    /// Whether the session partition is mounted
    pub fn is_authenticated(&self) -> bool {
        self.state == GateState::Authenticated
    }

    /// Feed an auth snapshot; returns the transition when the state changed
    pub fn apply(&mut self, auth: AuthState) -> Option<GateTransition> {
        let next = GateState::from_auth(auth);
        if next == self.state {
            return None;
        }

        let transition = GateTransition { from: self.state, to: next };
        self.state = next;
        tracing::info!(from = ?transition.from, to = ?transition.to, "session gate transition");
        Some(transition)
    }
}
