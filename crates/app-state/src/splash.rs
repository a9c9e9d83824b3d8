//! Startup splash overlay coordination

use std::sync::Arc;

use crate::auth::AuthState;

/// Platform splash overlay
#[cfg_attr(test, mockall::automock)]
pub trait SplashOverlay: Send + Sync {
    /// Keep the overlay up past the platform's automatic dismissal
    fn prevent_auto_hide(&self);

    /// Dismiss the overlay
    fn hide(&self);
}

/// Hides the splash overlay exactly once, on the first loaded snapshot
pub struct SplashCoordinator {
    overlay: Arc<dyn SplashOverlay>,
    hidden: bool,
}

impl std::fmt::Debug for SplashCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SplashCoordinator").field("hidden", &self.hidden).finish()
    }
}

impl SplashCoordinator {
    /// Take over the overlay; it stays visible until the provider loads
    pub fn new(overlay: Arc<dyn SplashOverlay>) -> Self {
        overlay.prevent_auto_hide();
        Self { overlay, hidden: false }
    }

    /// Whether the overlay is still showing
    pub fn is_visible(&self) -> bool {
        !self.hidden
    }

    /// Feed an auth snapshot; returns `true` when this call hid the overlay
    pub fn observe(&mut self, auth: AuthState) -> bool {
        if self.hidden || !auth.is_loaded {
            return false;
        }

        self.hidden = true;
        self.overlay.hide();
        tracing::info!("splash overlay hidden");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlay_expecting_hides(times: usize) -> Arc<MockSplashOverlay> {
        let mut overlay = MockSplashOverlay::new();
        overlay.expect_prevent_auto_hide().times(1).return_const(());
        overlay.expect_hide().times(times).return_const(());
        Arc::new(overlay)
    }

    #[test]
    fn test_visible_while_loading() {
        let mut splash = SplashCoordinator::new(overlay_expecting_hides(0));

        assert!(!splash.observe(AuthState::loading()));
        assert!(!splash.observe(AuthState { is_loaded: false, is_signed_in: true }));
        assert!(splash.is_visible());
    }

    #[test]
    fn test_hidden_exactly_once() {
        let mut splash = SplashCoordinator::new(overlay_expecting_hides(1));

        assert!(splash.observe(AuthState::signed_out()));
        assert!(!splash.is_visible());

        // Later snapshots, including sign-in/out churn, never hide again
        assert!(!splash.observe(AuthState::signed_in()));
        assert!(!splash.observe(AuthState::signed_out()));
        assert!(!splash.observe(AuthState::loading()));
    }

    #[test]
    fn test_signed_in_start_also_hides() {
        let mut splash = SplashCoordinator::new(overlay_expecting_hides(1));
        assert!(splash.observe(AuthState::signed_in()));
    }

    #[test]
    fn test_debug_output() {
        let splash = SplashCoordinator::new(overlay_expecting_hides(0));
        assert_eq!(format!("{splash:?}"), "SplashCoordinator { hidden: false }");
    }
}
