//! Shell Integration Tests
//!
//! End-to-end tests driving the root layout through auth provider changes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use app_state::{
    AuthProvider, AuthState, ColorScheme, DeviceColorScheme, GateState, Partition, SplashOverlay,
    WatchAuthProvider,
};
use app_ui::{NavigationOutcome, NavigationTab, Route, SignInRender, StatusBarStyle, UserProfile};
use vision_shell::{AppConfig, RootLayout, ShellError};

/// Splash overlay counting calls
#[derive(Default)]
struct RecordingOverlay {
    prevented: AtomicUsize,
    hidden: AtomicUsize,
}

impl SplashOverlay for RecordingOverlay {
    fn prevent_auto_hide(&self) {
        self.prevented.fetch_add(1, Ordering::SeqCst);
    }

    fn hide(&self) {
        self.hidden.fetch_add(1, Ordering::SeqCst);
    }
}

struct Harness {
    auth: Arc<WatchAuthProvider>,
    overlay: Arc<RecordingOverlay>,
    bridge: Arc<DeviceColorScheme>,
    shell: RootLayout,
}

fn harness(initial: AuthState) -> Harness {
    let auth = Arc::new(WatchAuthProvider::with_state(initial));
    let overlay = Arc::new(RecordingOverlay::default());
    let bridge = Arc::new(DeviceColorScheme::new(ColorScheme::Light));
    let shell = RootLayout::from_config(
        &AppConfig::in_memory(),
        auth.clone(),
        overlay.clone(),
        bridge.clone(),
    )
    .unwrap();
    Harness { auth, overlay, bridge, shell }
}

fn ada() -> UserProfile {
    UserProfile {
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        primary_email: Some("ada@example.com".to_string()),
        ..Default::default()
    }
}

/// Startup: splash held while loading, then auth screens, then session screens
#[tokio::test]
async fn test_startup_sign_in_flow() {
    let mut h = harness(AuthState::loading());
    assert_eq!(h.overlay.prevented.load(Ordering::SeqCst), 1);

    h.shell.sync();
    let frame = h.shell.render();
    assert!(frame.splash_visible);
    assert_eq!(frame.partition, None);
    assert_eq!(frame.route, None);
    assert!(frame.footer.is_none());
    assert_eq!(h.overlay.hidden.load(Ordering::SeqCst), 0);

    // Provider loads without a session
    h.auth.finish_loading(false);
    h.shell.sync();
    let frame = h.shell.render();
    assert!(!frame.splash_visible);
    assert_eq!(frame.partition, Some(Partition::AuthOnly));
    assert_eq!(frame.route, Some(Route::SignIn));
    assert_eq!(frame.sign_in, Some(SignInRender::Form));
    assert!(frame.footer.is_none());
    assert_eq!(h.overlay.hidden.load(Ordering::SeqCst), 1);

    // User signs in
    h.auth.sign_in();
    h.shell.sync();
    let frame = h.shell.render();
    assert_eq!(frame.partition, Some(Partition::SessionOnly));
    assert_eq!(frame.route, Some(Route::Home));
    assert_eq!(frame.sign_in, Some(SignInRender::Redirect(Route::Home)));
    assert_eq!(frame.footer.unwrap().active(), Some(NavigationTab::Home));
    assert!(!h.shell.navigator().can_go_back());

    // Splash never hides again
    assert_eq!(h.overlay.hidden.load(Ordering::SeqCst), 1);
}

/// Every auth change mounts exactly the partition of the latest value
#[tokio::test]
async fn test_auth_churn_keeps_one_partition() {
    let mut h = harness(AuthState::loading());
    h.shell.sync();

    let sequence = [
        AuthState::signed_out(),
        AuthState::signed_in(),
        AuthState::signed_out(),
        AuthState::signed_in(),
        AuthState::signed_in(),
        AuthState::signed_out(),
    ];

    for state in sequence {
        h.auth.set_state(state);
        h.shell.sync();

        let expected = if state.is_signed_in { Partition::SessionOnly } else { Partition::AuthOnly };
        let frame = h.shell.render();
        assert_eq!(frame.partition, Some(expected));
        assert_eq!(frame.route.and_then(|r| r.partition()), Some(expected));
        assert_eq!(frame.footer.is_some(), state.is_signed_in);
        assert!(!h.shell.navigator().can_go_back());
    }

    assert_eq!(h.overlay.hidden.load(Ordering::SeqCst), 1);
}

/// Session screens cannot be reached without a session
#[tokio::test]
async fn test_guard_blocks_session_routes() {
    let mut h = harness(AuthState::signed_out());
    h.shell.sync();

    assert_eq!(h.shell.navigate_path("/profile").await, NavigationOutcome::Blocked);
    assert_eq!(h.shell.navigate(Route::Economical).await, NavigationOutcome::Blocked);
    assert_eq!(h.shell.press_tab(NavigationTab::Home).await, NavigationOutcome::Unmounted);
    assert_eq!(h.shell.render().route, Some(Route::SignIn));
    assert!(h.shell.profile().is_none());

    assert_eq!(h.shell.navigate_path("/(auth)/sign-up").await, NavigationOutcome::Pushed);
    assert_eq!(h.shell.render().route, Some(Route::SignUp));
}

/// Auth screens cannot be reached with a session
#[tokio::test]
async fn test_guard_blocks_auth_routes() {
    let mut h = harness(AuthState::signed_in());
    h.shell.sync();

    assert_eq!(h.shell.navigate(Route::SignIn).await, NavigationOutcome::Blocked);
    assert_eq!(h.shell.navigate_path("/forgot-password").await, NavigationOutcome::Blocked);
    assert_eq!(h.shell.render().route, Some(Route::Home));
}

/// Footer highlight follows the top of the stack
#[tokio::test]
async fn test_footer_tracks_navigation() {
    let mut h = harness(AuthState::signed_in());
    h.shell.sync();

    assert_eq!(h.shell.press_tab(NavigationTab::Economical).await, NavigationOutcome::Pushed);
    assert_eq!(h.shell.render().footer.unwrap().active(), Some(NavigationTab::Economical));

    assert_eq!(h.shell.navigate_path("/profile/index").await, NavigationOutcome::Pushed);
    assert_eq!(h.shell.render().footer.unwrap().active(), Some(NavigationTab::Profile));
    assert!(h.shell.profile().is_some());

    assert_eq!(h.shell.navigate_path("/missing").await, NavigationOutcome::Pushed);
    assert_eq!(h.shell.render().footer.unwrap().active(), None);

    assert!(h.shell.go_back());
    assert_eq!(h.shell.render().footer.unwrap().active(), Some(NavigationTab::Profile));
}

/// Signing out from the profile screen lands on sign-in with no way back
#[tokio::test]
async fn test_sign_out_from_profile() {
    let mut h = harness(AuthState::signed_in());
    h.shell.sync();
    h.shell.set_user(Some(ada()));

    h.shell.press_tab(NavigationTab::Profile).await;
    let theme = h.shell.profile().unwrap().theme();
    assert_eq!(h.shell.profile().unwrap().summary().initials, "AD");

    h.shell.sign_out().await.unwrap();
    assert_eq!(h.shell.gate_state(), GateState::Unauthenticated);
    assert_eq!(h.shell.render().route, Some(Route::SignIn));
    assert!(!h.shell.navigator().can_go_back());

    // The profile view went with the session partition
    assert!(h.shell.profile().is_none());
    assert!(!theme.liveness().is_alive());
}

/// Clearing the session replaces the stack with sign-in
#[tokio::test]
async fn test_clear_session() {
    let mut h = harness(AuthState::signed_in());
    h.shell.sync();
    h.shell.set_user(Some(ada()));
    h.shell.press_tab(NavigationTab::Profile).await;

    let outcome = h.shell.clear_session().await.unwrap();
    assert_eq!(outcome, NavigationOutcome::Replaced);
    assert_eq!(h.shell.render().route, Some(Route::SignIn));
    assert_eq!(h.shell.navigator().stack().unwrap().depth(), 1);
    assert!(!h.auth.state().is_signed_in);
}

/// Clearing the session needs a loaded user
#[tokio::test]
async fn test_clear_session_without_user() {
    let mut h = harness(AuthState::signed_in());
    h.shell.sync();
    h.shell.press_tab(NavigationTab::Profile).await;

    let err = h.shell.clear_session().await.unwrap_err();
    assert!(matches!(err, ShellError::Screen(_)));
    assert!(h.auth.state().is_signed_in);
    assert_eq!(h.shell.render().route, Some(Route::Profile));
}

/// Switching tabs back and forth returns to the existing screens
#[tokio::test]
async fn test_tab_round_trips_do_not_grow_history() {
    let mut h = harness(AuthState::signed_in());
    h.shell.sync();

    for _ in 0..50 {
        assert_eq!(h.shell.press_tab(NavigationTab::Profile).await, NavigationOutcome::Pushed);
        assert!(h.shell.profile().is_some());
        assert_eq!(h.shell.press_tab(NavigationTab::Home).await, NavigationOutcome::PoppedTo);
        assert!(h.shell.profile().is_none());
    }

    assert_eq!(h.shell.navigator().stack().unwrap().depth(), 1);
    assert!(!h.shell.go_back());
    assert_eq!(h.shell.render().route, Some(Route::Home));
}

/// Provider notifications drive the layout through the watch channel
#[tokio::test]
async fn test_next_change_follows_provider() {
    let mut h = harness(AuthState::loading());
    h.shell.sync();

    h.auth.finish_loading(true);
    let applied = tokio::time::timeout(Duration::from_secs(1), h.shell.next_change())
        .await
        .unwrap();
    assert!(applied);
    assert_eq!(h.shell.gate_state(), GateState::Authenticated);

    // Duplicate states do not notify
    assert!(!h.auth.set_state(AuthState::signed_in()));
    let pending = tokio::time::timeout(Duration::from_millis(50), h.shell.next_change()).await;
    assert!(pending.is_err());
}

/// Chrome follows the effective color scheme
#[tokio::test]
async fn test_chrome_follows_scheme() {
    let mut h = harness(AuthState::signed_in());
    h.shell.sync();
    assert_eq!(h.shell.render().status_bar, StatusBarStyle::Dark);
    assert!(!h.shell.render().nav_theme.dark);

    h.bridge.set_platform_scheme(ColorScheme::Dark);
    let frame = h.shell.render();
    assert_eq!(frame.status_bar, StatusBarStyle::Light);
    assert!(frame.nav_theme.dark);
}
