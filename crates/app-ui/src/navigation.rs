//! Navigation system for Vision Shell
//!
//! This module provides:
//! - Route definitions and the partition each route belongs to
//! - Path matching, including index-suffixed and route-group paths
//! - A navigation stack with push and replace semantics
//! - A guarded navigator that refuses routes outside the mounted partition
//! - Tab resolution for footer highlighting

use app_state::Partition;
use serde::{Deserialize, Serialize};

// =============================================================================
// Route Definitions
// =============================================================================

/// All screens of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    // Auth-only screens
    /// Sign in
    SignIn,
    /// Create account
    SignUp,
    /// Set a new password from a reset link
    ResetPassword,
    /// Request a password reset
    ForgotPassword,

    // Session-only screens
    /// Dashboard
    #[default]
    Home,
    /// Economic development details
    Economical,
    /// Account and appearance settings
    Profile,

    // Unguarded
    /// Not found
    NotFound,
}

/// How a screen is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presentation {
    /// Regular stack card
    #[default]
    Card,
    /// Modal sheet
    Modal,
}

/// Per-screen header and presentation options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenOptions {
    /// Header visible
    pub header_shown: bool,
    /// Header title
    pub title: &'static str,
    /// Presentation style
    pub presentation: Presentation,
    /// Header drawn over content
    pub header_transparent: bool,
    /// Header shadow visible
    pub header_shadow_visible: bool,
    /// Swipe-to-dismiss enabled
    pub gesture_enabled: bool,
}

impl Default for ScreenOptions {
    fn default() -> Self {
        Self {
            header_shown: true,
            title: "",
            presentation: Presentation::Card,
            header_transparent: false,
            header_shadow_visible: true,
            gesture_enabled: true,
        }
    }
}

impl Route {
    /// Every route, auth screens first
    pub fn all() -> [Route; 8] {
        [
            Route::SignIn,
            Route::SignUp,
            Route::ResetPassword,
            Route::ForgotPassword,
            Route::Home,
            Route::Economical,
            Route::Profile,
            Route::NotFound,
        ]
    }

    /// Get the URL path for this route
    pub fn to_path(&self) -> &'static str {
        match self {
            Route::SignIn => "/sign-in",
            Route::SignUp => "/sign-up",
            Route::ResetPassword => "/reset-password",
            Route::ForgotPassword => "/forgot-password",
            Route::Home => "/",
            Route::Economical => "/economical",
            Route::Profile => "/profile",
            Route::NotFound => "/not-found",
        }
    }

    /// Partition guarding this route; `None` for screens open to everyone
    pub fn partition(&self) -> Option<Partition> {
        match self {
            Route::SignIn | Route::SignUp | Route::ResetPassword | Route::ForgotPassword => {
                Some(Partition::AuthOnly)
            }
            Route::Home | Route::Economical | Route::Profile => Some(Partition::SessionOnly),
            Route::NotFound => None,
        }
    }

    /// Check if this route requires authentication
    pub fn requires_auth(&self) -> bool {
        self.partition() == Some(Partition::SessionOnly)
    }

    /// Whether the route may be shown while `mounted` is active
    pub fn is_reachable_from(&self, mounted: Partition) -> bool {
        self.partition().map_or(true, |partition| partition == mounted)
    }

    /// Header and presentation options
    pub fn options(&self) -> ScreenOptions {
        match self {
            Route::SignIn => ScreenOptions {
                header_shown: false,
                title: "Sign in",
                ..Default::default()
            },
            Route::SignUp => ScreenOptions {
                presentation: Presentation::Modal,
                header_transparent: true,
                gesture_enabled: false,
                ..Default::default()
            },
            Route::ResetPassword | Route::ForgotPassword => ScreenOptions {
                header_shadow_visible: false,
                header_transparent: true,
                ..Default::default()
            },
            Route::Home | Route::Economical | Route::Profile => {
                ScreenOptions { header_shown: false, ..Default::default() }
            }
            Route::NotFound => ScreenOptions { title: "Not found", ..Default::default() },
        }
    }
}

/// Root route of a partition
pub fn partition_root(partition: Partition) -> Route {
    match partition {
        Partition::AuthOnly => Route::SignIn,
        Partition::SessionOnly => Route::Home,
    }
}

// =============================================================================
// Router
// =============================================================================

/// URL router for parsing paths to routes
///
/// Query strings and trailing slashes are ignored, route-group segments such
/// as `(auth)` are transparent, and `/x/index` is the same screen as `/x`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Router;

impl Router {
    /// Create a new router
    pub fn new() -> Self {
        Self
    }

    /// Match a path to a route
    pub fn match_path(&self, path: &str) -> Route {
        let normalized = normalize_path(path);
        Route::all()
            .into_iter()
            .find(|route| route.to_path() == normalized)
            .unwrap_or(Route::NotFound)
    }
}

/// Canonical form of a path: no query, no groups, no trailing `index`
fn normalize_path(path: &str) -> String {
    let pathname = path.split(['?', '#']).next().unwrap_or_default();

    let mut segments: Vec<&str> = pathname
        .split('/')
        .filter(|s| !s.is_empty())
        .filter(|s| !(s.starts_with('(') && s.ends_with(')')))
        .collect();

    if segments.last() == Some(&"index") {
        segments.pop();
    }

    format!("/{}", segments.join("/"))
}

// =============================================================================
// Navigation Tabs
// =============================================================================

/// Footer tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationTab {
    /// Dashboard tab
    Home,
    /// Economic details tab
    Economical,
    /// Profile tab
    Profile,
}

impl NavigationTab {
    /// Get the root route for this tab
    pub fn root_route(&self) -> Route {
        match self {
            NavigationTab::Home => Route::Home,
            NavigationTab::Economical => Route::Economical,
            NavigationTab::Profile => Route::Profile,
        }
    }

    /// Canonical path the tab highlights on
    pub fn canonical_path(&self) -> &'static str {
        self.root_route().to_path()
    }

    /// Get icon name for this tab
    pub fn icon(&self) -> &'static str {
        match self {
            NavigationTab::Home => "home",
            NavigationTab::Economical => "candlestick-chart",
            NavigationTab::Profile => "user",
        }
    }

    /// Get accessibility label for this tab
    pub fn label(&self) -> &'static str {
        match self {
            NavigationTab::Home => "Home",
            NavigationTab::Economical => "Economical",
            NavigationTab::Profile => "Profile",
        }
    }

    /// Get all tabs in footer order
    pub fn all() -> [NavigationTab; 3] {
        [NavigationTab::Home, NavigationTab::Economical, NavigationTab::Profile]
    }

    /// Whether `path` is this tab's path or its index form
    pub fn matches(&self, path: &str) -> bool {
        let canonical = self.canonical_path();
        let index = if canonical == "/" { "/index".to_string() } else { format!("{canonical}/index") };
        path == canonical || path == index
    }
}

/// Tab to highlight for the current path; `None` when no tab matches
pub fn resolve_active_tab(path: &str) -> Option<NavigationTab> {
    let pathname = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = match pathname.trim_end_matches('/') {
        "" => "/",
        other => other,
    };
    NavigationTab::all().into_iter().find(|tab| tab.matches(trimmed))
}

// =============================================================================
// Navigation Stack
// =============================================================================

/// A navigation stack entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackEntry {
    /// The route
    pub route: Route,
    /// Unique key for this entry
    pub key: String,
}

impl StackEntry {
    /// Create a new stack entry
    pub fn new(route: Route) -> Self {
        Self { route, key: uuid::Uuid::new_v4().to_string() }
    }
}

/// Navigation stack; never empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationStack {
    root: StackEntry,
    above: Vec<StackEntry>,
}

impl NavigationStack {
    /// Create a new navigation stack with a root route
    pub fn new(root: Route) -> Self {
        Self { root: StackEntry::new(root), above: Vec::new() }
    }

    /// Push a route onto the stack
    pub fn push(&mut self, route: Route) {
        self.above.push(StackEntry::new(route));
    }

    /// Pop entries above the topmost `route`; false when `route` is not on the stack
    pub fn pop_to(&mut self, route: Route) -> bool {
        if let Some(index) = self.above.iter().rposition(|e| e.route == route) {
            self.above.truncate(index + 1);
            true
        } else if self.root.route == route {
            self.above.clear();
            true
        } else {
            false
        }
    }

    /// Pop the top route (returns true if popped, false if at root)
    pub fn pop(&mut self) -> bool {
        self.above.pop().is_some()
    }

    /// Replace the top route without adding history
    pub fn replace(&mut self, route: Route) {
        match self.above.last_mut() {
            Some(last) => *last = StackEntry::new(route),
            None => self.root = StackEntry::new(route),
        }
    }

    /// Get the current (top) entry
    pub fn current_entry(&self) -> &StackEntry {
        self.above.last().unwrap_or(&self.root)
    }

    /// Get the current (top) route
    pub fn current(&self) -> Route {
        self.current_entry().route
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        !self.above.is_empty()
    }

    /// Get stack depth
    pub fn depth(&self) -> usize {
        self.above.len() + 1
    }

    /// Routes from bottom to top
    pub fn routes(&self) -> Vec<Route> {
        std::iter::once(&self.root).chain(&self.above).map(|e| e.route).collect()
    }
}

// =============================================================================
// Guarded Navigator
// =============================================================================

/// Result of a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Route pushed onto the stack
    Pushed,
    /// Top entry swapped
    Replaced,
    /// Route already on the stack; entries above it were popped
    PoppedTo,
    /// Route already on top; nothing changed
    AlreadyThere,
    /// Route belongs to the inactive partition; nothing changed
    Blocked,
    /// No partition mounted; nothing changed
    Unmounted,
}

impl NavigationOutcome {
    /// Whether the stack changed
    pub fn changed(&self) -> bool {
        matches!(
            self,
            NavigationOutcome::Pushed | NavigationOutcome::PoppedTo | NavigationOutcome::Replaced
        )
    }
}

/// Navigation stack bound to the mounted partition
///
/// Exactly one partition's screens are reachable at a time. Requests for a
/// screen of the other partition are refused rather than rendered.
#[derive(Debug, Clone, Default)]
pub struct GuardedNavigator {
    mounted: Option<Partition>,
    stack: Option<NavigationStack>,
    router: Router,
}

impl GuardedNavigator {
    /// Create a navigator with nothing mounted
    pub fn new() -> Self {
        Self::default()
    }

    /// Partition currently mounted
    pub fn mounted(&self) -> Option<Partition> {
        self.mounted
    }

    /// Swap the mounted partition
    ///
    /// Switching partitions discards the previous history entirely, so no
    /// screen of the old partition stays back-reachable. Re-mounting the same
    /// partition keeps the stack.
    pub fn mount(&mut self, partition: Option<Partition>) {
        if partition == self.mounted {
            return;
        }

        self.mounted = partition;
        self.stack = partition.map(|p| NavigationStack::new(partition_root(p)));
        tracing::debug!(?partition, "navigation partition mounted");
    }

    fn check(&self, route: Route) -> Result<(), NavigationOutcome> {
        let Some(mounted) = self.mounted else {
            return Err(NavigationOutcome::Unmounted);
        };
        if !route.is_reachable_from(mounted) {
            tracing::debug!(?route, ?mounted, "navigation blocked by session guard");
            return Err(NavigationOutcome::Blocked);
        }
        Ok(())
    }

    /// Navigate to a route
    ///
    /// A route already on the stack is returned to rather than pushed again,
    /// so repeated tab switches never grow the history.
    pub fn navigate(&mut self, route: Route) -> NavigationOutcome {
        if let Err(outcome) = self.check(route) {
            return outcome;
        }
        let Some(stack) = self.stack.as_mut() else {
            return NavigationOutcome::Unmounted;
        };
        if stack.current() == route {
            return NavigationOutcome::AlreadyThere;
        }
        if stack.pop_to(route) {
            return NavigationOutcome::PoppedTo;
        }
        stack.push(route);
        NavigationOutcome::Pushed
    }

    /// Replace the top entry with a route
    pub fn replace(&mut self, route: Route) -> NavigationOutcome {
        if let Err(outcome) = self.check(route) {
            return outcome;
        }
        let Some(stack) = self.stack.as_mut() else {
            return NavigationOutcome::Unmounted;
        };
        stack.replace(route);
        NavigationOutcome::Replaced
    }

    /// Navigate to whatever route a path resolves to
    pub fn navigate_path(&mut self, path: &str) -> NavigationOutcome {
        let route = self.router.match_path(path);
        self.navigate(route)
    }

    /// Go back one entry
    pub fn go_back(&mut self) -> bool {
        self.stack.as_mut().is_some_and(NavigationStack::pop)
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        self.stack.as_ref().is_some_and(NavigationStack::can_go_back)
    }

    /// Current route, `None` while nothing is mounted
    pub fn current_route(&self) -> Option<Route> {
        self.stack.as_ref().map(NavigationStack::current)
    }

    /// Path of the current route
    pub fn current_path(&self) -> Option<&'static str> {
        self.current_route().map(|route| route.to_path())
    }

    /// Mounted stack, if any
    pub fn stack(&self) -> Option<&NavigationStack> {
        self.stack.as_ref()
    }

    /// Tab to highlight for the current route
    pub fn active_tab(&self) -> Option<NavigationTab> {
        self.current_path().and_then(resolve_active_tab)
    }

    /// The footer is mounted with the session partition only
    pub fn footer_visible(&self) -> bool {
        self.mounted == Some(Partition::SessionOnly)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_to_path() {
        assert_eq!(Route::Home.to_path(), "/");
        assert_eq!(Route::Profile.to_path(), "/profile");
        assert_eq!(Route::SignIn.to_path(), "/sign-in");
    }

    #[test]
    fn test_route_partitions() {
        for route in [Route::SignIn, Route::SignUp, Route::ResetPassword, Route::ForgotPassword] {
            assert_eq!(route.partition(), Some(Partition::AuthOnly));
            assert!(!route.requires_auth());
        }
        for route in [Route::Home, Route::Economical, Route::Profile] {
            assert_eq!(route.partition(), Some(Partition::SessionOnly));
            assert!(route.requires_auth());
        }
        assert_eq!(Route::NotFound.partition(), None);
        assert!(Route::NotFound.is_reachable_from(Partition::AuthOnly));
        assert!(Route::NotFound.is_reachable_from(Partition::SessionOnly));
    }

    #[test]
    fn test_screen_options() {
        assert!(!Route::SignIn.options().header_shown);
        assert_eq!(Route::SignIn.options().title, "Sign in");
        assert_eq!(Route::SignUp.options().presentation, Presentation::Modal);
        assert!(!Route::SignUp.options().gesture_enabled);
        assert!(!Route::ForgotPassword.options().header_shadow_visible);
        assert!(!Route::Profile.options().header_shown);
    }

    #[test]
    fn test_router_match_paths() {
        let router = Router::new();
        assert_eq!(router.match_path("/"), Route::Home);
        assert_eq!(router.match_path("/index"), Route::Home);
        assert_eq!(router.match_path("/profile/index"), Route::Profile);
        assert_eq!(router.match_path("/economical/"), Route::Economical);
        assert_eq!(router.match_path("/(auth)/sign-in"), Route::SignIn);
        assert_eq!(router.match_path("/sign-up?redirect=%2F"), Route::SignUp);
    }

    #[test]
    fn test_router_not_found() {
        let router = Router::new();
        assert_eq!(router.match_path("/nonexistent/path"), Route::NotFound);
        assert_eq!(router.match_path("/profile/settings"), Route::NotFound);
    }

    #[test]
    fn test_resolve_active_tab() {
        assert_eq!(resolve_active_tab("/"), Some(NavigationTab::Home));
        assert_eq!(resolve_active_tab("/index"), Some(NavigationTab::Home));
        assert_eq!(resolve_active_tab("/economical"), Some(NavigationTab::Economical));
        assert_eq!(resolve_active_tab("/profile"), Some(NavigationTab::Profile));
        assert_eq!(resolve_active_tab("/profile/index"), Some(NavigationTab::Profile));
        assert_eq!(resolve_active_tab("/profile/"), Some(NavigationTab::Profile));
    }

    #[test]
    fn test_resolve_active_tab_none() {
        for path in ["/unknown", "", "/sign-in", "/profile/edit", "//", "/profiles", "index", "/\u{1F600}"] {
            let tab = resolve_active_tab(path);
            if path == "//" || path.is_empty() {
                assert_eq!(tab, Some(NavigationTab::Home), "{path:?}");
            } else {
                assert_eq!(tab, None, "{path:?}");
            }
        }
    }

    #[test]
    fn test_navigation_tab_root_routes() {
        assert_eq!(NavigationTab::Home.root_route(), Route::Home);
        assert_eq!(NavigationTab::Profile.root_route(), Route::Profile);
        assert_eq!(NavigationTab::Economical.label(), "Economical");
    }

    #[test]
    fn test_navigation_stack_push_pop() {
        let mut stack = NavigationStack::new(Route::Home);
        assert_eq!(stack.depth(), 1);
        assert!(!stack.can_go_back());

        stack.push(Route::Economical);
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.current(), Route::Economical);

        assert!(stack.pop());
        assert_eq!(stack.current(), Route::Home);

        // Can't pop past root
        assert!(!stack.pop());
    }

    #[test]
    fn test_navigation_stack_replace() {
        let mut stack = NavigationStack::new(Route::SignIn);
        stack.replace(Route::Home);
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.routes(), vec![Route::Home]);

        stack.push(Route::Economical);
        stack.replace(Route::Profile);
        assert_eq!(stack.routes(), vec![Route::Home, Route::Profile]);
    }

    #[test]
    fn test_navigator_unmounted_is_inert() {
        let mut nav = GuardedNavigator::new();
        assert_eq!(nav.navigate(Route::Home), NavigationOutcome::Unmounted);
        assert_eq!(nav.replace(Route::SignIn), NavigationOutcome::Unmounted);
        assert_eq!(nav.current_route(), None);
        assert_eq!(nav.active_tab(), None);
        assert!(!nav.go_back());
        assert!(!nav.footer_visible());
    }

    #[test]
    fn test_navigator_blocks_inactive_partition() {
        let mut nav = GuardedNavigator::new();
        nav.mount(Some(Partition::AuthOnly));
        assert_eq!(nav.current_route(), Some(Route::SignIn));

        assert_eq!(nav.navigate(Route::Profile), NavigationOutcome::Blocked);
        assert_eq!(nav.navigate_path("/profile/index"), NavigationOutcome::Blocked);
        assert_eq!(nav.replace(Route::Home), NavigationOutcome::Blocked);
        assert_eq!(nav.current_route(), Some(Route::SignIn));
        assert_eq!(nav.stack().unwrap().depth(), 1);

        assert_eq!(nav.navigate(Route::SignUp), NavigationOutcome::Pushed);
        assert_eq!(nav.navigate(Route::NotFound), NavigationOutcome::Pushed);
    }

    #[test]
    fn test_navigator_partition_swap_drops_history() {
        let mut nav = GuardedNavigator::new();
        nav.mount(Some(Partition::AuthOnly));
        nav.navigate(Route::SignUp);
        nav.navigate(Route::ForgotPassword);

        nav.mount(Some(Partition::SessionOnly));
        assert_eq!(nav.current_route(), Some(Route::Home));
        assert!(!nav.can_go_back());
        assert!(nav.footer_visible());
        assert_eq!(nav.active_tab(), Some(NavigationTab::Home));
    }

    #[test]
    fn test_navigator_remount_same_partition_keeps_stack() {
        let mut nav = GuardedNavigator::new();
        nav.mount(Some(Partition::SessionOnly));
        nav.navigate(Route::Economical);

        nav.mount(Some(Partition::SessionOnly));
        assert_eq!(nav.current_route(), Some(Route::Economical));
    }

    #[test]
    fn test_navigator_navigate_and_replace() {
        let mut nav = GuardedNavigator::new();
        nav.mount(Some(Partition::SessionOnly));

        assert_eq!(nav.navigate(Route::Home), NavigationOutcome::AlreadyThere);
        assert_eq!(nav.navigate(Route::Economical), NavigationOutcome::Pushed);
        assert_eq!(nav.active_tab(), Some(NavigationTab::Economical));

        assert_eq!(nav.replace(Route::Profile), NavigationOutcome::Replaced);
        assert_eq!(nav.stack().unwrap().routes(), vec![Route::Home, Route::Profile]);
        assert_eq!(nav.active_tab(), Some(NavigationTab::Profile));

        assert!(nav.go_back());
        assert_eq!(nav.current_route(), Some(Route::Home));

        assert_eq!(nav.navigate_path("/nowhere"), NavigationOutcome::Pushed);
        assert_eq!(nav.current_route(), Some(Route::NotFound));
        assert_eq!(nav.active_tab(), None);
    }

    #[test]
    fn test_navigation_stack_pop_to() {
        let mut stack = NavigationStack::new(Route::Home);
        stack.push(Route::Economical);
        stack.push(Route::Profile);

        assert!(stack.pop_to(Route::Economical));
        assert_eq!(stack.routes(), vec![Route::Home, Route::Economical]);
        assert!(stack.pop_to(Route::Home));
        assert_eq!(stack.depth(), 1);
        assert!(!stack.pop_to(Route::Profile));
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_navigator_returns_to_routes_on_stack() {
        let mut nav = GuardedNavigator::new();
        nav.mount(Some(Partition::SessionOnly));

        for _ in 0..50 {
            nav.navigate(Route::Profile);
            assert_eq!(nav.navigate(Route::Home), NavigationOutcome::PoppedTo);
        }
        assert_eq!(nav.stack().unwrap().depth(), 1);

        nav.navigate(Route::Economical);
        nav.navigate(Route::Profile);
        assert_eq!(nav.navigate(Route::Economical), NavigationOutcome::PoppedTo);
        assert!(NavigationOutcome::PoppedTo.changed());
        assert_eq!(nav.stack().unwrap().routes(), vec![Route::Home, Route::Economical]);
    }

    #[test]
    fn test_navigator_unmount() {
        let mut nav = GuardedNavigator::new();
        nav.mount(Some(Partition::SessionOnly));
        nav.mount(None);
        assert_eq!(nav.mounted(), None);
        assert_eq!(nav.current_path(), None);
    }

    #[test]
    fn test_route_serialization() {
        let json = serde_json::to_string(&Route::ForgotPassword).unwrap();
        assert_eq!(json, "\"forgot-password\"");
        let parsed: Route = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Route::ForgotPassword);
    }
}
