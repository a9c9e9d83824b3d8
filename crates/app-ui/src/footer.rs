//! Footer tab bar
//!
//! The footer exists only while the session partition is mounted. Its
//! highlight is derived from the navigator's current path on every render.

use app_state::ColorScheme;
use serde::Serialize;

use crate::navigation::{resolve_active_tab, GuardedNavigator, NavigationOutcome, NavigationTab};
use crate::theme::{Color, TabIconColors};

/// One button of the footer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FooterTab {
    /// Tab this button opens
    pub tab: NavigationTab,
    /// Accessibility label
    pub label: &'static str,
    /// Icon name
    pub icon: &'static str,
    /// Whether this tab is highlighted
    pub active: bool,
    /// Icon tint
    pub tint: Color,
}

/// Footer tab bar model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footer {
    tabs: Vec<FooterTab>,
}

impl Footer {
    /// Build the footer for a path, or `None` when the footer is not mounted
    pub fn for_navigator(navigator: &GuardedNavigator, scheme: ColorScheme) -> Option<Self> {
        if !navigator.footer_visible() {
            return None;
        }
        Some(Self::for_path(navigator.current_path().unwrap_or_default(), scheme))
    }

    /// Build the footer highlighting whatever tab `path` resolves to
    pub fn for_path(path: &str, scheme: ColorScheme) -> Self {
        let active = resolve_active_tab(path);
        let colors = TabIconColors::for_scheme(scheme);

        let tabs = NavigationTab::all()
            .into_iter()
            .map(|tab| {
                let is_active = active == Some(tab);
                FooterTab {
                    tab,
                    label: tab.label(),
                    icon: tab.icon(),
                    active: is_active,
                    tint: colors.tint(is_active),
                }
            })
            .collect();

        Self { tabs }
    }

    /// Buttons in display order
    pub fn tabs(&self) -> &[FooterTab] {
        &self.tabs
    }

    /// Highlighted tab, if any
    pub fn active(&self) -> Option<NavigationTab> {
        self.tabs.iter().find(|t| t.active).map(|t| t.tab)
    }

    /// A tab was pressed
    pub fn press(tab: NavigationTab, navigator: &mut GuardedNavigator) -> NavigationOutcome {
        navigator.navigate(tab.root_route())
    }
}
