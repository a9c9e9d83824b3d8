//! Persisted theme preference
//!
//! [`ThemeStore`] is owned by the application root and shared by `Arc` with
//! the views that need it. Each view works through its own
//! [`ThemeController`], which carries the view's [`Liveness`] and in-memory
//! copy of the preference.
//!
//! Every mutation persists first. The in-memory value and the bridge are only
//! touched after the write succeeded and only while the view is alive, so a
//! reader never sees a preference that failed to save. Completions of
//! overlapping toggles apply in the order they finish.

use parking_lot::RwLock;
use std::sync::Arc;
use storage::{KeyValueStore, KvError, ThemePreference, UnknownThemePreference, THEME_PREFERENCE_KEY};
use thiserror::Error;

use crate::color_scheme::{ColorScheme, ColorSchemeBridge, SchemeOverride};
use crate::liveness::Liveness;

/// Theme persistence errors
#[derive(Debug, Error)]
pub enum ThemeError {
    /// Key-value store failure
    #[error("Storage error: {0}")]
    Storage(#[from] KvError),

    /// Stored value is not a known preference
    #[error("Invalid stored value: {0}")]
    InvalidValue(#[from] UnknownThemePreference),
}

/// Result type for theme operations
pub type Result<T> = std::result::Result<T, ThemeError>;

/// Outcome of a preference change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeUpdate {
    /// Persisted and applied to the view and bridge
    Applied,
    /// Persisted, but the view was torn down before it could be applied
    Detached,
    /// Persisting failed; nothing changed
    Failed,
}

/// Theme preference store
pub struct ThemeStore {
    kv: Arc<dyn KeyValueStore>,
    bridge: Arc<dyn ColorSchemeBridge>,
    key: String,
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore").field("key", &self.key).finish_non_exhaustive()
    }
}

impl ThemeStore {
    /// Create a store persisting under the default key
    pub fn new(kv: Arc<dyn KeyValueStore>, bridge: Arc<dyn ColorSchemeBridge>) -> Self {
        Self { kv, bridge, key: THEME_PREFERENCE_KEY.to_string() }
    }

    /// Persist under a different key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Storage key in use
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Effective scheme reported by the bridge
    pub fn current_scheme(&self) -> ColorScheme {
        self.bridge.current()
    }

    /// Read the persisted preference; `None` when never saved
    pub async fn read(&self) -> Result<Option<ThemePreference>> {
        match self.kv.get(&self.key).await? {
            Some(raw) => Ok(Some(raw.parse()?)),
            None => Ok(None),
        }
    }

    /// Persist a preference
    pub async fn write(&self, preference: ThemePreference) -> Result<()> {
        self.kv.set(&self.key, preference.as_str()).await?;
        Ok(())
    }

    /// Push a preference into the bridge
    pub fn apply(&self, preference: ThemePreference) {
        self.bridge.set_override(SchemeOverride::from(preference));
    }

    /// Controller for a newly mounted view
    pub fn controller(self: &Arc<Self>) -> ThemeController {
        ThemeController::new(Arc::clone(self))
    }
}

/// Per-view handle on the theme store
pub struct ThemeController {
    store: Arc<ThemeStore>,
    liveness: Liveness,
    preference: RwLock<ThemePreference>,
}

impl std::fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeController")
            .field("preference", &*self.preference.read())
            .field("alive", &self.liveness.is_alive())
            .finish()
    }
}

impl ThemeController {
    /// Create a controller; the preference reads `System` until loaded
    pub fn new(store: Arc<ThemeStore>) -> Self {
        Self {
            store,
            liveness: Liveness::new(),
            preference: RwLock::new(ThemePreference::default()),
        }
    }

    /// Preference as the view currently shows it
    pub fn preference(&self) -> ThemePreference {
        *self.preference.read()
    }

    /// Position of the dark-mode switch
    pub fn is_dark(&self) -> bool {
        self.preference() == ThemePreference::Dark
    }

    /// Whether "use system setting" is the active choice
    pub fn follows_system(&self) -> bool {
        self.preference() == ThemePreference::System
    }

    /// Liveness flag of the owning view
    pub fn liveness(&self) -> &Liveness {
        &self.liveness
    }

    /// The owning view is going away
    pub fn teardown(&self) {
        if self.liveness.teardown() {
            tracing::debug!("theme controller torn down");
        }
    }

    /// Load the persisted preference into the view
    ///
    /// Missing or unreadable entries read as `System`. The result is
    /// discarded if the view was torn down while the read was in flight.
    pub async fn load(&self) -> ThemePreference {
        let loaded = match self.store.read().await {
            Ok(Some(preference)) => preference,
            Ok(None) => ThemePreference::System,
            Err(e) => {
                tracing::warn!("Failed to load theme preference: {}", e);
                ThemePreference::System
            }
        };

        if !self.liveness.is_alive() {
            tracing::debug!(%loaded, "discarding theme load for torn-down view");
            return loaded;
        }

        *self.preference.write() = loaded;
        if loaded.is_explicit() {
            self.store.apply(loaded);
        }
        loaded
    }

    /// Pin light or dark
    pub async fn set_explicit(&self, choice: ColorScheme) -> ThemeUpdate {
        self.save(ThemePreference::from(choice)).await
    }

    /// Follow the platform scheme
    pub async fn set_system(&self) -> ThemeUpdate {
        self.save(ThemePreference::System).await
    }

    /// Dark-mode switch changed position
    pub async fn toggle_dark(&self, is_dark: bool) -> ThemeUpdate {
        self.save(ThemePreference::from_dark_toggle(is_dark)).await
    }

    async fn save(&self, preference: ThemePreference) -> ThemeUpdate {
        if let Err(e) = self.store.write(preference).await {
            tracing::error!("Failed to save theme preference: {}", e);
            return ThemeUpdate::Failed;
        }

        if !self.liveness.is_alive() {
            tracing::debug!(%preference, "theme saved after view teardown");
            return ThemeUpdate::Detached;
        }

        *self.preference.write() = preference;
        self.store.apply(preference);
        ThemeUpdate::Applied
    }
}
