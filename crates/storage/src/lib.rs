//! Storage layer for Vision Shell
//!
//! This crate provides the key-value abstraction the UI layer persists its
//! preferences through, a sled-backed implementation, and the persisted
//! preference value types.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod kv;
pub mod preferences;

pub use kv::{KeyValueStore, KvConfig, KvError, KvStore, MemoryStore};
pub use preferences::{ThemePreference, UnknownThemePreference, THEME_PREFERENCE_KEY};
