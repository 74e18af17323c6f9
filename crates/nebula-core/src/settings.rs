//! Persisted 3D-effects toggle. The flag defaults to enabled when nothing
//! is stored; persistence failures are logged and otherwise ignored, since
//! the preference is purely cosmetic.

use crate::constants::EFFECTS_ENABLED_KEY;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("settings storage unavailable")]
    Unavailable,
    #[error("settings write rejected: {0}")]
    WriteFailed(String),
}

/// Key-value persistence seam; the web front-end backs this with
/// localStorage, tests with an in-memory map.
pub trait SettingsStore {
    fn load(&self, key: &str) -> Option<String>;
    fn store(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

pub struct EffectsToggle<S> {
    enabled: bool,
    store: S,
}

impl<S: SettingsStore> EffectsToggle<S> {
    pub fn new(store: S) -> Self {
        let enabled = store
            .load(EFFECTS_ENABLED_KEY)
            .map(|v| v == "true")
            .unwrap_or(true);
        Self { enabled, store }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flip and persist. The new value is authoritative in memory even when
    /// the write fails.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        let value = if self.enabled { "true" } else { "false" };
        if let Err(e) = self.store.store(EFFECTS_ENABLED_KEY, value) {
            log::debug!("[toggle] persist failed: {e}");
        }
        log::info!("[toggle] 3d effects {}", value);
        self.enabled
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
