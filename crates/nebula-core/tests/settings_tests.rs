use nebula_core::{EffectsToggle, SettingsStore, StoreError, EFFECTS_ENABLED_KEY};
use std::collections::HashMap;

#[derive(Default)]
struct MemoryStore {
    map: HashMap<String, String>,
}

impl SettingsStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }
    fn store(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store whose writes always fail, as when localStorage is unavailable.
struct BrokenStore;

impl SettingsStore for BrokenStore {
    fn load(&self, _key: &str) -> Option<String> {
        None
    }
    fn store(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }
}

#[test]
fn defaults_to_enabled_when_nothing_is_stored() {
    let toggle = EffectsToggle::new(MemoryStore::default());
    assert!(toggle.is_enabled());
}

#[test]
fn respects_a_stored_false() {
    let mut store = MemoryStore::default();
    store
        .store(EFFECTS_ENABLED_KEY, "false")
        .expect("memory store");
    let toggle = EffectsToggle::new(store);
    assert!(!toggle.is_enabled());
}

#[test]
fn garbage_in_storage_reads_as_disabled() {
    // Anything that is not the literal "true" is boolean-coerced to false.
    let mut store = MemoryStore::default();
    store.store(EFFECTS_ENABLED_KEY, "yes").expect("memory store");
    let toggle = EffectsToggle::new(store);
    assert!(!toggle.is_enabled());
}

#[test]
fn double_toggle_round_trips_and_persists_each_step() {
    let mut toggle = EffectsToggle::new(MemoryStore::default());
    let original = toggle.is_enabled();

    let flipped = toggle.toggle();
    assert_eq!(flipped, !original);
    assert_eq!(
        toggle.store().load(EFFECTS_ENABLED_KEY).as_deref(),
        Some("false")
    );

    let restored = toggle.toggle();
    assert_eq!(restored, original);
    assert_eq!(
        toggle.store().load(EFFECTS_ENABLED_KEY).as_deref(),
        Some("true")
    );
}

#[test]
fn write_failures_are_swallowed() {
    let mut toggle = EffectsToggle::new(BrokenStore);
    assert!(toggle.is_enabled());
    assert!(!toggle.toggle(), "in-memory flag flips even when persist fails");
    assert!(toggle.toggle());
}
