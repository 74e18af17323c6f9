//! localStorage-backed settings store. Every failure path degrades: a
//! missing or sandboxed storage object reads as "nothing stored" and
//! reports writes as unavailable, which the toggle layer ignores.

use nebula_core::{SettingsStore, StoreError};
use web_sys as web;

pub struct LocalStorage;

fn storage() -> Option<web::Storage> {
    web::window()?.local_storage().ok()?
}

impl SettingsStore for LocalStorage {
    fn load(&self, key: &str) -> Option<String> {
        storage()?.get_item(key).ok()?
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = storage().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StoreError::WriteFailed(format!("{e:?}")))
    }
}
