//! LocalStorage persistence
//!
//! Values are stored as JSON under a fixed key. Native builds have no
//! backing store: loads find nothing and saves are dropped.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageError;

/// Load and parse the value stored under `key`, if any
#[cfg(target_arch = "wasm32")]
pub fn load_json<T: DeserializeOwned>(key: &str) -> Result<Option<T>, StorageError> {
    let storage = local_storage()?;
    let raw = storage
        .get_item(key)
        .map_err(|e| StorageError::Access(format!("{e:?}")))?;
    match raw {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Serialize `value` and store it under `key`
#[cfg(target_arch = "wasm32")]
pub fn save_json<T: Serialize>(key: &str, value: &T) -> Result<(), StorageError> {
    let json = serde_json::to_string(value)?;
    local_storage()?
        .set_item(key, &json)
        .map_err(|e| StorageError::Access(format!("{e:?}")))
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
        .ok_or(StorageError::Unavailable)
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load_json<T: DeserializeOwned>(_key: &str) -> Result<Option<T>, StorageError> {
    Ok(None)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_json<T: Serialize>(_key: &str, value: &T) -> Result<(), StorageError> {
    // Still serialize so native runs catch unserializable values
    serde_json::to_string(value)?;
    Ok(())
}

/// Load `key`, falling back to `T::default()` on a missing or bad value
pub fn load_or_default<T: DeserializeOwned + Default>(key: &str) -> T {
    match load_json(key) {
        Ok(Some(value)) => {
            log::info!("Loaded {key} from storage");
            value
        }
        Ok(None) => {
            log::info!("No {key} in storage, using defaults");
            T::default()
        }
        Err(e) => {
            log::warn!("Failed to load {key}: {e}");
            T::default()
        }
    }
}

/// Save `value`, logging instead of failing
pub fn save_or_warn<T: Serialize>(key: &str, value: &T) {
    match save_json(key, value) {
        Ok(()) => log::info!("Saved {key}"),
        Err(e) => log::warn!("Failed to save {key}: {e}"),
    }
}
