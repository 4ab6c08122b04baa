//! Browser key/value storage contracts and in-memory adapters.
//!
//! The client keeps two scopes of opaque string state: durable values
//! (auth session, upload history) and tab-local values (resolved sort
//! preference). Both scopes speak the same synchronous [`KeyValueStore`]
//! contract; `store_host_web` maps them onto `localStorage` and
//! `sessionStorage`. Value formats are internal to this client only.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};

/// Durable key holding the raw bearer token.
pub const AUTH_TOKEN_KEY: &str = "shelf.auth.token.v1";
/// Durable key holding the serialized [`crate::AuthUser`].
pub const AUTH_USER_KEY: &str = "shelf.auth.user.v1";
/// Durable key holding the upload-history log.
pub const UPLOAD_HISTORY_KEY: &str = "shelf.uploads.history.v1";
/// Tab-local key holding the resolved sort column token.
pub const SORT_COLUMN_KEY: &str = "shelf.browser.sort-column.v1";
/// Tab-local key holding the resolved sort order token.
pub const SORT_ORDER_KEY: &str = "shelf.browser.sort-order.v1";

/// Synchronous string key/value store backed by a browser storage area.
///
/// Web storage is synchronous at the platform boundary, so the contract is
/// too; async composition happens above this seam where needed.
pub trait KeyValueStore {
    /// Reads the raw value for `key`, `None` when absent or unavailable.
    fn load(&self, key: &str) -> Option<String>;

    /// Writes the raw value for `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage area rejects the write.
    fn save(&self, key: &str, value: &str) -> Result<(), String>;

    /// Removes `key` from the store.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage area rejects the removal.
    fn remove(&self, key: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Store that holds nothing, for unsupported targets and baseline tests.
pub struct NoopKeyValueStore;

impl KeyValueStore for NoopKeyValueStore {
    fn load(&self, _key: &str) -> Option<String> {
        None
    }

    fn save(&self, _key: &str, _value: &str) -> Result<(), String> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory store shared by clones, used by tests and non-wasm targets.
pub struct MemoryKeyValueStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl KeyValueStore for MemoryKeyValueStore {
    fn load(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) -> Result<(), String> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }
}

/// Loads and deserializes a JSON-typed value through a [`KeyValueStore`].
pub fn load_typed_with<S: KeyValueStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Option<T> {
    let raw = store.load(key)?;
    serde_json::from_str(&raw).ok()
}

/// Serializes and saves a JSON-typed value through a [`KeyValueStore`].
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub fn save_typed_with<S: KeyValueStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(value).map_err(|e| e.to_string())?;
    store.save(key, &raw)
}
