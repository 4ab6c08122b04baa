//! Web storage adapters for the client's two key/value scopes.
//!
//! Durable state (auth session, upload history) maps onto `localStorage`;
//! tab-local state (resolved sort preference) maps onto `sessionStorage`.
//! Both speak [`store_host::KeyValueStore`] and degrade to empty stores off
//! the browser.

use store_host::KeyValueStore;

#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StorageArea {
    Local,
    Session,
}

#[cfg(target_arch = "wasm32")]
fn storage_area(area: StorageArea) -> Option<web_sys::Storage> {
    let window = web_sys::window()?;
    match area {
        StorageArea::Local => window.local_storage().ok().flatten(),
        StorageArea::Session => window.session_storage().ok().flatten(),
    }
}

#[cfg(target_arch = "wasm32")]
fn load_from(area: StorageArea, key: &str) -> Option<String> {
    storage_area(area)?.get_item(key).ok().flatten()
}

#[cfg(target_arch = "wasm32")]
fn save_to(area: StorageArea, key: &str, value: &str) -> Result<(), String> {
    storage_area(area)
        .ok_or_else(|| "web storage unavailable".to_string())?
        .set_item(key, value)
        .map_err(|e| format!("web storage set_item failed: {e:?}"))
}

#[cfg(target_arch = "wasm32")]
fn remove_from(area: StorageArea, key: &str) -> Result<(), String> {
    storage_area(area)
        .ok_or_else(|| "web storage unavailable".to_string())?
        .remove_item(key)
        .map_err(|e| format!("web storage remove_item failed: {e:?}"))
}

#[derive(Debug, Clone, Copy, Default)]
/// Durable store backed by `window.localStorage`.
pub struct WebLocalStore;

impl KeyValueStore for WebLocalStore {
    fn load(&self, key: &str) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            load_from(StorageArea::Local, key)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            None
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            save_to(StorageArea::Local, key, value)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, value);
            Ok(())
        }
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            remove_from(StorageArea::Local, key)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(())
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Tab-local store backed by `window.sessionStorage`.
pub struct WebSessionStore;

impl KeyValueStore for WebSessionStore {
    fn load(&self, key: &str) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            load_from(StorageArea::Session, key)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            None
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            save_to(StorageArea::Session, key, value)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, value);
            Ok(())
        }
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            remove_from(StorageArea::Session, key)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_wasm_fallback_is_empty_and_successful() {
        let local = WebLocalStore;
        assert_eq!(local.load("k"), None);
        local.save("k", "v").expect("save");
        local.remove("k").expect("remove");

        let session = WebSessionStore;
        assert_eq!(session.load("k"), None);
        session.save("k", "v").expect("save");
        session.remove("k").expect("remove");
    }
}
