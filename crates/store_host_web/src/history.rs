//! URL and history access for the browser view.
//!
//! The sort-state resolver computes canonical query strings as pure data;
//! this module is the only place that touches `window.location` and
//! `window.history`.

/// Returns the current store path from `location.pathname`.
pub fn current_store_path() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_else(|| "/".to_string())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        "/".to_string()
    }
}

/// Returns the current query string including its leading `?`, or empty.
pub fn current_search() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        String::new()
    }
}

/// Replaces the current history entry with a new query string for the same
/// path. Never pushes, so sort canonicalization cannot create ghost
/// back-steps.
///
/// # Errors
///
/// Returns an error when the history API rejects the replacement.
pub fn replace_search(search: &str) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
        let pathname = window
            .location()
            .pathname()
            .map_err(|e| format!("location read failed: {e:?}"))?;
        let url = format!("{pathname}{search}");
        window
            .history()
            .map_err(|e| format!("history unavailable: {e:?}"))?
            .replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url))
            .map_err(|e| format!("replaceState failed: {e:?}"))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = search;
        Ok(())
    }
}

/// Navigates the browser to a URL. Batch downloads go through here so the
/// response streams as a normal download instead of a fetch body.
///
/// # Errors
///
/// Returns an error when the navigation is rejected.
pub fn navigate_to(url: &str) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .ok_or_else(|| "window unavailable".to_string())?
            .location()
            .assign(url)
            .map_err(|e| format!("navigation failed: {e:?}"))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = url;
        Ok(())
    }
}
