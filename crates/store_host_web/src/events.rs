//! Window-level events the client components coordinate through.

/// Fired when any request comes back 401 and the login prompt must open.
pub const REQUIRE_LOGIN_EVENT: &str = "shelf:require-login";

/// Fired after a successful mutation so the active view refetches.
pub const REFRESH_EVENT: &str = "shelf:refresh";

/// Fired with an entry path as detail to open the info dialog.
pub const ENTRY_INFO_EVENT: &str = "shelf:entry-info";

/// Fired with an entry path as detail to open the edit dialog.
pub const ENTRY_EDIT_EVENT: &str = "shelf:entry-edit";

/// Dispatches a bare named event on `window`.
///
/// # Errors
///
/// Returns an error when the event cannot be constructed or dispatched.
pub fn dispatch_window_event(name: &str) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
        let event = web_sys::CustomEvent::new(name)
            .map_err(|e| format!("event construction failed: {e:?}"))?;
        window
            .dispatch_event(&event)
            .map(|_| ())
            .map_err(|e| format!("event dispatch failed: {e:?}"))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = name;
        Ok(())
    }
}

/// Dispatches a named event on `window` carrying an entry path as its
/// detail. Dialog components listen for these instead of being threaded
/// through the row layer.
///
/// # Errors
///
/// Returns an error when the event cannot be constructed or dispatched.
pub fn dispatch_entry_event(name: &str, path: &str) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
        let init = web_sys::CustomEventInit::new();
        init.set_detail(&wasm_bindgen::JsValue::from_str(path));
        let event = web_sys::CustomEvent::new_with_event_init_dict(name, &init)
            .map_err(|e| format!("event construction failed: {e:?}"))?;
        window
            .dispatch_event(&event)
            .map(|_| ())
            .map_err(|e| format!("event dispatch failed: {e:?}"))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (name, path);
        Ok(())
    }
}
