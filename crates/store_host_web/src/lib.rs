//! Browser (`wasm32`) implementations of [`store_host`] service contracts.
//!
//! Concrete adapters for the fetch-backed store API client, the
//! localStorage/sessionStorage key/value stores, window-level events, and
//! URL/history access. Every adapter carries a non-wasm fallback so the
//! engine crates stay testable on the host.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod events;
pub mod history;
pub mod http;
pub mod storage;

pub use events::{
    dispatch_entry_event, dispatch_window_event, ENTRY_EDIT_EVENT, ENTRY_INFO_EVENT,
    REFRESH_EVENT, REQUIRE_LOGIN_EVENT,
};
pub use history::{current_search, current_store_path, navigate_to, replace_search};
pub use http::HttpStoreApi;
pub use storage::{WebLocalStore, WebSessionStore};
