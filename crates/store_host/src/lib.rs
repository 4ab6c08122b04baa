//! Typed contracts and shared models for the shelf artifact-store client.
//!
//! This crate is the API-first boundary between the browser runtime and the
//! backend store. It exposes the entry/policy wire models, the store API
//! service trait with in-memory test adapters, key/value storage contracts
//! for browser-local state, and the pure display helpers used by the file
//! browser. Concrete browser adapters live in `store_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod auth;
pub mod error;
pub mod format;
pub mod fs;
pub mod storage;
pub mod time;

pub use auth::{clear_auth_session, load_auth_token, load_auth_user, save_auth_session, AuthUser};
pub use error::ApiError;
pub use fs::path::{
    decode_query_component, encode_query_component, join_store_path, normalize_store_path,
    parent_store_path,
};
pub use fs::service::{
    batch_download_url, delete_url, fs_api_url, ListOutcome, MemoryStoreApi, NoopStoreApi,
    StoreApiFuture, StoreApiService, API_BASE_URL, BATCH_ENDPOINT,
};
pub use fs::types::{
    AccessPolicy, CreateRequest, DownloadMode, EntryPatch, EntryTag, StoreEntry,
};
pub use storage::{
    load_typed_with, save_typed_with, KeyValueStore, MemoryKeyValueStore, NoopKeyValueStore,
    AUTH_TOKEN_KEY, AUTH_USER_KEY, SORT_COLUMN_KEY, SORT_ORDER_KEY, UPLOAD_HISTORY_KEY,
};
pub use time::{parse_rfc3339_ms, unix_time_ms_now};
