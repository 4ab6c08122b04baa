//! Auth session state kept in durable browser storage.
//!
//! Only the storage surface lives here; credential exchange is a backend
//! concern reached through the login endpoint.

use serde::{Deserialize, Serialize};

use crate::storage::{
    load_typed_with, save_typed_with, KeyValueStore, AUTH_TOKEN_KEY, AUTH_USER_KEY,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Minimal identity snapshot stored next to the bearer token.
pub struct AuthUser {
    /// Login name shown in the header.
    pub username: String,
    /// Whether admin-only surfaces should be offered.
    pub is_admin: bool,
}

/// Reads the stored bearer token, `None` when logged out.
pub fn load_auth_token<S: KeyValueStore + ?Sized>(store: &S) -> Option<String> {
    store.load(AUTH_TOKEN_KEY).filter(|token| !token.is_empty())
}

/// Reads the stored identity snapshot.
pub fn load_auth_user<S: KeyValueStore + ?Sized>(store: &S) -> Option<AuthUser> {
    load_typed_with(store, AUTH_USER_KEY)
}

/// Persists a fresh login session.
///
/// # Errors
///
/// Returns an error when either storage write fails.
pub fn save_auth_session<S: KeyValueStore + ?Sized>(
    store: &S,
    token: &str,
    user: &AuthUser,
) -> Result<(), String> {
    store.save(AUTH_TOKEN_KEY, token)?;
    save_typed_with(store, AUTH_USER_KEY, user)
}

/// Drops both session keys, used by logout and by the global 401 handler.
///
/// # Errors
///
/// Returns an error when either storage removal fails.
pub fn clear_auth_session<S: KeyValueStore + ?Sized>(store: &S) -> Result<(), String> {
    store.remove(AUTH_TOKEN_KEY)?;
    store.remove(AUTH_USER_KEY)
}
