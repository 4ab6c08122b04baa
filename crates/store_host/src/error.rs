//! Typed error taxonomy for backend store requests.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Classified failure of a store API request.
pub enum ApiError {
    /// The requested path does not exist (HTTP 404).
    #[error("not found")]
    NotFound,
    /// The session token is missing or expired (HTTP 401).
    #[error("session expired, please log in")]
    AuthRequired,
    /// The server rejected the request with a user-facing message (other 4xx).
    #[error("{0}")]
    Validation(String),
    /// Network failure, malformed response, or server fault.
    #[error("request failed: {0}")]
    Transport(String),
}

impl ApiError {
    /// Classifies an HTTP status plus the optional `{"error": …}` body message.
    ///
    /// Statuses below 400 must not be passed here; they are not errors.
    pub fn from_status(status: u16, body_error: Option<String>) -> Self {
        match status {
            401 => Self::AuthRequired,
            404 => Self::NotFound,
            402..=499 => match body_error {
                Some(message) if !message.is_empty() => Self::Validation(message),
                _ => Self::Validation(format!("request rejected with status {status}")),
            },
            _ => Self::Transport(
                body_error.unwrap_or_else(|| format!("server returned status {status}")),
            ),
        }
    }

    /// Returns `true` when the failure should trigger the global login prompt.
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::AuthRequired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_statuses_into_the_taxonomy() {
        assert_eq!(ApiError::from_status(404, None), ApiError::NotFound);
        assert_eq!(
            ApiError::from_status(401, Some("token expired".to_string())),
            ApiError::AuthRequired
        );
        assert_eq!(
            ApiError::from_status(400, Some("bad tag syntax".to_string())),
            ApiError::Validation("bad tag syntax".to_string())
        );
        assert_eq!(
            ApiError::from_status(500, None),
            ApiError::Transport("server returned status 500".to_string())
        );
    }

    #[test]
    fn validation_without_body_keeps_the_status_visible() {
        let err = ApiError::from_status(422, None);
        assert_eq!(
            err,
            ApiError::Validation("request rejected with status 422".to_string())
        );
    }

    #[test]
    fn only_auth_failures_request_login() {
        assert!(ApiError::AuthRequired.requires_login());
        assert!(!ApiError::NotFound.requires_login());
        assert!(!ApiError::Transport("offline".to_string()).requires_login());
    }
}
