//! Entry wire models shared across the client.
//!
//! Serde names match the backend's JSON exactly; the backend omits false
//! booleans and empty collections, so everything optional carries a
//! `default`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
/// Server-computed authorization flags for one entry.
///
/// The client never mutates these; they gate which row actions render
/// enabled. An absent `is_allowed` means the entry is outside the caller's
/// scope.
pub struct AccessPolicy {
    /// Entry is locked immutable by a direct flag on the record.
    #[serde(default)]
    pub is_immutable: bool,
    /// Entry sits under a server-side protected path.
    #[serde(default)]
    pub is_protected: bool,
    /// Caller's token scope covers this entry.
    #[serde(default)]
    pub is_allowed: bool,
}

impl AccessPolicy {
    /// Policy of an entry the caller may freely mutate.
    pub const fn unrestricted() -> Self {
        Self {
            is_immutable: false,
            is_protected: false,
            is_allowed: true,
        }
    }

    /// Returns `true` when any flag restricts mutation.
    pub fn restricts(&self) -> bool {
        self.is_immutable || self.is_protected || !self.is_allowed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One ordered metadata tag; `value` may be empty for bare tags.
pub struct EntryTag {
    /// Tag key.
    pub key: String,
    /// Optional tag value.
    #[serde(default)]
    pub value: String,
}

impl EntryTag {
    /// Renders the tag the way badges and the edit form show it.
    pub fn display(&self) -> String {
        if self.value.is_empty() {
            self.key.clone()
        } else {
            format!("{}={}", self.key, self.value)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
/// How a directory is packaged by a batch download.
pub enum DownloadMode {
    /// Keep the selected folder name as the archive root.
    #[default]
    Literal,
    /// Flatten selected folders into the archive root.
    Merge,
}

impl DownloadMode {
    /// Stable wire token, also used in batch-download query strings.
    pub const fn as_token(self) -> &'static str {
        match self {
            Self::Literal => "literal",
            Self::Merge => "merge",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One filesystem node as returned by the listing endpoint.
pub struct StoreEntry {
    /// Base name, unique within its parent directory.
    pub name: String,
    /// Directory flag.
    #[serde(rename = "isdir", default)]
    pub is_dir: bool,
    /// Size in bytes; meaningless for directories.
    #[serde(default)]
    pub size: u64,
    /// RFC 3339 modification time, zero-date sentinel when unset.
    #[serde(default)]
    pub modtime: String,
    /// RFC 3339 expiry, absent or zero-date when the entry never expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    /// Ordered metadata tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<EntryTag>,
    /// Logical origin stream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<String>,
    /// Logical origin group within the stream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Keep-latest retention flag.
    #[serde(default)]
    pub keep_latest: bool,
    /// Server-computed authorization flags.
    #[serde(default)]
    pub policy: AccessPolicy,
    /// Batch-download packaging mode; directories only.
    #[serde(default)]
    pub download_mode: DownloadMode,
}

impl StoreEntry {
    /// Returns the `stream/group` origin label when the entry has one.
    pub fn origin_label(&self) -> Option<String> {
        let stream = self.stream.as_deref().filter(|s| !s.is_empty())?;
        let group = self.group.as_deref().unwrap_or("");
        Some(format!("{stream}/{group}"))
    }

    /// Returns the expiry timestamp unless it is the zero-date sentinel.
    pub fn effective_expiry(&self) -> Option<&str> {
        self.expires_at
            .as_deref()
            .filter(|raw| !crate::format::is_zero_date(raw))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
/// PATCH body carrying only the fields the user actually changed.
pub struct EntryPatch {
    /// Comma-separated tag list replacement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    /// Immutable lock flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub immutable: Option<bool>,
    /// Keep-latest retention flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_latest: Option<bool>,
    /// New expiry: an RFC 3339 instant or a duration token the backend
    /// parses (for example `7d`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    /// New `stream/group` origin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<String>,
    /// New content type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contenttype: Option<String>,
    /// New batch-download packaging mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_mode: Option<DownloadMode>,
}

impl EntryPatch {
    /// Returns `true` when no field changed and the PATCH can be skipped.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// POST body for the two non-upload mutations on a path.
pub enum CreateRequest {
    /// Create a directory at the request path.
    #[serde(rename = "create_dir")]
    CreateDir(bool),
    /// Rename the entry at the request path within its parent.
    #[serde(rename = "rename_to")]
    RenameTo(String),
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn entry_deserializes_backend_listing_json() {
        let raw = json!({
            "name": "app-v2.zip",
            "isdir": false,
            "size": 10_485_760u64,
            "modtime": "2026-02-20T08:30:00Z",
            "expires_at": "2026-03-01T00:00:00Z",
            "tags": [{"key": "env", "value": "prod"}, {"key": "pinned"}],
            "stream": "nightly",
            "group": "linux-x64",
            "keep_latest": true,
            "policy": {"is_immutable": true, "is_allowed": true},
            "download_mode": "literal"
        });

        let entry: StoreEntry = serde_json::from_value(raw).expect("deserialize");
        assert_eq!(entry.name, "app-v2.zip");
        assert!(!entry.is_dir);
        assert!(entry.keep_latest);
        assert!(entry.policy.is_immutable);
        assert!(!entry.policy.is_protected);
        assert_eq!(entry.tags[0].display(), "env=prod");
        assert_eq!(entry.tags[1].display(), "pinned");
        assert_eq!(entry.origin_label(), Some("nightly/linux-x64".to_string()));
        assert_eq!(entry.effective_expiry(), Some("2026-03-01T00:00:00Z"));
    }

    #[test]
    fn omitted_booleans_default_to_restricted() {
        // The backend drops false flags entirely, so a bare policy object
        // must read as out-of-scope.
        let entry: StoreEntry =
            serde_json::from_value(json!({"name": "secret.bin", "isdir": false, "size": 1,
                "modtime": "2026-01-01T00:00:00Z", "policy": {}}))
            .expect("deserialize");
        assert!(!entry.policy.is_allowed);
        assert!(entry.policy.restricts());
    }

    #[test]
    fn zero_date_expiry_reads_as_no_expiry() {
        let entry: StoreEntry = serde_json::from_value(json!({
            "name": "sub", "isdir": true, "size": 0,
            "modtime": "2026-01-01T00:00:00Z",
            "expires_at": "0001-01-01T00:00:00Z"
        }))
        .expect("deserialize");
        assert_eq!(entry.effective_expiry(), None);
    }

    #[test]
    fn download_mode_uses_lowercase_tokens() {
        assert_eq!(
            serde_json::to_string(&DownloadMode::Literal).expect("serialize"),
            "\"literal\""
        );
        assert_eq!(
            serde_json::from_str::<DownloadMode>("\"merge\"").expect("deserialize"),
            DownloadMode::Merge
        );
    }

    #[test]
    fn patch_serializes_changed_fields_only() {
        let patch = EntryPatch {
            immutable: Some(true),
            expires_at: Some("7d".to_string()),
            ..EntryPatch::default()
        };
        assert!(!patch.is_empty());
        assert_eq!(
            serde_json::to_value(&patch).expect("serialize"),
            json!({"immutable": true, "expires_at": "7d"})
        );
        assert!(EntryPatch::default().is_empty());
    }

    #[test]
    fn create_requests_match_the_post_bodies() {
        assert_eq!(
            serde_json::to_value(CreateRequest::CreateDir(true)).expect("serialize"),
            json!({"create_dir": true})
        );
        assert_eq!(
            serde_json::to_value(CreateRequest::RenameTo("v2".to_string())).expect("serialize"),
            json!({"rename_to": "v2"})
        );
    }
}
