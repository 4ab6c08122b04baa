//! Store API service contract with in-memory adapters.

use std::{
    cell::RefCell,
    collections::HashMap,
    future::Future,
    pin::Pin,
    rc::Rc,
};

use crate::error::ApiError;
use crate::fs::path::{encode_query_component, join_store_path, normalize_store_path, parent_store_path};
use crate::fs::types::{DownloadMode, EntryPatch, EntryTag, StoreEntry};

/// Metadata API prefix; file bytes are served off the bare path.
pub const API_BASE_URL: &str = "/_/api/v1";

/// Batch-download endpoint reached by browser navigation, not fetch.
pub const BATCH_ENDPOINT: &str = "/_/api/v1/batch";

/// Builds the metadata URL for a store path.
pub fn fs_api_url(path: &str) -> String {
    format!("{API_BASE_URL}/fs{}", normalize_store_path(path))
}

/// Builds the deletion URL for a store path.
///
/// Deletes address the entry's own path; the server routes them through
/// its fallback handler rather than the metadata group.
pub fn delete_url(path: &str) -> String {
    normalize_store_path(path)
}

/// Builds the batch-download navigation URL for a set of selected paths.
///
/// Every path becomes one repeated `p` parameter; the optional packaging
/// mode is appended last.
pub fn batch_download_url(paths: &[String], mode: Option<DownloadMode>) -> String {
    let mut url = String::from(BATCH_ENDPOINT);
    let mut separator = '?';
    for path in paths {
        url.push(separator);
        url.push_str("p=");
        url.push_str(&encode_query_component(&normalize_store_path(path)));
        separator = '&';
    }
    if let Some(mode) = mode {
        url.push(separator);
        url.push_str("mode=");
        url.push_str(mode.as_token());
    }
    url
}

/// Payload of a successful `GET` on a store path.
#[derive(Debug, Clone, PartialEq)]
pub enum ListOutcome {
    /// The path is a directory; children in backend order.
    Listing(Vec<StoreEntry>),
    /// The path exists but is a single file, not a directory.
    NotADirectory,
}

/// Object-safe boxed future used by [`StoreApiService`] methods.
pub type StoreApiFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Typed client for the backend store endpoints the browser view uses.
pub trait StoreApiService {
    /// Fetches the listing (or file metadata) for a path.
    fn list_dir<'a>(&'a self, path: &'a str)
        -> StoreApiFuture<'a, Result<ListOutcome, ApiError>>;

    /// Deletes a file or directory (directories recurse server-side).
    fn delete<'a>(&'a self, path: &'a str) -> StoreApiFuture<'a, Result<(), ApiError>>;

    /// Applies a changed-fields-only metadata patch.
    fn patch_entry<'a>(
        &'a self,
        path: &'a str,
        patch: &'a EntryPatch,
    ) -> StoreApiFuture<'a, Result<StoreEntry, ApiError>>;

    /// Creates a directory at the path.
    fn create_dir<'a>(&'a self, path: &'a str) -> StoreApiFuture<'a, Result<(), ApiError>>;

    /// Renames the entry at the path within its parent directory.
    fn rename<'a>(
        &'a self,
        path: &'a str,
        new_name: &'a str,
    ) -> StoreApiFuture<'a, Result<(), ApiError>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Adapter that fails every call, for unsupported targets and baseline
/// tests.
pub struct NoopStoreApi;

impl NoopStoreApi {
    fn unavailable(op: &str) -> ApiError {
        ApiError::Transport(format!("store api unavailable: {op}"))
    }
}

impl StoreApiService for NoopStoreApi {
    fn list_dir<'a>(
        &'a self,
        _path: &'a str,
    ) -> StoreApiFuture<'a, Result<ListOutcome, ApiError>> {
        Box::pin(async { Err(Self::unavailable("list_dir")) })
    }

    fn delete<'a>(&'a self, _path: &'a str) -> StoreApiFuture<'a, Result<(), ApiError>> {
        Box::pin(async { Err(Self::unavailable("delete")) })
    }

    fn patch_entry<'a>(
        &'a self,
        _path: &'a str,
        _patch: &'a EntryPatch,
    ) -> StoreApiFuture<'a, Result<StoreEntry, ApiError>> {
        Box::pin(async { Err(Self::unavailable("patch_entry")) })
    }

    fn create_dir<'a>(&'a self, _path: &'a str) -> StoreApiFuture<'a, Result<(), ApiError>> {
        Box::pin(async { Err(Self::unavailable("create_dir")) })
    }

    fn rename<'a>(
        &'a self,
        _path: &'a str,
        _new_name: &'a str,
    ) -> StoreApiFuture<'a, Result<(), ApiError>> {
        Box::pin(async { Err(Self::unavailable("rename")) })
    }
}

#[derive(Debug, Default)]
struct MemoryTree {
    /// Normalized directory path to children in insertion order.
    dirs: HashMap<String, Vec<StoreEntry>>,
}

impl MemoryTree {
    fn child_mut(&mut self, parent: &str, name: &str) -> Option<&mut StoreEntry> {
        self.dirs
            .get_mut(parent)?
            .iter_mut()
            .find(|entry| entry.name == name)
    }

    fn remove_child(&mut self, parent: &str, name: &str) -> Option<StoreEntry> {
        let children = self.dirs.get_mut(parent)?;
        let idx = children.iter().position(|entry| entry.name == name)?;
        Some(children.remove(idx))
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory store tree used by unit and scenario tests.
pub struct MemoryStoreApi {
    inner: Rc<RefCell<MemoryTree>>,
}

impl MemoryStoreApi {
    /// Creates an empty store with a root directory.
    pub fn new() -> Self {
        let api = Self::default();
        api.inner
            .borrow_mut()
            .dirs
            .insert("/".to_string(), Vec::new());
        api
    }

    /// Seeds an entry under `parent`, registering directories for listing.
    pub fn seed(&self, parent: &str, entry: StoreEntry) {
        let parent = normalize_store_path(parent);
        let mut tree = self.inner.borrow_mut();
        if entry.is_dir {
            let dir_path = join_store_path(&parent, &entry.name);
            tree.dirs.entry(dir_path).or_default();
        }
        tree.dirs.entry(parent).or_default().push(entry);
    }

    fn split(path: &str) -> (String, String) {
        let normalized = normalize_store_path(path);
        let parent = parent_store_path(&normalized);
        let name = normalized
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        (parent, name)
    }
}

impl StoreApiService for MemoryStoreApi {
    fn list_dir<'a>(&'a self, path: &'a str) -> StoreApiFuture<'a, Result<ListOutcome, ApiError>> {
        Box::pin(async move {
            let normalized = normalize_store_path(path);
            let tree = self.inner.borrow();
            if let Some(children) = tree.dirs.get(&normalized) {
                return Ok(ListOutcome::Listing(children.clone()));
            }
            let parent = parent_store_path(&normalized);
            let name = normalized.rsplit('/').next().unwrap_or_default();
            let is_file = tree
                .dirs
                .get(&parent)
                .is_some_and(|children| children.iter().any(|entry| entry.name == name));
            if is_file {
                Ok(ListOutcome::NotADirectory)
            } else {
                Err(ApiError::NotFound)
            }
        })
    }

    fn delete<'a>(&'a self, path: &'a str) -> StoreApiFuture<'a, Result<(), ApiError>> {
        Box::pin(async move {
            let (parent, name) = Self::split(path);
            let mut tree = self.inner.borrow_mut();
            let removed = tree.remove_child(&parent, &name).ok_or(ApiError::NotFound)?;
            if removed.is_dir {
                let prefix = join_store_path(&parent, &name);
                tree.dirs
                    .retain(|dir, _| dir != &prefix && !dir.starts_with(&format!("{prefix}/")));
            }
            Ok(())
        })
    }

    fn patch_entry<'a>(
        &'a self,
        path: &'a str,
        patch: &'a EntryPatch,
    ) -> StoreApiFuture<'a, Result<StoreEntry, ApiError>> {
        Box::pin(async move {
            let (parent, name) = Self::split(path);
            let mut tree = self.inner.borrow_mut();
            let entry = tree.child_mut(&parent, &name).ok_or(ApiError::NotFound)?;

            if let Some(raw_tags) = &patch.tags {
                entry.tags = raw_tags
                    .split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(|tag| match tag.split_once('=') {
                        Some((key, value)) => EntryTag {
                            key: key.trim().to_string(),
                            value: value.trim().to_string(),
                        },
                        None => EntryTag {
                            key: tag.to_string(),
                            value: String::new(),
                        },
                    })
                    .collect();
            }
            if let Some(immutable) = patch.immutable {
                entry.policy.is_immutable = immutable;
            }
            if let Some(keep_latest) = patch.keep_latest {
                entry.keep_latest = keep_latest;
            }
            if let Some(expires_at) = &patch.expires_at {
                entry.expires_at = Some(expires_at.clone());
            }
            if let Some(origin) = &patch.stream {
                match origin.split_once('/') {
                    Some((stream, group)) => {
                        entry.stream = Some(stream.to_string());
                        entry.group = Some(group.to_string());
                    }
                    None if origin.is_empty() => {
                        entry.stream = None;
                        entry.group = None;
                    }
                    None => {
                        entry.stream = Some(origin.clone());
                        entry.group = None;
                    }
                }
            }
            if let Some(mode) = patch.download_mode {
                entry.download_mode = mode;
            }
            Ok(entry.clone())
        })
    }

    fn create_dir<'a>(&'a self, path: &'a str) -> StoreApiFuture<'a, Result<(), ApiError>> {
        Box::pin(async move {
            let (parent, name) = Self::split(path);
            let mut tree = self.inner.borrow_mut();
            if !tree.dirs.contains_key(&parent) {
                return Err(ApiError::NotFound);
            }
            let exists = tree
                .dirs
                .get(&parent)
                .is_some_and(|children| children.iter().any(|entry| entry.name == name));
            if exists {
                return Err(ApiError::Validation(format!("{name} already exists")));
            }
            tree.dirs.insert(join_store_path(&parent, &name), Vec::new());
            tree.dirs
                .entry(parent)
                .or_default()
                .push(StoreEntry {
                    name,
                    is_dir: true,
                    size: 0,
                    modtime: String::new(),
                    expires_at: None,
                    tags: Vec::new(),
                    stream: None,
                    group: None,
                    keep_latest: false,
                    policy: crate::fs::types::AccessPolicy::unrestricted(),
                    download_mode: DownloadMode::Literal,
                });
            Ok(())
        })
    }

    fn rename<'a>(
        &'a self,
        path: &'a str,
        new_name: &'a str,
    ) -> StoreApiFuture<'a, Result<(), ApiError>> {
        Box::pin(async move {
            let (parent, name) = Self::split(path);
            let mut tree = self.inner.borrow_mut();
            let mut entry = tree.remove_child(&parent, &name).ok_or(ApiError::NotFound)?;
            entry.name = new_name.to_string();
            if entry.is_dir {
                let old_dir = join_store_path(&parent, &name);
                let new_dir = join_store_path(&parent, new_name);
                if let Some(children) = tree.dirs.remove(&old_dir) {
                    tree.dirs.insert(new_dir, children);
                }
            }
            tree.dirs.entry(parent).or_default().push(entry);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    fn file(name: &str, size: u64) -> StoreEntry {
        StoreEntry {
            name: name.to_string(),
            is_dir: false,
            size,
            modtime: "2026-02-01T00:00:00Z".to_string(),
            expires_at: None,
            tags: Vec::new(),
            stream: None,
            group: None,
            keep_latest: false,
            policy: crate::fs::types::AccessPolicy::unrestricted(),
            download_mode: DownloadMode::Literal,
        }
    }

    fn dir(name: &str) -> StoreEntry {
        StoreEntry {
            is_dir: true,
            ..file(name, 0)
        }
    }

    #[test]
    fn urls_point_at_the_expected_endpoints() {
        assert_eq!(fs_api_url("releases//v1/"), "/_/api/v1/fs/releases/v1");
        assert_eq!(delete_url("/releases/app.zip"), "/releases/app.zip");
    }

    #[test]
    fn batch_url_repeats_encoded_paths() {
        let url = batch_download_url(
            &["/a/one.txt".to_string(), "/a/two space.txt".to_string()],
            None,
        );
        assert_eq!(
            url,
            "/_/api/v1/batch?p=%2Fa%2Fone.txt&p=%2Fa%2Ftwo%20space.txt"
        );

        let merged = batch_download_url(&["/a".to_string()], Some(DownloadMode::Merge));
        assert_eq!(merged, "/_/api/v1/batch?p=%2Fa&mode=merge");
    }

    #[test]
    fn memory_api_lists_files_and_directories() {
        let api = MemoryStoreApi::new();
        api.seed("/", dir("releases"));
        api.seed("/releases", file("app.zip", 10));

        let root = block_on(api.list_dir("/")).expect("list root");
        assert_eq!(
            root,
            ListOutcome::Listing(vec![dir("releases")])
        );

        let nested = block_on(api.list_dir("/releases")).expect("list releases");
        assert_eq!(nested, ListOutcome::Listing(vec![file("app.zip", 10)]));

        assert_eq!(
            block_on(api.list_dir("/releases/app.zip")).expect("file path"),
            ListOutcome::NotADirectory
        );
        assert_eq!(
            block_on(api.list_dir("/missing")).expect_err("missing"),
            ApiError::NotFound
        );
    }

    #[test]
    fn memory_api_deletes_directories_recursively() {
        let api = MemoryStoreApi::new();
        api.seed("/", dir("releases"));
        api.seed("/releases", dir("v1"));
        api.seed("/releases/v1", file("app.zip", 10));

        block_on(api.delete("/releases")).expect("delete");
        assert_eq!(
            block_on(api.list_dir("/releases")).expect_err("gone"),
            ApiError::NotFound
        );
        assert_eq!(
            block_on(api.list_dir("/releases/v1")).expect_err("gone"),
            ApiError::NotFound
        );
    }

    #[test]
    fn memory_api_applies_patches_field_by_field() {
        let api = MemoryStoreApi::new();
        api.seed("/", file("app.zip", 10));

        let patch = EntryPatch {
            tags: Some("env=prod, pinned".to_string()),
            immutable: Some(true),
            stream: Some("nightly/linux".to_string()),
            ..EntryPatch::default()
        };
        let updated = block_on(api.patch_entry("/app.zip", &patch)).expect("patch");
        assert!(updated.policy.is_immutable);
        assert_eq!(updated.tags.len(), 2);
        assert_eq!(updated.tags[1].display(), "pinned");
        assert_eq!(updated.origin_label(), Some("nightly/linux".to_string()));
    }

    #[test]
    fn memory_api_renames_and_creates_directories() {
        let api = MemoryStoreApi::new();
        block_on(api.create_dir("/releases")).expect("create");
        api.seed("/releases", file("app.zip", 10));

        block_on(api.rename("/releases", "builds")).expect("rename");
        let listed = block_on(api.list_dir("/builds")).expect("list renamed");
        assert_eq!(listed, ListOutcome::Listing(vec![file("app.zip", 10)]));

        assert_eq!(
            block_on(api.create_dir("/missing/sub")).expect_err("no parent"),
            ApiError::NotFound
        );
    }
}
