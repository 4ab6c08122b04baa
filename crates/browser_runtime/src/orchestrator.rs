//! The per-navigation render pass for the file browser.
//!
//! One pass is a single logical pipeline: resolve sort, fetch the listing,
//! sort, build row view-models annotated with the current selection. The
//! pass never retries and never touches the DOM; the component layer
//! commits the result only when the pass is still the newest one.

use std::{cell::Cell, rc::Rc};

use store_host::{
    normalize_store_path, parent_store_path, ApiError, KeyValueStore, ListOutcome,
    StoreApiService,
};
use thiserror::Error;

use crate::model::{BrowserViewModel, ListingViewModel, ParentRow, SelectionState};
use crate::rows::{build_rows, RowBuildContext};
use crate::sort::sort_entries;
use crate::sort_state::{query_param, resolve_sort, SortResolution};

/// Services one browser view instance renders against.
#[derive(Clone)]
pub struct BrowserDeps {
    /// Backend store client.
    pub api: Rc<dyn StoreApiService>,
    /// Tab-local store holding the persisted sort preference.
    pub session: Rc<dyn KeyValueStore>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failure of a listing render pass, bubbled to the router layer.
pub enum BrowseError {
    /// The path does not exist; the caller renders the not-found view.
    #[error("path not found")]
    NotFound,
    /// The session expired mid-pass; the login prompt is already underway.
    #[error("authentication required")]
    AuthRequired,
    /// Any other API failure, surfaced as a generic error page or alert.
    #[error(transparent)]
    Api(ApiError),
}

impl From<ApiError> for BrowseError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::NotFound => Self::NotFound,
            ApiError::AuthRequired => Self::AuthRequired,
            other => Self::Api(other),
        }
    }
}

/// Monotonic render-pass counter.
///
/// Every pass takes a fresh generation before its fetch; only the pass
/// whose generation is still the newest at completion may commit to the
/// view, which settles races between overlapping navigations.
#[derive(Debug, Default)]
pub struct GenerationCounter {
    current: Cell<u64>,
}

impl GenerationCounter {
    /// Claims the next generation for a starting pass.
    pub fn next(&self) -> u64 {
        let next = self.current.get() + 1;
        self.current.set(next);
        next
    }

    /// The newest claimed generation.
    pub fn latest(&self) -> u64 {
        self.current.get()
    }

    /// Whether a completed pass may still commit its result.
    pub fn is_current(&self, generation: u64) -> bool {
        self.current.get() == generation
    }
}

/// Output of a successful render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPass {
    /// Prepared view model for the render layer.
    pub view: BrowserViewModel,
    /// Sort resolution, including any pending URL replacement.
    pub sort: SortResolution,
}

/// Runs one render pass for `path` with the current URL query `search`.
///
/// # Errors
///
/// Fetch failures map onto [`BrowseError`]; a 404 is a distinct variant so
/// the router can render the not-found view instead of a generic error.
pub async fn render_listing(
    deps: &BrowserDeps,
    path: &str,
    search: &str,
    selection: &SelectionState,
    now_ms: i64,
    generation: u64,
) -> Result<RenderedPass, BrowseError> {
    let sort = resolve_sort(search, &*deps.session);
    let dir_path = normalize_store_path(path);

    let outcome = deps.api.list_dir(&dir_path).await?;
    let mut entries = match outcome {
        ListOutcome::NotADirectory => {
            return Ok(RenderedPass {
                view: BrowserViewModel::NotADirectory,
                sort,
            });
        }
        ListOutcome::Listing(entries) => entries,
    };

    sort_entries(&mut entries, sort.pref);

    let highlight = query_param(search, "highlight");
    let (rows, index) = build_rows(
        &entries,
        selection,
        RowBuildContext {
            dir_path: &dir_path,
            now_ms,
            highlight: highlight.as_deref(),
        },
    );

    let parent = (dir_path != "/").then(|| ParentRow {
        href: parent_store_path(&dir_path),
    });

    Ok(RenderedPass {
        view: BrowserViewModel::Listing(ListingViewModel {
            path: dir_path,
            generation,
            sort: sort.pref,
            parent,
            rows,
            index,
        }),
        sort,
    })
}
