//! File-browser engine for the shelf artifact-store client.
//!
//! The engine is split the same way the interaction design is: pure state
//! (`model`), pure transitions (`selection`, `press`), pure listing
//! pipeline stages (`sort`, `sort_state`, `rows`, `orchestrator`), and a
//! thin Leptos adapter layer (`components`) that binds DOM events onto the
//! transitions. Nothing below `components` touches the DOM.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod components;
pub mod model;
pub mod orchestrator;
pub mod press;
pub mod rows;
pub mod selection;
pub mod sort;
pub mod sort_state;

pub use components::{provide_browser_context, use_browser_context, BrowserContext, BrowserView};
pub use model::{
    ExpiryBadge, ExpiryTier, ListingIndex, ListingViewModel, ParentRow, PolicyIndicator,
    PolicySeverity, RowViewModel, SelectionState, SortColumn, SortOrder, SortPreference,
    BrowserViewModel,
};
pub use orchestrator::{render_listing, BrowseError, BrowserDeps, GenerationCounter};
pub use press::{PressOutcome, PressTracker, LONG_PRESS_MS};
pub use selection::{reduce_selection, SelectionAction, SelectionError};
pub use sort::sort_entries;
pub use sort_state::{
    apply_sort_choice, parse_query_pairs, query_param, resolve_sort, SortResolution,
};
