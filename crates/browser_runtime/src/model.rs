//! State and view-model types for the file browser.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use store_host::DownloadMode;

/// Sortable listing columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortColumn {
    /// Case-insensitive name order.
    #[default]
    Name,
    /// Numeric byte-size order.
    Size,
    /// Chronological modification-time order.
    Modtime,
}

impl SortColumn {
    /// Stable token used in URLs and tab-local storage.
    pub const fn as_token(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Size => "size",
            Self::Modtime => "modtime",
        }
    }

    /// Parses a URL/storage token; unknown tokens count as absent.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "name" => Some(Self::Name),
            "size" => Some(Self::Size),
            "modtime" => Some(Self::Modtime),
            _ => None,
        }
    }
}

/// Sort direction applied to the secondary key only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// Stable token used in URLs and tab-local storage.
    pub const fn as_token(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Parses a URL/storage token; unknown tokens count as absent.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    /// The direction a header click flips to.
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Resolved sort choice for one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SortPreference {
    /// Column to order by.
    pub column: SortColumn,
    /// Direction for the column key.
    pub order: SortOrder,
}

impl SortPreference {
    /// Returns `true` for the implicit default `(name, asc)`, which is
    /// represented by the absence of both URL parameters.
    pub fn is_default(self) -> bool {
        self == Self::default()
    }
}

/// Cross-render selection state owned by one browser view instance.
///
/// All mutation goes through [`crate::selection::reduce_selection`]; the
/// render layer only reads. Keys are full store paths because display
/// indexes do not survive re-sorting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionState {
    /// Whether selection mode is engaged.
    pub active: bool,
    /// Selected full paths; insertion order is irrelevant.
    pub selected: BTreeSet<String>,
    /// Display index of the most recent single toggle, the shift-range
    /// anchor. `None` when unset.
    pub last_anchor_index: Option<usize>,
}

impl SelectionState {
    /// Returns `true` when `path` is currently selected.
    pub fn is_selected(&self, path: &str) -> bool {
        self.selected.contains(path)
    }

    /// Number of selected entries.
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    /// Selected paths in deterministic order, for the batch download URL.
    pub fn paths(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }
}

/// Display-ordered selectable entries of the current listing.
///
/// Index `i` here is the display index the selection reducer ranges over.
/// The parent pseudo-row is deliberately not part of this space.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListingIndex {
    paths: Vec<String>,
}

impl ListingIndex {
    /// Builds the index from display-ordered entry paths.
    pub fn new(paths: Vec<String>) -> Self {
        Self { paths }
    }

    /// Number of indexed rows.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` when the listing has no selectable rows.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Path at a display index.
    pub fn path_at(&self, index: usize) -> Option<&str> {
        self.paths.get(index).map(String::as_str)
    }
}

/// Visual urgency tier of an expiry badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryTier {
    /// Expiry set, more than the warning window away.
    Normal,
    /// Expiring within the warning window (24 h).
    Warning,
    /// Already expired.
    Critical,
}

/// Expiry badge data for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryBadge {
    /// Short remaining-time label.
    pub text: String,
    /// Full expiry timestamp tooltip.
    pub tooltip: String,
    /// Urgency tier driving the badge style.
    pub tier: ExpiryTier,
}

/// Severity of the policy indicator dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicySeverity {
    /// Locked or protected, but within the caller's scope.
    Protected,
    /// Outside the caller's scope.
    Restricted,
}

/// Policy indicator dot plus its ordered reasons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyIndicator {
    /// Dot severity.
    pub severity: PolicySeverity,
    /// Reasons in fixed priority order: immutable, protected, restricted.
    pub reasons: Vec<&'static str>,
}

impl PolicyIndicator {
    /// The tooltip used on disabled action buttons: the first applicable
    /// reason.
    pub fn primary_reason(&self) -> &'static str {
        self.reasons.first().copied().unwrap_or_default()
    }
}

/// Everything one listing row needs to render.
#[derive(Debug, Clone, PartialEq)]
pub struct RowViewModel {
    /// Entry base name.
    pub name: String,
    /// Full normalized store path.
    pub path: String,
    /// Directory flag.
    pub is_dir: bool,
    /// Display index in the selectable listing space.
    pub index: usize,
    /// Row icon.
    pub icon: &'static str,
    /// Formatted size column (`--` for directories).
    pub size_text: String,
    /// Formatted modification-time column.
    pub time_text: String,
    /// `stream/group` origin badge.
    pub origin: Option<String>,
    /// Rendered tag badges.
    pub tags: Vec<String>,
    /// Expiry badge when the entry expires.
    pub expiry: Option<ExpiryBadge>,
    /// Policy indicator when any flag restricts the entry.
    pub policy: Option<PolicyIndicator>,
    /// Whether delete/move/edit/rename are enabled.
    pub can_mutate: bool,
    /// Row is flagged by the `highlight` query parameter.
    pub highlighted: bool,
    /// Row is currently selected.
    pub selected: bool,
    /// Directory packaging mode, shown in the info dialog.
    pub download_mode: DownloadMode,
}

/// The `..` pseudo-row shown on non-root listings.
///
/// It is not selectable and owns no display index, so the selection
/// range math never needs to skip it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentRow {
    /// Path the pseudo-row navigates to.
    pub href: String,
}

/// Fully prepared listing for the render layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingViewModel {
    /// Listed directory path.
    pub path: String,
    /// Render-pass generation that produced this model.
    pub generation: u64,
    /// Sort choice the listing is ordered by.
    pub sort: SortPreference,
    /// Optional `..` pseudo-row.
    pub parent: Option<ParentRow>,
    /// Display-ordered rows.
    pub rows: Vec<RowViewModel>,
    /// Selectable display-index space for the selection reducer.
    pub index: ListingIndex,
}

/// Output of one orchestrated render pass.
#[derive(Debug, Clone, PartialEq)]
pub enum BrowserViewModel {
    /// The path is a directory with a prepared listing.
    Listing(ListingViewModel),
    /// The path exists but is a file; render the placeholder.
    NotADirectory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_tokens_round_trip() {
        for column in [SortColumn::Name, SortColumn::Size, SortColumn::Modtime] {
            assert_eq!(SortColumn::parse(column.as_token()), Some(column));
        }
        for order in [SortOrder::Asc, SortOrder::Desc] {
            assert_eq!(SortOrder::parse(order.as_token()), Some(order));
        }
        assert_eq!(SortColumn::parse("created"), None);
        assert_eq!(SortOrder::parse("up"), None);
    }

    #[test]
    fn default_preference_is_name_ascending() {
        let pref = SortPreference::default();
        assert_eq!(pref.column, SortColumn::Name);
        assert_eq!(pref.order, SortOrder::Asc);
        assert!(pref.is_default());
        assert!(!SortPreference {
            column: SortColumn::Name,
            order: SortOrder::Desc,
        }
        .is_default());
    }

    #[test]
    fn listing_index_addresses_paths_by_display_position() {
        let index = ListingIndex::new(vec!["/a".to_string(), "/b".to_string()]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.path_at(1), Some("/b"));
        assert_eq!(index.path_at(2), None);
    }

    #[test]
    fn policy_indicator_exposes_the_first_reason() {
        let indicator = PolicyIndicator {
            severity: PolicySeverity::Protected,
            reasons: vec!["Locked (Immutable)", "Protected Path"],
        };
        assert_eq!(indicator.primary_reason(), "Locked (Immutable)");
    }
}
