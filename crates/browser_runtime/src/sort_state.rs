//! Three-tier sort-state resolution and canonical URL computation.
//!
//! Priority: URL query (highest) > tab-local persisted preference >
//! default `(name, asc)`. The resolver is pure with respect to the URL;
//! it reports the canonical query string and whether the current history
//! entry must be replaced, and `store_host_web::history` applies it.

use store_host::{decode_query_component, KeyValueStore, SORT_COLUMN_KEY, SORT_ORDER_KEY};

use crate::model::{SortColumn, SortOrder, SortPreference};

/// Splits a query string into its raw `key=value` segments.
fn split_segments(search: &str) -> Vec<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn segment_key(segment: &str) -> &str {
    segment.split_once('=').map_or(segment, |(key, _)| key)
}

/// Raw `(key, value)` pairs of a query string, values still encoded.
pub fn parse_query_pairs(search: &str) -> Vec<(String, String)> {
    split_segments(search)
        .into_iter()
        .map(|segment| match segment.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (segment, String::new()),
        })
        .collect()
}

/// Decoded value of the first query parameter named `key`.
pub fn query_param(search: &str, key: &str) -> Option<String> {
    parse_query_pairs(search)
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, value)| decode_query_component(&value))
}

/// Outcome of one sort resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortResolution {
    /// The resolved preference the listing is sorted by.
    pub pref: SortPreference,
    /// Canonical query string (leading `?`, or empty for no parameters).
    pub canonical_search: String,
    /// Whether the current history entry must be replaced to match.
    pub needs_replace: bool,
}

/// Resolves the sort preference for a render pass.
///
/// Missing or unknown URL tokens count as absent, never as errors. The
/// resolved pair is always written back to the tab-local store. In the
/// canonical query the default `(name, asc)` is expressed by omitting both
/// parameters; every other combination carries both explicitly, after any
/// unrelated parameters, which are preserved verbatim.
pub fn resolve_sort<S: KeyValueStore + ?Sized>(search: &str, session: &S) -> SortResolution {
    let url_column = query_param(search, "sort").and_then(|raw| SortColumn::parse(&raw));
    let url_order = query_param(search, "order").and_then(|raw| SortOrder::parse(&raw));
    let stored_column = session
        .load(SORT_COLUMN_KEY)
        .and_then(|raw| SortColumn::parse(&raw));
    let stored_order = session
        .load(SORT_ORDER_KEY)
        .and_then(|raw| SortOrder::parse(&raw));

    let pref = SortPreference {
        column: url_column.or(stored_column).unwrap_or_default(),
        order: url_order.or(stored_order).unwrap_or_default(),
    };

    let canonical_search = apply_sort_choice(search, pref, session);
    let current_search = join_search(&split_segments(search));

    SortResolution {
        pref,
        needs_replace: current_search != canonical_search,
        canonical_search,
    }
}

/// Records an explicit sort choice (a header click) and returns the
/// canonical query string for it.
///
/// The tab-local store is written first so a later resolution with a bare
/// URL still lands on this choice; unrelated query parameters survive.
pub fn apply_sort_choice<S: KeyValueStore + ?Sized>(
    search: &str,
    pref: SortPreference,
    session: &S,
) -> String {
    let _ = session.save(SORT_COLUMN_KEY, pref.column.as_token());
    let _ = session.save(SORT_ORDER_KEY, pref.order.as_token());

    let mut canonical: Vec<String> = split_segments(search)
        .into_iter()
        .filter(|segment| !matches!(segment_key(segment), "sort" | "order"))
        .collect();
    if !pref.is_default() {
        canonical.push(format!("sort={}", pref.column.as_token()));
        canonical.push(format!("order={}", pref.order.as_token()));
    }
    join_search(&canonical)
}

fn join_search(segments: &[String]) -> String {
    if segments.is_empty() {
        String::new()
    } else {
        format!("?{}", segments.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use store_host::MemoryKeyValueStore;

    use super::*;

    #[test]
    fn explicit_default_parameters_canonicalize_to_nothing() {
        let session = MemoryKeyValueStore::default();
        let resolution = resolve_sort("?sort=name&order=asc", &session);
        assert_eq!(resolution.pref, SortPreference::default());
        assert_eq!(resolution.canonical_search, "");
        assert!(resolution.needs_replace);
    }

    #[test]
    fn non_default_preferences_carry_both_parameters() {
        let session = MemoryKeyValueStore::default();
        let resolution = resolve_sort("?sort=size&order=desc", &session);
        assert_eq!(
            resolution.pref,
            SortPreference {
                column: SortColumn::Size,
                order: SortOrder::Desc,
            }
        );
        assert_eq!(resolution.canonical_search, "?sort=size&order=desc");
        assert!(!resolution.needs_replace);
    }

    #[test]
    fn url_beats_session_which_beats_default_per_field() {
        let session = MemoryKeyValueStore::default();
        session.save(SORT_COLUMN_KEY, "modtime").expect("seed");
        session.save(SORT_ORDER_KEY, "desc").expect("seed");

        // Column comes from the URL, order falls back to the session.
        let resolution = resolve_sort("?sort=size", &session);
        assert_eq!(
            resolution.pref,
            SortPreference {
                column: SortColumn::Size,
                order: SortOrder::Desc,
            }
        );

        // Nothing anywhere resolves to the default.
        let empty_session = MemoryKeyValueStore::default();
        let resolution = resolve_sort("", &empty_session);
        assert_eq!(resolution.pref, SortPreference::default());
        assert_eq!(resolution.canonical_search, "");
        assert!(!resolution.needs_replace);
    }

    #[test]
    fn unknown_tokens_count_as_absent() {
        let session = MemoryKeyValueStore::default();
        let resolution = resolve_sort("?sort=created&order=sideways", &session);
        assert_eq!(resolution.pref, SortPreference::default());
        assert_eq!(resolution.canonical_search, "");
        assert!(resolution.needs_replace);
    }

    #[test]
    fn every_resolution_persists_the_outcome() {
        let session = MemoryKeyValueStore::default();
        resolve_sort("?sort=modtime&order=desc", &session);
        assert_eq!(session.load(SORT_COLUMN_KEY), Some("modtime".to_string()));
        assert_eq!(session.load(SORT_ORDER_KEY), Some("desc".to_string()));

        // The persisted value then feeds a bare-URL resolution.
        let resolution = resolve_sort("", &session);
        assert_eq!(
            resolution.pref,
            SortPreference {
                column: SortColumn::Modtime,
                order: SortOrder::Desc,
            }
        );
        assert_eq!(resolution.canonical_search, "?sort=modtime&order=desc");
        assert!(resolution.needs_replace);
    }

    #[test]
    fn unrelated_parameters_survive_canonicalization() {
        let session = MemoryKeyValueStore::default();
        let resolution = resolve_sort("?highlight=app.zip&sort=name&order=asc", &session);
        assert_eq!(resolution.canonical_search, "?highlight=app.zip");
        assert!(resolution.needs_replace);

        let resolution = resolve_sort("?highlight=app.zip&sort=size&order=desc", &session);
        assert_eq!(
            resolution.canonical_search,
            "?highlight=app.zip&sort=size&order=desc"
        );
        assert!(!resolution.needs_replace);
    }

    #[test]
    fn header_clicks_persist_before_the_url_changes() {
        let session = MemoryKeyValueStore::default();
        let chosen = SortPreference {
            column: SortColumn::Size,
            order: SortOrder::Desc,
        };
        let search = apply_sort_choice("?highlight=a.zip&sort=name", chosen, &session);
        assert_eq!(search, "?highlight=a.zip&sort=size&order=desc");
        assert_eq!(session.load(SORT_COLUMN_KEY), Some("size".to_string()));

        // Clicking back to the default strips the parameters but still
        // wins over the previously persisted choice.
        let search = apply_sort_choice(&search, SortPreference::default(), &session);
        assert_eq!(search, "?highlight=a.zip");
        let resolution = resolve_sort(&search, &session);
        assert_eq!(resolution.pref, SortPreference::default());
    }

    #[test]
    fn query_param_decodes_values() {
        assert_eq!(
            query_param("?highlight=app%20v2.zip&x=1", "highlight"),
            Some("app v2.zip".to_string())
        );
        assert_eq!(query_param("?x=1", "highlight"), None);
        assert_eq!(query_param("?flag", "flag"), Some(String::new()));
    }
}
