//! Row view-model construction for the listing table.

use store_host::format::{
    file_icon, format_bytes, format_date_time, is_expired, is_near_expiry, time_remaining,
};
use store_host::{join_store_path, AccessPolicy, StoreEntry};

use crate::model::{
    ExpiryBadge, ExpiryTier, ListingIndex, PolicyIndicator, PolicySeverity, RowViewModel,
    SelectionState,
};

/// Hours before expiry at which the badge turns into a warning.
pub const NEAR_EXPIRY_HOURS: i64 = 24;

/// Tooltip for entries locked by a direct immutable flag.
pub const REASON_IMMUTABLE: &str = "Locked (Immutable)";
/// Tooltip for entries under a server-side protected path.
pub const REASON_PROTECTED: &str = "Protected Path";
/// Tooltip for entries outside the caller's token scope.
pub const REASON_RESTRICTED: &str = "Outside your scope";

/// Active policy reasons in fixed priority order: immutable, protected,
/// restricted. The first entry doubles as the disabled-button tooltip.
pub fn policy_reasons(policy: &AccessPolicy) -> Vec<&'static str> {
    let mut reasons = Vec::new();
    if policy.is_immutable {
        reasons.push(REASON_IMMUTABLE);
    }
    if policy.is_protected {
        reasons.push(REASON_PROTECTED);
    }
    if !policy.is_allowed {
        reasons.push(REASON_RESTRICTED);
    }
    reasons
}

/// Builds the policy indicator dot, `None` when nothing restricts the
/// entry.
pub fn build_policy_indicator(policy: &AccessPolicy) -> Option<PolicyIndicator> {
    let reasons = policy_reasons(policy);
    if reasons.is_empty() {
        return None;
    }
    let severity = if !policy.is_allowed {
        PolicySeverity::Restricted
    } else {
        PolicySeverity::Protected
    };
    Some(PolicyIndicator { severity, reasons })
}

/// Builds the expiry badge, `None` when the entry never expires.
pub fn build_expiry_badge(entry: &StoreEntry, now_ms: i64) -> Option<ExpiryBadge> {
    let raw = entry.effective_expiry()?;
    let tier = if is_expired(raw, now_ms) {
        ExpiryTier::Critical
    } else if is_near_expiry(raw, now_ms, NEAR_EXPIRY_HOURS) {
        ExpiryTier::Warning
    } else {
        ExpiryTier::Normal
    };
    Some(ExpiryBadge {
        text: format!("⏳ {}", time_remaining(raw, now_ms)),
        tooltip: format!("Expires at {}", format_date_time(raw)),
        tier,
    })
}

/// Inputs shared by every row of one build pass.
#[derive(Debug, Clone, Copy)]
pub struct RowBuildContext<'a> {
    /// Directory being listed.
    pub dir_path: &'a str,
    /// Clock instant badges are computed against.
    pub now_ms: i64,
    /// Entry name requested via the `highlight` query parameter.
    pub highlight: Option<&'a str>,
}

/// Builds display-ordered row view-models plus the selectable index space.
///
/// `entries` must already be sorted; row `index` values are positions in
/// that order and line up with the returned [`ListingIndex`].
pub fn build_rows(
    entries: &[StoreEntry],
    selection: &SelectionState,
    ctx: RowBuildContext<'_>,
) -> (Vec<RowViewModel>, ListingIndex) {
    let mut rows = Vec::with_capacity(entries.len());
    let mut paths = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let path = join_store_path(ctx.dir_path, &entry.name);
        let policy = build_policy_indicator(&entry.policy);
        rows.push(RowViewModel {
            name: entry.name.clone(),
            is_dir: entry.is_dir,
            index,
            icon: file_icon(&entry.name, entry.is_dir),
            size_text: if entry.is_dir {
                "--".to_string()
            } else {
                format_bytes(entry.size)
            },
            time_text: format_date_time(&entry.modtime),
            origin: entry.origin_label(),
            tags: entry.tags.iter().map(|tag| tag.display()).collect(),
            expiry: build_expiry_badge(entry, ctx.now_ms),
            can_mutate: policy.is_none(),
            policy,
            highlighted: ctx.highlight == Some(entry.name.as_str()),
            selected: selection.is_selected(&path),
            download_mode: entry.download_mode,
            path: path.clone(),
        });
        paths.push(path);
    }

    (rows, ListingIndex::new(paths))
}
