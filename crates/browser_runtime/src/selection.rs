//! Selection transitions for the file browser.
//!
//! The controller is a pure reducer over [`SelectionState`]: DOM listeners
//! translate clicks into [`SelectionAction`] values and the render layer
//! reads the state back; neither side mutates it directly. Membership is
//! keyed by full path so a selection survives the full re-render that
//! follows every sort change, while actions address rows by display index
//! because that is what shift-ranges are defined over.

use thiserror::Error;

use crate::model::{ListingIndex, SelectionState};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Actions accepted by [`reduce_selection`].
pub enum SelectionAction {
    /// Flip or force membership of the row at a display index.
    Toggle {
        /// Display index of the row.
        index: usize,
        /// `Some(state)` forces membership, `None` flips it.
        forced: Option<bool>,
    },
    /// Apply a shift-range between the current anchor and a target row.
    ExtendRange {
        /// Display index of the shift-clicked row.
        target_index: usize,
    },
    /// Empty the selection and leave selection mode.
    Clear,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions referencing rows outside the listing.
pub enum SelectionError {
    /// The action's display index is not part of the current listing.
    #[error("row index out of range")]
    RowOutOfRange,
}

/// Applies a [`SelectionAction`] to the selection state.
///
/// Every exit re-establishes the mode invariant: a non-empty selection
/// means selection mode is active, an empty one means it is not and the
/// shift anchor is gone.
///
/// # Errors
///
/// Returns [`SelectionError::RowOutOfRange`] when the action references a
/// display index the current listing does not have.
pub fn reduce_selection(
    state: &mut SelectionState,
    listing: &ListingIndex,
    action: SelectionAction,
) -> Result<(), SelectionError> {
    match action {
        SelectionAction::Toggle { index, forced } => {
            let path = listing
                .path_at(index)
                .ok_or(SelectionError::RowOutOfRange)?
                .to_string();
            let next = forced.unwrap_or(!state.selected.contains(&path));
            apply_membership(state, path, next);
            state.last_anchor_index = Some(index);
        }
        SelectionAction::ExtendRange { target_index } => {
            let target_path = listing
                .path_at(target_index)
                .ok_or(SelectionError::RowOutOfRange)?
                .to_string();
            match state.last_anchor_index {
                None => {
                    // No anchor to extend from (fresh view); degrade to a
                    // plain toggle so the click still does something.
                    let next = !state.selected.contains(&target_path);
                    apply_membership(state, target_path, next);
                    state.last_anchor_index = Some(target_index);
                }
                Some(anchor) => {
                    // The anchor can outlive a listing that since shrank.
                    let anchor = anchor.min(listing.len().saturating_sub(1));
                    let desired = !state.selected.contains(&target_path);
                    let (lo, hi) = if anchor <= target_index {
                        (anchor, target_index)
                    } else {
                        (target_index, anchor)
                    };
                    for index in lo..=hi {
                        if let Some(path) = listing.path_at(index) {
                            apply_membership(state, path.to_string(), desired);
                        }
                    }
                    // A range operation never moves the anchor.
                }
            }
        }
        SelectionAction::Clear => {
            state.selected.clear();
        }
    }

    sync_mode(state);
    Ok(())
}

fn apply_membership(state: &mut SelectionState, path: String, selected: bool) {
    if selected {
        state.selected.insert(path);
    } else {
        state.selected.remove(&path);
    }
}

/// Re-establishes `selected` non-empty ⇔ `active`.
fn sync_mode(state: &mut SelectionState) {
    if state.selected.is_empty() {
        state.active = false;
        state.last_anchor_index = None;
    } else {
        state.active = true;
    }
}
