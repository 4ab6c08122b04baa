//! Listing row components.

use std::time::Duration;

use leptos::*;
use store_host::unix_time_ms_now;
use store_host_web::{
    dispatch_entry_event, dispatch_window_event, ENTRY_EDIT_EVENT, ENTRY_INFO_EVENT,
    REFRESH_EVENT,
};

use crate::model::{ExpiryTier, ParentRow, PolicySeverity, RowViewModel};
use crate::press::{PressOutcome, LONG_PRESS_MS};
use crate::selection::SelectionAction;

use super::{alert_message, confirm_message, use_browser_context, BrowserContext};

#[component]
/// The `..` pseudo-row. It navigates up and takes no part in selection,
/// so it carries no checkbox and no display index.
pub fn ParentRowView(
    /// Pseudo-row data, just the parent href.
    parent: ParentRow,
) -> impl IntoView {
    view! {
        <tr class="browser-row browser-back-row">
            <td>
                <a class="entry-link" href=parent.href>
                    <span class="entry-icon">"⬆️"</span>
                    <span class="entry-name">".."</span>
                </a>
            </td>
            <td class="cell-mono">"--"</td>
            <td class="cell-mono"></td>
            <td></td>
        </tr>
    }
}

#[component]
/// One listing row: selection surface, badges, and gated actions.
pub fn EntryRow(
    /// Prepared view-model for this row.
    row: RowViewModel,
) -> impl IntoView {
    let ctx = use_browser_context();
    let index = row.index;
    let path = row.path.clone();

    let selected = {
        let path = path.clone();
        Signal::derive(move || ctx.selection.with(|state| state.is_selected(&path)))
    };
    let selecting = Signal::derive(move || ctx.selection.with(|state| state.active));

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if ev.button() != 0 || targets_nonselectable(&ev) {
            return;
        }
        ctx.press
            .update(|press| press.press(index, unix_time_ms_now()));
        set_timeout(
            move || {
                let fired = ctx
                    .press
                    .try_update(|press| press.poll_fire(unix_time_ms_now()))
                    .flatten();
                if let Some(index) = fired {
                    ctx.dispatch_selection(SelectionAction::Toggle {
                        index,
                        forced: Some(true),
                    });
                }
            },
            Duration::from_millis(LONG_PRESS_MS as u64),
        );
    };

    let on_pointerup = move |_ev: web_sys::PointerEvent| {
        let outcome = ctx
            .press
            .try_update(|press| press.release(unix_time_ms_now()))
            .unwrap_or(PressOutcome::Idle);
        if let PressOutcome::LongPress { index } = outcome {
            // Covers the release racing ahead of the timer; forcing an
            // already-selected row is a no-op.
            ctx.dispatch_selection(SelectionAction::Toggle {
                index,
                forced: Some(true),
            });
        }
    };

    let on_pointerleave = move |_ev: web_sys::PointerEvent| {
        ctx.press.update(|press| press.cancel());
    };

    let on_row_click = move |ev: ev::MouseEvent| {
        let suppressed = ctx
            .press
            .try_update(|press| press.take_click_suppression())
            .unwrap_or(false);
        if suppressed {
            ev.prevent_default();
            ev.stop_propagation();
            return;
        }

        let active = ctx.selection.with_untracked(|state| state.active);
        if active {
            ev.prevent_default();
            if ev.shift_key() {
                ctx.dispatch_selection(SelectionAction::ExtendRange {
                    target_index: index,
                });
            } else {
                ctx.dispatch_selection(SelectionAction::Toggle {
                    index,
                    forced: None,
                });
            }
        } else if ev.shift_key() {
            // Shift on an idle view (re-)enters selection mode; without an
            // anchor the reducer degrades this to a plain toggle.
            ev.prevent_default();
            ctx.dispatch_selection(SelectionAction::ExtendRange {
                target_index: index,
            });
        }
    };

    let on_check_click = move |ev: ev::MouseEvent| {
        // The checkbox is its own selection surface; the row handler must
        // not run as well.
        ev.stop_propagation();
        ev.prevent_default();
        if ev.shift_key() {
            ctx.dispatch_selection(SelectionAction::ExtendRange {
                target_index: index,
            });
        } else {
            ctx.dispatch_selection(SelectionAction::Toggle {
                index,
                forced: None,
            });
        }
    };

    let link_target = (!row.is_dir).then_some("_blank");
    let highlighted = row.highlighted;

    view! {
        <tr
            class="browser-row"
            class:is-selected=selected
            class:is-highlighted=move || highlighted
            on:pointerdown=on_pointerdown
            on:pointerup=on_pointerup
            on:pointerleave=on_pointerleave
            on:click=on_row_click
            data-row-index=index.to_string()
            data-row-path=path.clone()
        >
            <td>
                <div class="entry-cell">
                    <input
                        type="checkbox"
                        class="row-check"
                        class:always-visible=selecting
                        prop:checked=selected
                        on:click=on_check_click
                    />
                    <a class="entry-link" href=path.clone() target=link_target>
                        <span class="entry-icon">{row.icon}</span>
                        <span class="entry-name">{row.name.clone()}</span>
                    </a>
                    {row.policy.as_ref().map(|indicator| {
                        let severity = match indicator.severity {
                            PolicySeverity::Restricted => "restricted",
                            PolicySeverity::Protected => "protected",
                        };
                        view! {
                            <span
                                class=format!("policy-indicator {severity}")
                                title=format!(
                                    "Restrictions active: {}",
                                    indicator.reasons.join(", ")
                                )
                            ></span>
                        }
                    })}
                </div>
                <div class="entry-attrs">
                    {row.origin.clone().map(|origin| {
                        view! { <span class="badge badge-origin">{origin}</span> }
                    })}
                    {row
                        .tags
                        .iter()
                        .map(|tag| view! { <span class="badge badge-tag">{tag.clone()}</span> })
                        .collect_view()}
                    {row.expiry.as_ref().map(|badge| {
                        let tier = match badge.tier {
                            ExpiryTier::Normal => "",
                            ExpiryTier::Warning => "expiry-warning",
                            ExpiryTier::Critical => "expiry-critical",
                        };
                        view! {
                            <span class=format!("entry-expiry {tier}") title=badge.tooltip.clone()>
                                {badge.text.clone()}
                            </span>
                        }
                    })}
                </div>
            </td>
            <td class="cell-mono">{row.size_text.clone()}</td>
            <td class="cell-mono">{row.time_text.clone()}</td>
            <td>
                <RowActions row=row.clone() />
            </td>
        </tr>
    }
}

#[component]
fn RowActions(row: RowViewModel) -> impl IntoView {
    let ctx = use_browser_context();
    let disabled_reason = row
        .policy
        .as_ref()
        .map(|indicator| indicator.primary_reason());
    let can_mutate = row.can_mutate;

    let info_path = row.path.clone();
    let on_info = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        if let Err(err) = dispatch_entry_event(ENTRY_INFO_EVENT, &info_path) {
            logging::warn!("info dialog event failed: {err}");
        }
    };

    let edit_path = row.path.clone();
    let on_edit = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        if let Err(err) = dispatch_entry_event(ENTRY_EDIT_EVENT, &edit_path) {
            logging::warn!("edit dialog event failed: {err}");
        }
    };

    let delete_name = row.name.clone();
    let delete_path = row.path.clone();
    let is_dir = row.is_dir;
    let on_delete = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        delete_entry(ctx, delete_path.clone(), delete_name.clone(), is_dir);
    };

    view! {
        <div class="row-actions">
            <button type="button" class="btn btn-ghost" title="View details" on:click=on_info>
                "ℹ️"
            </button>
            <button
                type="button"
                class="btn btn-ghost requires-auth"
                disabled=!can_mutate
                title=move || match disabled_reason {
                    Some(reason) if !can_mutate => format!("Edit disabled: {reason}"),
                    _ => "Edit".to_string(),
                }
                on:click=on_edit
            >
                "📝"
            </button>
            <button
                type="button"
                class="btn btn-ghost btn-danger requires-auth"
                disabled=!can_mutate
                title=move || match disabled_reason {
                    Some(reason) if !can_mutate => format!("Delete disabled: {reason}"),
                    _ => "Delete".to_string(),
                }
                on:click=on_delete
            >
                "🗑️"
            </button>
        </div>
    }
}

/// Whether a pointer event started on a non-selectable element (an inline
/// action button or the checkbox). Those never arm the long-press and keep
/// their own click behavior.
fn targets_nonselectable(ev: &web_sys::PointerEvent) -> bool {
    use wasm_bindgen::JsCast;

    ev.target()
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
        .and_then(|element| element.closest(".row-actions, .row-check").ok().flatten())
        .is_some()
}

fn delete_entry(ctx: BrowserContext, path: String, name: String, is_dir: bool) {
    if !confirm_message(&format!("Are you sure you want to delete {name}?")) {
        return;
    }
    if is_dir
        && !confirm_message(
            "You are about to delete a directory. All content will be removed recursively.\n\nContinue?",
        )
    {
        return;
    }

    spawn_local(async move {
        let api = ctx.deps.with_value(|deps| deps.api.clone());
        match api.delete(&path).await {
            Ok(()) => {
                let _ = dispatch_window_event(REFRESH_EVENT);
            }
            // The view stays in its pre-action state; a refresh is the
            // user's call.
            Err(err) => alert_message(&format!("Delete failed: {err}")),
        }
    });
}
