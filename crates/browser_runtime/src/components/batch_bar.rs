//! Batch action bar shown while a selection exists.

use leptos::*;
use store_host::batch_download_url;
use store_host_web::navigate_to;

use crate::selection::SelectionAction;

use super::use_browser_context;

#[component]
/// Floating bar with the selection count, bulk download, and clear.
///
/// Visible iff the selection is non-empty; the download issues one
/// navigation request with every selected path as a repeated `p`
/// parameter.
pub fn BatchActionBar() -> impl IntoView {
    let ctx = use_browser_context();
    let count = Signal::derive(move || ctx.selection.with(|state| state.count()));

    let on_download = move |_| {
        let paths = ctx.selection.with_untracked(|state| state.paths());
        if paths.is_empty() {
            return;
        }
        let url = batch_download_url(&paths, None);
        if let Err(err) = navigate_to(&url) {
            logging::warn!("batch download navigation failed: {err}");
        }
    };

    let on_clear = move |_| ctx.dispatch_selection(SelectionAction::Clear);

    view! {
        <Show when=move || count.get() > 0 fallback=|| ()>
            <div class="batch-bar">
                <span class="batch-count">
                    {move || {
                        let n = count.get();
                        if n == 1 {
                            "1 item selected".to_string()
                        } else {
                            format!("{n} items selected")
                        }
                    }}
                </span>
                <button type="button" class="btn btn-primary" on:click=on_download>
                    "Download"
                </button>
                <button type="button" class="btn btn-ghost" on:click=on_clear>
                    "Clear"
                </button>
            </div>
        </Show>
    }
}
