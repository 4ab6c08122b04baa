//! Leptos components for the file browser.
//!
//! This layer is a thin adapter: DOM events become [`SelectionAction`]
//! values, render passes come from [`crate::orchestrator`], and all state
//! lives in the engine types. UI composition only.

mod batch_bar;
mod chrome;
mod row;

use std::rc::Rc;

use leptos::*;
use store_host::unix_time_ms_now;
use store_host_web::{current_search, replace_search, REFRESH_EVENT};

use crate::model::{ListingViewModel, SelectionState, SortPreference};
use crate::orchestrator::{render_listing, BrowseError, BrowserDeps, GenerationCounter};
use crate::press::PressTracker;
use crate::selection::{reduce_selection, SelectionAction};
use crate::sort_state::apply_sort_choice;

pub use batch_bar::BatchActionBar;
pub use chrome::{Breadcrumbs, ColumnHeader};
pub use row::{EntryRow, ParentRowView};

/// Render phase of the browser view.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewPhase {
    /// A pass is in flight and nothing rendered yet.
    #[default]
    Loading,
    /// A listing committed.
    Listing(ListingViewModel),
    /// The path is a file, not a directory.
    NotADirectory,
    /// The pass failed; [`BrowseError::NotFound`] renders its own view.
    Failed(BrowseError),
}

#[derive(Clone, Copy)]
/// Leptos context shared by the browser view and its row components.
pub struct BrowserContext {
    /// Injected service bundle.
    pub deps: StoredValue<BrowserDeps>,
    /// Selection state owned by this view instance.
    pub selection: RwSignal<SelectionState>,
    /// Current render phase.
    pub view: RwSignal<ViewPhase>,
    /// Long-press tracker shared by all rows.
    pub press: RwSignal<PressTracker>,
    /// Render-pass generation counter.
    pub generations: StoredValue<Rc<GenerationCounter>>,
    /// Bumped to force a refetch of the current path.
    pub reload: RwSignal<u64>,
    /// Selection reducer dispatch.
    pub dispatch: Callback<SelectionAction>,
}

impl BrowserContext {
    /// Dispatches a selection action through the context callback.
    pub fn dispatch_selection(&self, action: SelectionAction) {
        self.dispatch.call(action);
    }

    /// Forces the current path to refetch.
    pub fn request_reload(&self) {
        self.reload.update(|n| *n += 1);
    }
}

/// Installs a [`BrowserContext`] for descendant components.
pub fn provide_browser_context(deps: BrowserDeps) {
    let deps = store_value(deps);
    let selection = create_rw_signal(SelectionState::default());
    let view = create_rw_signal(ViewPhase::default());
    let press = create_rw_signal(PressTracker::default());
    let generations = store_value(Rc::new(GenerationCounter::default()));
    let reload = create_rw_signal(0u64);

    let dispatch = Callback::new(move |action: SelectionAction| {
        // An empty index outside a committed listing still lets `Clear`
        // through; row actions against it are rejected by the reducer.
        let index = view.with_untracked(|phase| match phase {
            ViewPhase::Listing(listing) => listing.index.clone(),
            _ => Default::default(),
        });
        let mut state = selection.get_untracked();
        match reduce_selection(&mut state, &index, action) {
            Ok(()) => selection.set(state),
            Err(err) => logging::warn!("selection action dropped: {err}"),
        }
    });

    provide_context(BrowserContext {
        deps,
        selection,
        view,
        press,
        generations,
        reload,
        dispatch,
    });
}

/// Returns the current [`BrowserContext`].
///
/// # Panics
///
/// Panics if called outside [`provide_browser_context`].
pub fn use_browser_context() -> BrowserContext {
    use_context::<BrowserContext>().expect("BrowserContext not provided")
}

fn start_render_pass(ctx: BrowserContext, path: String) {
    let generation = ctx.generations.with_value(|counter| counter.next());
    spawn_local(async move {
        let deps = ctx.deps.get_value();
        let selection = ctx.selection.get_untracked();
        let search = current_search();
        let result = render_listing(
            &deps,
            &path,
            &search,
            &selection,
            unix_time_ms_now(),
            generation,
        )
        .await;

        // A newer navigation owns the view now; drop this pass.
        if !ctx
            .generations
            .with_value(|counter| counter.is_current(generation))
        {
            return;
        }

        match result {
            Ok(pass) => {
                if pass.sort.needs_replace {
                    if let Err(err) = replace_search(&pass.sort.canonical_search) {
                        logging::warn!("sort URL canonicalization failed: {err}");
                    }
                }
                match pass.view {
                    crate::model::BrowserViewModel::Listing(listing) => {
                        ctx.view.set(ViewPhase::Listing(listing));
                    }
                    crate::model::BrowserViewModel::NotADirectory => {
                        ctx.view.set(ViewPhase::NotADirectory);
                    }
                }
            }
            Err(err) => ctx.view.set(ViewPhase::Failed(err)),
        }
    });
}

/// Applies a header click: flip or switch the sort, then refetch.
fn choose_sort(ctx: BrowserContext, pref: SortPreference) {
    let session = ctx.deps.with_value(|deps| deps.session.clone());
    let canonical = apply_sort_choice(&current_search(), pref, &*session);
    if let Err(err) = replace_search(&canonical) {
        logging::warn!("sort URL update failed: {err}");
    }
    ctx.request_reload();
}

#[component]
/// The file-browser view for one store path.
///
/// Owns the render-pass loop; selection state lives in the surrounding
/// [`BrowserContext`] and is reset when this view unmounts.
pub fn BrowserView(
    /// Store path to list, driven by the router.
    #[prop(into)]
    path: Signal<String>,
) -> impl IntoView {
    let ctx = use_browser_context();

    create_effect(move |_| {
        let path = path.get();
        let _ = ctx.reload.get();
        start_render_pass(ctx, path);
    });

    let refresh_listener = window_event_listener(
        ev::Custom::<web_sys::Event>::new(REFRESH_EVENT),
        move |_| ctx.request_reload(),
    );
    on_cleanup(move || {
        refresh_listener.remove();
        ctx.selection.set(SelectionState::default());
    });

    view! {
        <section class="browser">
            <Breadcrumbs path=path />
            <div class="browser-toolbar">
                <button
                    type="button"
                    class="btn btn-ghost requires-auth"
                    on:click=move |_| new_directory(ctx, path.get_untracked())
                >
                    "New directory"
                </button>
            </div>
            {move || match ctx.view.get() {
                ViewPhase::Loading => view! {
                    <div class="browser-card">"Loading…"</div>
                }
                .into_view(),
                ViewPhase::NotADirectory => view! {
                    <div class="browser-card">"Not a directory"</div>
                }
                .into_view(),
                ViewPhase::Failed(BrowseError::NotFound) => view! {
                    <div class="browser-card browser-not-found">
                        <h2>"Not found"</h2>
                        <p>"Nothing lives at this path. It may have expired or been removed."</p>
                        <a href="/">"Back to the root"</a>
                    </div>
                }
                .into_view(),
                ViewPhase::Failed(err) => view! {
                    <div class="browser-card browser-error">
                        {format!("Listing failed: {err}")}
                    </div>
                }
                .into_view(),
                ViewPhase::Listing(listing) => view! {
                    <ListingTable listing=listing />
                }
                .into_view(),
            }}
            <BatchActionBar />
        </section>
    }
}

#[component]
fn ListingTable(listing: ListingViewModel) -> impl IntoView {
    let ctx = use_browser_context();
    let sort = listing.sort;
    let parent = listing.parent.clone();
    let rows = listing.rows.clone();

    view! {
        <div class="browser-table-wrap">
            <table class="browser-table">
                <thead>
                    <tr>
                        <ColumnHeader
                            label="Name"
                            column=crate::model::SortColumn::Name
                            sort=sort
                            on_choose=Callback::new(move |pref| choose_sort(ctx, pref))
                        />
                        <ColumnHeader
                            label="Size"
                            column=crate::model::SortColumn::Size
                            sort=sort
                            on_choose=Callback::new(move |pref| choose_sort(ctx, pref))
                        />
                        <ColumnHeader
                            label="Modified"
                            column=crate::model::SortColumn::Modtime
                            sort=sort
                            on_choose=Callback::new(move |pref| choose_sort(ctx, pref))
                        />
                        <th class="browser-actions-col"></th>
                    </tr>
                </thead>
                <tbody>
                    {parent.map(|parent| view! { <ParentRowView parent=parent /> })}
                    <For
                        each=move || rows.clone()
                        key=|row| row.path.clone()
                        let:row
                    >
                        <EntryRow row=row />
                    </For>
                </tbody>
            </table>
        </div>
    }
}

fn new_directory(ctx: BrowserContext, dir_path: String) {
    let Some(name) = prompt_text("Enter directory name:") else {
        return;
    };
    if name.trim().is_empty() {
        return;
    }
    let target = store_host::join_store_path(&dir_path, name.trim());
    spawn_local(async move {
        let api = ctx.deps.with_value(|deps| deps.api.clone());
        match api.create_dir(&target).await {
            Ok(()) => {
                let _ = store_host_web::dispatch_window_event(REFRESH_EVENT);
            }
            Err(err) => alert_message(&format!("Create directory failed: {err}")),
        }
    });
}

/// `window.confirm`, `false` off-browser.
pub(crate) fn confirm_message(message: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        false
    }
}

/// `window.alert`, no-op off-browser.
pub(crate) fn alert_message(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

/// `window.prompt`, `None` off-browser.
pub(crate) fn prompt_text(message: &str) -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()?
            .prompt_with_message(message)
            .ok()
            .flatten()
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        None
    }
}
