//! Top-level application shell: router, browser route, login gate.

use std::rc::Rc;

use browser_runtime::{provide_browser_context, BrowserDeps, BrowserView};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use store_host::KeyValueStore;
use store_host_web::{HttpStoreApi, WebLocalStore, WebSessionStore, REQUIRE_LOGIN_EVENT};

#[component]
/// Application root: meta tags plus the single wildcard browser route.
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Shelf" />
        <Meta name="description" content="Artifact store file browser." />

        <Router>
            <main class="site-root">
                <Routes>
                    <Route path="/*path" view=BrowserRoute />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
/// Wires the browser view to the live backend and browser storage.
///
/// The route stays mounted while the user navigates between directories,
/// which is what scopes the selection state to "one browser view
/// lifetime".
pub fn BrowserRoute() -> impl IntoView {
    let durable: Rc<dyn KeyValueStore> = Rc::new(WebLocalStore);
    provide_browser_context(BrowserDeps {
        api: Rc::new(HttpStoreApi::new(durable)),
        session: Rc::new(WebSessionStore),
    });

    let params = use_params_map();
    let path = Signal::derive(move || {
        let tail = params.with(|map| map.get("path").cloned().unwrap_or_default());
        format!("/{tail}")
    });

    view! {
        <LoginGate />
        <BrowserView path=path />
    }
}

#[component]
/// Overlay that appears when any request comes back 401.
///
/// The API client has already dropped the stored session by the time the
/// event arrives; this surface only tells the user and restarts the app,
/// which lands on the login flow.
pub fn LoginGate() -> impl IntoView {
    let expired = create_rw_signal(false);

    let listener = window_event_listener(
        ev::Custom::<web_sys::Event>::new(REQUIRE_LOGIN_EVENT),
        move |_| expired.set(true),
    );
    on_cleanup(move || listener.remove());

    let on_login = move |_| reload_page();

    view! {
        <Show when=move || expired.get() fallback=|| ()>
            <div class="login-overlay">
                <div class="login-card">
                    <h2>"Session expired"</h2>
                    <p>"Your session is no longer valid. Log in again to continue."</p>
                    <button type="button" class="btn btn-primary" on:click=on_login>
                        "Log in"
                    </button>
                </div>
            </div>
        </Show>
    }
}

fn reload_page() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    }
}
