//! Binary entrypoint for the browser-hosted `site_app` bundle.

#[cfg(all(target_arch = "wasm32", feature = "csr"))]
fn main() {
    site::mount();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("site_app is a browser bundle; build it for wasm32 with the `csr` feature.");
}
