//! # storefront
//!
//! Leptos + WASM front-end core for the course storefront: the session
//! lifecycle (hydrate, login, logout), its persistence in browser storage,
//! and the user/admin route guards built on top of it.
//!
//! Course authoring, listings and checkout live elsewhere; this crate only
//! owns who is signed in and what they may see.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod routes;
pub mod session;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered page.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let config = app::load_config();
    let _ = console_log::init_with_level(config.log_level.as_log_level());
    leptos::mount::hydrate_body(app::App);
}
