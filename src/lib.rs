//! # family-kitchen-client
//!
//! Leptos + WASM frontend for the family recipe and meal-planning app.
//!
//! This crate holds the session store (token, account, family roster and
//! acting member, persisted to browser storage), the HTTP gateway to the
//! auth and member endpoints, and the route guard that keeps guests and
//! member-less sessions out of member-scoped screens.

pub mod app;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
