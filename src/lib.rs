//! # site-ui
//!
//! WASM page chrome for the marketplace site. Wires the `disclosure` state
//! machines to the live document: theme switching, the mobile navigation
//! drawer, hover dropdowns, the dashboard sidebar, filter drawers and tab
//! panels.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`boot`] | Component discovery and DOM event wiring |
//! | [`config`] | Breakpoints and other page settings |
//! | [`dom`] | `web-sys` implementations of the capability traits |
//! | [`error`] | Mount failures |
//! | [`markup`] | Page markup conventions as panel configurations |
//!
//! Every component is optional. A page without a sidebar simply gets no
//! sidebar behaviour.

pub mod boot;
pub mod config;
pub mod dom;
pub mod error;
pub mod markup;

use wasm_bindgen::prelude::wasm_bindgen;

/// Module entry point, run once when the WASM module is instantiated.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let (config, config_error) = boot::load_config();
    if console_log::init_with_level(config.level()).is_err() {
        // A logger is already installed; keep using it.
        log::debug!("site-ui: logger already initialised");
    }
    if let Some(err) = config_error {
        log::warn!("site-ui: {err}; using defaults");
    }

    if let Err(err) = boot::run(config) {
        log::warn!("site-ui: {err}");
    }
}
