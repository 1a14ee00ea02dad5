//! Web UI for hrnet
//!
//! A Yew-based front end with two screens: the employee form at `/` and
//! the employee list at `/employees`.

mod app;
mod components;
pub mod storage;

use wasm_bindgen::prelude::*;

/// Entry point for the WASM application.
#[wasm_bindgen(start)]
pub fn run_app() {
    // Initialize panic hook for better error messages
    console_error_panic_hook::set_once();

    // Mount the Yew app
    yew::Renderer::<app::App>::new().render();
}
