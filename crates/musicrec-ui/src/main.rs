//! Musicrec UI entry point for WASM.

#![no_main]

use wasm_bindgen::prelude::wasm_bindgen;

/// Entry point for the WASM module.
/// This function is called automatically when the WASM module is loaded.
#[wasm_bindgen(start)]
pub fn start() {
    match musicrec_ui::init() {
        Ok(router) => router.keep_alive(),
        Err(e) => tracing::error!(error = %e, "Failed to attach page behaviors"),
    }
}
