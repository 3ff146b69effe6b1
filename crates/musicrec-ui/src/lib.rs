//! `Musicrec` UI - browser bindings for the site's page behaviors.
//!
//! Enhances the server-rendered pages: filter apply buttons, the preview
//! mini-player, like toggles and the Enter shortcut of search inputs.
//! Decisions are made by `musicrec-core`; this crate applies them to the DOM.

pub mod dom;
pub mod effects;
pub mod logging;
pub mod mini_player;
pub mod router;

use logging::LoggingError;
use musicrec_core::{CONFIG_SCRIPT_ID, Error, Result, UiConfig};
use tracing::warn;
use wasm_bindgen::JsValue;
use web_sys::Document;

pub use effects::PageEffects;
pub use mini_player::MiniPlayer;
pub use router::EventRouter;

/// Attach every page behavior to the current document.
///
/// Installs the panic hook and console logging on first call.
pub fn init() -> Result<EventRouter> {
    console_error_panic_hook::set_once();
    match logging::init_auto() {
        // The page called `init` before.
        Ok(()) | Err(LoggingError::AlreadyInitialized) => {}
        Err(e) => web_sys::console::warn_1(&JsValue::from_str(&e.to_string())),
    }

    let document = dom::document()?;
    let root = document
        .document_element()
        .ok_or(Error::MissingGlobal("documentElement"))?;
    let config = load_config(&document);
    EventRouter::attach(&document, &root, config)
}

/// Page configuration: the JSON override script (id [`CONFIG_SCRIPT_ID`])
/// when present and valid, the defaults otherwise.
pub fn load_config(document: &Document) -> UiConfig {
    let defaults = UiConfig::default();
    let Some(script) = document.get_element_by_id(CONFIG_SCRIPT_ID) else {
        return defaults;
    };
    let text = script.text_content().unwrap_or_default();
    match UiConfig::from_json(&text) {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "Ignoring invalid page configuration");
            defaults
        }
    }
}
