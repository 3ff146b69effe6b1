//! Thin helpers over `web-sys`.

use musicrec_core::{AttributeSource, DelegationTarget, Error, Result};
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlFormElement, Window};

/// A DOM element usable by the core's attribute and delegation traits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement(pub Element);

impl AttributeSource for DomElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }
}

impl DelegationTarget for DomElement {
    fn closest(&self, selector: &str) -> Option<Self> {
        match self.0.closest(selector) {
            Ok(found) => found.map(Self),
            Err(e) => {
                warn!(%selector, error = %js_error(e), "Invalid selector");
                None
            }
        }
    }
}

/// Convert a JavaScript exception into the crate error.
pub fn js_error(value: JsValue) -> Error {
    let message = value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"));
    Error::Dom(message)
}

/// Log a failed DOM call and carry on.
pub fn warn_on_error<T>(context: &str, result: std::result::Result<T, JsValue>) {
    if let Err(e) = result {
        warn!(%context, error = %js_error(e), "DOM call failed");
    }
}

/// The browser window.
pub fn window() -> Result<Window> {
    web_sys::window().ok_or(Error::MissingGlobal("window"))
}

/// The current document.
pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or(Error::MissingGlobal("document"))
}

/// Element an event was dispatched to.
pub fn event_target_element(event: &Event) -> Option<DomElement> {
    event
        .target()?
        .dyn_into::<Element>()
        .ok()
        .map(DomElement)
}

/// Element with the given id, if it exists and has the expected type.
pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// Form enclosing `element`, else the first fallback form under `root`.
pub fn nearest_form(element: &Element, root: &Element, fallback: &str) -> Option<HtmlFormElement> {
    element
        .closest("form")
        .ok()
        .flatten()
        .or_else(|| root.query_selector(fallback).ok().flatten())
        .and_then(|form| form.dyn_into::<HtmlFormElement>().ok())
}
