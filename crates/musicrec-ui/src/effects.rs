//! Side effects that leave the current page.
//!
//! Navigation and form submission unload the page, so the router performs
//! them through [`PageEffects`]. The browser implementation talks to
//! `window.location` and `HTMLFormElement.submit`; tests record the calls.

use tracing::{info, warn};
use web_sys::{HtmlFormElement, Window};

use crate::dom::{js_error, warn_on_error};

type NavigateFn = Box<dyn Fn(&str)>;
type SubmitFn = Box<dyn Fn(&HtmlFormElement)>;

/// Navigation and form submission used by the router.
pub struct PageEffects {
    navigate: NavigateFn,
    submit: SubmitFn,
}

impl PageEffects {
    /// Effects backed by the browser.
    pub fn browser(window: Window) -> Self {
        Self {
            navigate: Box::new(move |path: &str| {
                info!(%path, "Navigating");
                if let Err(e) = window.location().set_href(path) {
                    warn!(%path, error = %js_error(e), "Navigation failed");
                }
            }),
            submit: Box::new(|form: &HtmlFormElement| {
                info!(action = %form.action(), "Submitting form");
                warn_on_error("submit form", form.submit());
            }),
        }
    }

    /// Custom effects.
    pub fn new(
        navigate: impl Fn(&str) + 'static,
        submit: impl Fn(&HtmlFormElement) + 'static,
    ) -> Self {
        Self {
            navigate: Box::new(navigate),
            submit: Box::new(submit),
        }
    }

    /// Send the browser to `path`.
    pub fn navigate(&self, path: &str) {
        (self.navigate)(path);
    }

    /// Submit `form`.
    pub fn submit(&self, form: &HtmlFormElement) {
        (self.submit)(form);
    }
}
