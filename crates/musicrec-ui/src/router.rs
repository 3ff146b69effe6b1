//! The UI event router.
//!
//! One delegated click listener on the root dispatches through an
//! [`IntentRegistry`]; the mini-player's audio element and play button, and
//! every search input present at attach time, get direct listeners. The
//! router owns all listener closures: dropping it detaches everything.

use std::rc::Rc;

use musicrec_core::{
    Error, Intent, IntentRegistry, LikeState, LikeView, PlaybackEvent, Result, SongActivation,
    UiConfig,
};
use tracing::{debug, info, trace};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event, EventTarget, KeyboardEvent};

use crate::dom::{DomElement, event_target_element, js_error, nearest_form, warn_on_error};
use crate::effects::PageEffects;
use crate::mini_player::MiniPlayer;

/// State shared by every handler.
struct RouterContext {
    config: Rc<UiConfig>,
    root: Element,
    player: Option<Rc<MiniPlayer>>,
    effects: PageEffects,
}

type ClickHandler = fn(&RouterContext, &DomElement, &Event);

/// An installed event listener, removed on drop.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn install(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .map_err(js_error)?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        warn_on_error(
            "remove listener",
            self.target
                .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref()),
        );
    }
}

/// Page behaviors attached to a root element.
pub struct EventRouter {
    context: Rc<RouterContext>,
    listeners: Vec<Listener>,
}

impl EventRouter {
    /// Attach to `root` with browser navigation and form submission.
    pub fn attach(document: &Document, root: &Element, config: UiConfig) -> Result<Self> {
        let window = crate::dom::window()?;
        Self::attach_with_effects(document, root, config, PageEffects::browser(window))
    }

    /// Attach to `root` with custom page effects.
    pub fn attach_with_effects(
        document: &Document,
        root: &Element,
        config: UiConfig,
        effects: PageEffects,
    ) -> Result<Self> {
        config.validate()?;
        check_selectors(root, &config)?;
        let config = Rc::new(config);

        let player = MiniPlayer::locate(document, Rc::clone(&config)).map(Rc::new);
        if player.is_none() {
            debug!("No mini-player on this page, previews disabled");
        }

        let context = Rc::new(RouterContext {
            config: Rc::clone(&config),
            root: root.clone(),
            player,
            effects,
        });

        let mut listeners = vec![Self::install_click_delegation(&context)?];
        if let Some(player) = &context.player {
            listeners.extend(Self::install_player_listeners(player)?);
        }
        listeners.extend(Self::install_search_shortcuts(&context)?);

        info!(listeners = listeners.len(), "Page behaviors attached");
        Ok(Self { context, listeners })
    }

    /// The mini-player, when the page has one.
    pub fn player(&self) -> Option<&Rc<MiniPlayer>> {
        self.context.player.as_ref()
    }

    /// Number of installed listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Keep the listeners installed for the lifetime of the page.
    pub fn keep_alive(self) {
        std::mem::forget(self);
    }

    fn install_click_delegation(context: &Rc<RouterContext>) -> Result<Listener> {
        let mut registry: IntentRegistry<ClickHandler> = IntentRegistry::new();
        registry
            .register(Intent::ApplyFilters, &context.config, apply_filters)
            .register(Intent::ActivateSong, &context.config, activate_song)
            .register(Intent::ToggleLike, &context.config, toggle_like);

        let ctx = Rc::clone(context);
        Listener::install(context.root.as_ref(), "click", move |event: Event| {
            let Some(target) = event_target_element(&event) else {
                return;
            };
            for matched in registry.resolve(&target) {
                (matched.handler)(ctx.as_ref(), &matched.element, &event);
            }
        })
    }

    fn install_player_listeners(player: &Rc<MiniPlayer>) -> Result<Vec<Listener>> {
        let audio: &EventTarget = player.audio().as_ref();
        let mut listeners = Vec::with_capacity(4);

        if let Some(button) = player.play_button() {
            let p = Rc::clone(player);
            listeners.push(Listener::install(button.as_ref(), "click", move |_| {
                p.toggle();
            })?);
        }

        for (kind, playback_event) in [
            ("ended", PlaybackEvent::Ended),
            ("play", PlaybackEvent::MediaPlay),
            ("pause", PlaybackEvent::MediaPause),
        ] {
            let p = Rc::clone(player);
            listeners.push(Listener::install(audio, kind, move |_| {
                trace!(%kind, "Audio event");
                p.handle(playback_event);
            })?);
        }

        Ok(listeners)
    }

    fn install_search_shortcuts(context: &Rc<RouterContext>) -> Result<Vec<Listener>> {
        let inputs = context
            .root
            .query_selector_all(&context.config.selectors.search_input)
            .map_err(js_error)?;

        let mut listeners = Vec::new();
        for index in 0..inputs.length() {
            let Some(input) = inputs.get(index).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let ctx = Rc::clone(context);
            let field = input.clone();
            listeners.push(Listener::install(input.as_ref(), "keydown", move |event: Event| {
                submit_on_enter(&ctx, &field, &event);
            })?);
        }
        debug!(count = listeners.len(), "Search shortcuts installed");
        Ok(listeners)
    }
}

/// Reject configurations whose selectors the browser cannot parse, so that
/// attaching fails instead of every later `closest` call.
fn check_selectors(root: &Element, config: &UiConfig) -> Result<()> {
    let delegated = Intent::ALL.map(|intent| (intent.to_string(), intent.selector(config)));
    let standalone = [
        (
            "selectors.fallback_form".to_string(),
            config.selectors.fallback_form.clone(),
        ),
        (
            "selectors.search_input".to_string(),
            config.selectors.search_input.clone(),
        ),
    ];
    for (field, selector) in delegated.into_iter().chain(standalone) {
        root.matches(&selector).map_err(|e| Error::InvalidConfig {
            field,
            reason: format!("invalid selector {selector}: {}", js_error(e)),
        })?;
    }
    Ok(())
}

fn apply_filters(ctx: &RouterContext, control: &DomElement, event: &Event) {
    event.prevent_default();
    match nearest_form(&control.0, &ctx.root, &ctx.config.selectors.fallback_form) {
        Some(form) => ctx.effects.submit(&form),
        None => debug!("Apply clicked without a filter form"),
    }
}

fn activate_song(ctx: &RouterContext, control: &DomElement, _event: &Event) {
    match SongActivation::from_element(control, &ctx.config) {
        Some(SongActivation::OpenPreview(song)) => match &ctx.player {
            Some(player) => player.open(&song),
            None => trace!(song_id = %song.id, "Preview requested without a mini-player"),
        },
        Some(SongActivation::Navigate(path)) => ctx.effects.navigate(&path),
        None => {}
    }
}

fn toggle_like(ctx: &RouterContext, control: &DomElement, _event: &Event) {
    let element = &control.0;
    let state =
        LikeState::from_aria_pressed(element.get_attribute("aria-pressed").as_deref()).toggled();
    let view = LikeView::render(state, &ctx.config);

    warn_on_error(
        "set aria-pressed",
        element.set_attribute("aria-pressed", view.aria_pressed),
    );
    element.set_text_content(Some(view.glyph));
    warn_on_error(
        "toggle liked class",
        element
            .class_list()
            .toggle_with_force(view.liked_class, view.class_present),
    );
    debug!(liked = state.is_liked(), "Like toggled");
}

fn submit_on_enter(ctx: &RouterContext, field: &Element, event: &Event) {
    let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
        return;
    };
    if !ctx.config.keys.is_submit(&key_event.key()) {
        return;
    }
    if let Some(form) = nearest_form(field, &ctx.root, &ctx.config.selectors.fallback_form) {
        event.prevent_default();
        ctx.effects.submit(&form);
    }
}
