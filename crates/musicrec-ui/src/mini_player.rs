//! The mini-player widget.
//!
//! Holds the page's mini-player elements and its [`PlaybackState`]. Every
//! state change goes through [`MiniPlayer::handle`], which re-renders the
//! play button label and the container's `playing` class from the state.

use std::cell::Cell;
use std::rc::Rc;

use musicrec_core::{PlaybackEvent, PlaybackState, PlayerView, SongRef, UiConfig};
use tracing::{debug, info};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Document, Element, HtmlElement, HtmlMediaElement};

use crate::dom::{element_by_id, warn_on_error};

/// Mini-player elements and playback state.
pub struct MiniPlayer {
    container: Element,
    audio: HtmlMediaElement,
    play_button: Option<Element>,
    title: Option<Element>,
    artist: Option<Element>,
    open_link: Option<Element>,
    cover: Option<HtmlElement>,
    state: Cell<PlaybackState>,
    config: Rc<UiConfig>,
}

impl MiniPlayer {
    /// Find the mini-player on the page.
    ///
    /// Returns `None` when the container or the audio element is missing;
    /// the other parts are optional and skipped when absent.
    pub fn locate(document: &Document, config: Rc<UiConfig>) -> Option<Self> {
        let ids = &config.elements;
        let container = document.get_element_by_id(&ids.mini_player)?;
        let audio = element_by_id::<HtmlMediaElement>(document, &ids.audio)?;

        Some(Self {
            container,
            play_button: document.get_element_by_id(&ids.play_button),
            title: document.get_element_by_id(&ids.title),
            artist: document.get_element_by_id(&ids.artist),
            open_link: document.get_element_by_id(&ids.open_link),
            cover: element_by_id::<HtmlElement>(document, &ids.cover),
            state: Cell::new(PlaybackState::from_paused(audio.paused())),
            audio,
            config,
        })
    }

    /// Current playback state.
    pub fn state(&self) -> PlaybackState {
        self.state.get()
    }

    /// The audio element.
    pub const fn audio(&self) -> &HtmlMediaElement {
        &self.audio
    }

    /// The play/pause button, if the page has one.
    pub const fn play_button(&self) -> Option<&Element> {
        self.play_button.as_ref()
    }

    /// Show the mini-player and start playing a song's preview.
    ///
    /// Replaces whatever was playing. Does nothing for a song without preview.
    pub fn open(self: &Rc<Self>, song: &SongRef) {
        let Some(preview) = song.preview_url.as_deref() else {
            return;
        };
        info!(song_id = %song.id, %preview, "Opening mini-player");

        warn_on_error(
            "show mini-player",
            self.container.set_attribute("aria-hidden", "false"),
        );
        warn_on_error("pause previous preview", self.audio.pause());
        self.audio.set_src(preview);
        self.audio.set_current_time(0.0);

        if let Some(title) = &self.title {
            title.set_text_content(Some(song.display_title(&self.config)));
        }
        if let Some(artist) = &self.artist {
            artist.set_text_content(Some(song.display_artist()));
        }
        if let Some(link) = &self.open_link {
            warn_on_error(
                "set open link",
                link.set_attribute("href", &song.detail_path(&self.config)),
            );
            warn_on_error(
                "set open link label",
                link.set_attribute("aria-label", &song.open_link_label(&self.config)),
            );
        }
        if let Some(cover) = &self.cover {
            warn_on_error(
                "set cover",
                cover
                    .style()
                    .set_property("background-image", &self.config.cover_background()),
            );
        }

        self.handle(PlaybackEvent::Opened);
        self.start_playback();
    }

    /// Play when paused, pause when playing.
    pub fn toggle(self: &Rc<Self>) {
        let was_playing = self.state().is_playing();
        self.handle(PlaybackEvent::ToggleRequested);
        if was_playing {
            warn_on_error("pause preview", self.audio.pause());
        } else {
            self.start_playback();
        }
    }

    /// Apply an event to the state and re-render.
    pub fn handle(&self, event: PlaybackEvent) {
        self.state.set(self.state.get().apply(event));
        self.render();
    }

    fn render(&self) {
        let view = PlayerView::render(self.state.get(), &self.config);
        if let Some(button) = &self.play_button {
            button.set_text_content(Some(view.button_label));
        }
        warn_on_error(
            "toggle playing class",
            self.container
                .class_list()
                .toggle_with_force(view.playing_class, view.class_present),
        );
    }

    /// Start playback. A rejected start (autoplay policy, unsupported or
    /// missing source, superseded load) is not surfaced; the state is
    /// re-synchronized with the element instead.
    fn start_playback(self: &Rc<Self>) {
        match self.audio.play() {
            Ok(promise) => {
                let player = Rc::clone(self);
                spawn_local(async move {
                    if let Err(reason) = JsFuture::from(promise).await {
                        debug!(?reason, "Preview playback did not start");
                        let paused = player.audio.paused();
                        player.handle(PlaybackEvent::StartRejected { paused });
                    }
                });
            }
            Err(reason) => {
                debug!(?reason, "Preview playback could not be requested");
                let paused = self.audio.paused();
                self.handle(PlaybackEvent::StartRejected { paused });
            }
        }
    }
}
