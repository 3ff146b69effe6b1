//! Mini-player playback state.
//!
//! [`PlaybackState`] is the single source of truth for the mini-player. The
//! play button label and the container's `playing` class are derived from it
//! by [`PlayerView::render`], so they cannot drift apart from each other. The
//! audio element's native `play`/`pause`/`ended` events feed back into the
//! state through [`PlaybackEvent`].

use tracing::trace;

use crate::config::UiConfig;

/// Whether the mini-player is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Audio is playing.
    Playing,
    /// Audio is paused, ended, or was never started.
    #[default]
    Paused,
}

impl PlaybackState {
    /// State matching an audio element's `paused` flag.
    pub const fn from_paused(paused: bool) -> Self {
        if paused { Self::Paused } else { Self::Playing }
    }

    /// Returns `true` while playing.
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// The opposite state.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Playing => Self::Paused,
            Self::Paused => Self::Playing,
        }
    }

    /// Apply an event and return the resulting state.
    #[must_use]
    pub fn apply(self, event: PlaybackEvent) -> Self {
        let next = match event {
            PlaybackEvent::Opened | PlaybackEvent::MediaPlay => Self::Playing,
            PlaybackEvent::Ended | PlaybackEvent::MediaPause => Self::Paused,
            PlaybackEvent::ToggleRequested => self.toggled(),
            PlaybackEvent::StartRejected { paused } => Self::from_paused(paused),
        };
        trace!(from = ?self, to = ?next, ?event, "Playback transition");
        next
    }
}

/// Something that changes the playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// A preview was loaded and started.
    Opened,
    /// The play button was clicked.
    ToggleRequested,
    /// The audio reached the end of the stream.
    Ended,
    /// The audio element reported `play`.
    MediaPlay,
    /// The audio element reported `pause`.
    MediaPause,
    /// Starting playback failed; carries the element's `paused` flag afterwards.
    StartRejected {
        /// Value of `paused` after the rejection.
        paused: bool,
    },
}

/// Presentation derived from a [`PlaybackState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerView<'a> {
    /// Play button text.
    pub button_label: &'a str,
    /// Class toggled on the mini-player container.
    pub playing_class: &'a str,
    /// Whether the class is present.
    pub class_present: bool,
}

impl<'a> PlayerView<'a> {
    /// Render a state with the configured labels and class.
    pub fn render(state: PlaybackState, config: &'a UiConfig) -> Self {
        let button_label = match state {
            PlaybackState::Playing => config.labels.pause.as_str(),
            PlaybackState::Paused => config.labels.play.as_str(),
        };
        Self {
            button_label,
            playing_class: &config.classes.playing,
            class_present: state.is_playing(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_paused() {
        assert_eq!(PlaybackState::default(), PlaybackState::Paused);
    }

    #[test]
    fn test_from_paused() {
        assert_eq!(PlaybackState::from_paused(true), PlaybackState::Paused);
        assert_eq!(PlaybackState::from_paused(false), PlaybackState::Playing);
    }

    #[test]
    fn test_open_always_plays() {
        for state in [PlaybackState::Playing, PlaybackState::Paused] {
            assert_eq!(state.apply(PlaybackEvent::Opened), PlaybackState::Playing);
        }
    }

    #[test]
    fn test_toggle_twice_round_trips() {
        for state in [PlaybackState::Playing, PlaybackState::Paused] {
            let back = state
                .apply(PlaybackEvent::ToggleRequested)
                .apply(PlaybackEvent::ToggleRequested);
            assert_eq!(back, state);
        }
    }

    #[test]
    fn test_ended_always_pauses() {
        for state in [PlaybackState::Playing, PlaybackState::Paused] {
            assert_eq!(state.apply(PlaybackEvent::Ended), PlaybackState::Paused);
        }
    }

    #[test]
    fn test_media_events_mirror() {
        assert_eq!(
            PlaybackState::Paused.apply(PlaybackEvent::MediaPlay),
            PlaybackState::Playing
        );
        assert_eq!(
            PlaybackState::Playing.apply(PlaybackEvent::MediaPause),
            PlaybackState::Paused
        );
    }

    #[test]
    fn test_rejection_resyncs_with_element() {
        assert_eq!(
            PlaybackState::Playing.apply(PlaybackEvent::StartRejected { paused: true }),
            PlaybackState::Paused
        );
        assert_eq!(
            PlaybackState::Playing.apply(PlaybackEvent::StartRejected { paused: false }),
            PlaybackState::Playing
        );
    }

    #[test]
    fn test_render_playing() {
        let config = UiConfig::default();
        let view = PlayerView::render(PlaybackState::Playing, &config);
        assert_eq!(view.button_label, "Pause");
        assert_eq!(view.playing_class, "playing");
        assert!(view.class_present);
    }

    #[test]
    fn test_render_paused() {
        let config = UiConfig::default();
        let view = PlayerView::render(PlaybackState::Paused, &config);
        assert_eq!(view.button_label, "Play");
        assert!(!view.class_present);
    }
}
