//! Client-side like toggle.
//!
//! Purely visual: nothing is sent to the server and the state is lost on reload.

use crate::config::UiConfig;

/// Whether a like control is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LikeState {
    /// Pressed.
    Liked,
    /// Not pressed.
    #[default]
    NotLiked,
}

impl LikeState {
    /// Read the state from an `aria-pressed` value. Only `"true"` means liked.
    pub fn from_aria_pressed(value: Option<&str>) -> Self {
        if value == Some("true") {
            Self::Liked
        } else {
            Self::NotLiked
        }
    }

    /// The opposite state.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Liked => Self::NotLiked,
            Self::NotLiked => Self::Liked,
        }
    }

    /// Returns `true` when liked.
    pub const fn is_liked(self) -> bool {
        matches!(self, Self::Liked)
    }

    /// Value written back to `aria-pressed`.
    pub const fn aria_pressed(self) -> &'static str {
        if self.is_liked() { "true" } else { "false" }
    }
}

/// Presentation of a like control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeView<'a> {
    /// `aria-pressed` value.
    pub aria_pressed: &'static str,
    /// Text content of the control.
    pub glyph: &'a str,
    /// Class toggled on the control.
    pub liked_class: &'a str,
    /// Whether the class is present.
    pub class_present: bool,
}

impl<'a> LikeView<'a> {
    /// Render a state with the configured glyphs and class.
    pub fn render(state: LikeState, config: &'a UiConfig) -> Self {
        let glyph = if state.is_liked() {
            &config.labels.liked_glyph
        } else {
            &config.labels.unliked_glyph
        };
        Self {
            aria_pressed: state.aria_pressed(),
            glyph,
            liked_class: &config.classes.liked,
            class_present: state.is_liked(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_aria_pressed() {
        assert_eq!(LikeState::from_aria_pressed(Some("true")), LikeState::Liked);
        assert_eq!(
            LikeState::from_aria_pressed(Some("false")),
            LikeState::NotLiked
        );
        assert_eq!(LikeState::from_aria_pressed(Some("TRUE")), LikeState::NotLiked);
        assert_eq!(LikeState::from_aria_pressed(None), LikeState::NotLiked);
    }

    #[test]
    fn test_single_toggle_likes() {
        let config = UiConfig::default();
        let view = LikeView::render(LikeState::NotLiked.toggled(), &config);
        assert_eq!(view.aria_pressed, "true");
        assert_eq!(view.glyph, "♥");
        assert_eq!(view.liked_class, "liked");
        assert!(view.class_present);
    }

    #[test]
    fn test_double_toggle_restores() {
        let config = UiConfig::default();
        for state in [LikeState::Liked, LikeState::NotLiked] {
            let before = LikeView::render(state, &config);
            let after = LikeView::render(state.toggled().toggled(), &config);
            assert_eq!(before, after);
        }
    }

    #[test]
    fn test_unliked_view() {
        let config = UiConfig::default();
        let view = LikeView::render(LikeState::NotLiked, &config);
        assert_eq!(view.aria_pressed, "false");
        assert_eq!(view.glyph, "♡");
        assert!(!view.class_present);
    }
}
