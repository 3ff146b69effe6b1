//! Page contract configuration.
//!
//! Names every id, attribute, class, label and route the page behaviors
//! depend on. Defaults match the markup rendered by the site templates, and
//! every section deserializes with defaults so a partial JSON override is
//! enough to rename a single element.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Id of the `<script type="application/json">` element carrying overrides.
///
/// Fixed: the override cannot rename the element it is read from.
pub const CONFIG_SCRIPT_ID: &str = "musicrec-config";

/// Ids of the mini-player elements.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ElementIds {
    /// Mini-player container.
    pub mini_player: String,
    /// Audio element playing previews.
    pub audio: String,
    /// Play/pause button.
    pub play_button: String,
    /// Title label.
    pub title: String,
    /// Artist label.
    pub artist: String,
    /// Link to the song detail page.
    pub open_link: String,
    /// Cover image element.
    pub cover: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            mini_player: "mini-player".to_string(),
            audio: "mini-audio".to_string(),
            play_button: "mini-play".to_string(),
            title: "mini-title".to_string(),
            artist: "mini-artist".to_string(),
            open_link: "mini-open".to_string(),
            cover: "mini-cover".to_string(),
        }
    }
}

/// Attribute names read from activated elements.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AttributeNames {
    /// Attribute holding an action name (`apply-filters`, `like`).
    pub action: String,
    /// Song identifier.
    pub song_id: String,
    /// Preview audio URL.
    pub preview: String,
    /// Song title.
    pub title: String,
    /// Song artist.
    pub artist: String,
}

impl Default for AttributeNames {
    fn default() -> Self {
        Self {
            action: "data-action".to_string(),
            song_id: "data-song-id".to_string(),
            preview: "data-preview".to_string(),
            title: "data-title".to_string(),
            artist: "data-artist".to_string(),
        }
    }
}

/// Values of the action attribute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ActionNames {
    /// Submits the enclosing filter form.
    pub apply_filters: String,
    /// Toggles a like control.
    pub like: String,
}

impl Default for ActionNames {
    fn default() -> Self {
        Self {
            apply_filters: "apply-filters".to_string(),
            like: "like".to_string(),
        }
    }
}

/// CSS selectors used outside of event delegation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Selectors {
    /// Page-level filter form used when a control has no enclosing form.
    pub fallback_form: String,
    /// Search inputs that submit on Enter.
    pub search_input: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            fallback_form: ".filter-form".to_string(),
            search_input: r#"input[type="search"]"#.to_string(),
        }
    }
}

/// CSS class names toggled by the behaviors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClassNames {
    /// Added to the mini-player container while playing.
    pub playing: String,
    /// Added to a like control while liked.
    pub liked: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            playing: "playing".to_string(),
            liked: "liked".to_string(),
        }
    }
}

/// User-visible text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Labels {
    /// Play button text while paused.
    pub play: String,
    /// Play button text while playing.
    pub pause: String,
    /// Title shown when a song has none.
    pub unknown_title: String,
    /// Prefix of the open link's accessible label.
    pub open_song_prefix: String,
    /// Glyph of a liked control.
    pub liked_glyph: String,
    /// Glyph of a control that is not liked.
    pub unliked_glyph: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            play: "Play".to_string(),
            pause: "Pause".to_string(),
            unknown_title: "Unknown".to_string(),
            open_song_prefix: "Open song ".to_string(),
            liked_glyph: "\u{2665}".to_string(),
            unliked_glyph: "\u{2661}".to_string(),
        }
    }
}

/// Server routes and static assets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Routes {
    /// Prefix of song detail pages; the id is appended.
    pub song_prefix: String,
    /// Placeholder cover image.
    pub cover_placeholder: String,
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            song_prefix: "/song/".to_string(),
            cover_placeholder: "/static/cover-placeholder.svg".to_string(),
        }
    }
}

/// Keyboard shortcuts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeyBindings {
    /// `KeyboardEvent.key` value that submits a search input.
    pub submit: String,
}

impl KeyBindings {
    /// Returns `true` when `key` submits a search input.
    pub fn is_submit(&self, key: &str) -> bool {
        key == self.submit
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            submit: "Enter".to_string(),
        }
    }
}

/// Complete page contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UiConfig {
    /// Element ids.
    pub elements: ElementIds,
    /// Attribute names.
    pub attributes: AttributeNames,
    /// Action attribute values.
    pub actions: ActionNames,
    /// Standalone selectors.
    pub selectors: Selectors,
    /// Class names.
    pub classes: ClassNames,
    /// Text labels and glyphs.
    pub labels: Labels,
    /// Routes and assets.
    pub routes: Routes,
    /// Keyboard shortcuts.
    pub keys: KeyBindings,
}

impl UiConfig {
    /// Parse a JSON override. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for malformed JSON and
    /// [`Error::InvalidConfig`] when a required name is empty or cannot be
    /// used in a selector.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        debug!("Loaded page configuration override");
        Ok(config)
    }

    /// Check that every name the router looks up is non-empty, and that the
    /// names pasted into delegation selectors keep those selectors valid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("elements.mini_player", &self.elements.mini_player),
            ("elements.audio", &self.elements.audio),
            ("elements.play_button", &self.elements.play_button),
            ("elements.title", &self.elements.title),
            ("elements.artist", &self.elements.artist),
            ("elements.open_link", &self.elements.open_link),
            ("elements.cover", &self.elements.cover),
            ("attributes.action", &self.attributes.action),
            ("attributes.song_id", &self.attributes.song_id),
            ("attributes.preview", &self.attributes.preview),
            ("attributes.title", &self.attributes.title),
            ("attributes.artist", &self.attributes.artist),
            ("actions.apply_filters", &self.actions.apply_filters),
            ("actions.like", &self.actions.like),
            ("selectors.fallback_form", &self.selectors.fallback_form),
            ("selectors.search_input", &self.selectors.search_input),
            ("classes.playing", &self.classes.playing),
            ("classes.liked", &self.classes.liked),
            ("routes.song_prefix", &self.routes.song_prefix),
            ("keys.submit", &self.keys.submit),
        ];

        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(Error::empty_field(*field));
        }

        let attribute_names = [
            ("attributes.action", &self.attributes.action),
            ("attributes.song_id", &self.attributes.song_id),
            ("attributes.preview", &self.attributes.preview),
            ("attributes.title", &self.attributes.title),
            ("attributes.artist", &self.attributes.artist),
        ];
        if let Some((field, _)) = attribute_names
            .iter()
            .find(|(_, name)| !is_attribute_name(name))
        {
            return Err(Error::InvalidConfig {
                field: (*field).to_string(),
                reason: "must be a plain attribute name (letters, digits, '-' or '_')"
                    .to_string(),
            });
        }

        let action_values = [
            ("actions.apply_filters", &self.actions.apply_filters),
            ("actions.like", &self.actions.like),
        ];
        if let Some((field, _)) = action_values
            .iter()
            .find(|(_, value)| !is_action_value(value))
        {
            return Err(Error::InvalidConfig {
                field: (*field).to_string(),
                reason: "must not contain whitespace, quotes, brackets, '=' or '\\'"
                    .to_string(),
            });
        }

        Ok(())
    }

    /// Selector matching filter-apply controls.
    pub fn apply_filters_selector(&self) -> String {
        action_selector(&self.attributes.action, &self.actions.apply_filters)
    }

    /// Selector matching like controls.
    pub fn like_selector(&self) -> String {
        action_selector(&self.attributes.action, &self.actions.like)
    }

    /// Selector matching song-activation controls.
    pub fn song_selector(&self) -> String {
        format!("[{}]", self.attributes.song_id)
    }

    /// Path of the detail page for a song.
    pub fn song_path(&self, id: &str) -> String {
        format!("{}{id}", self.routes.song_prefix)
    }

    /// CSS `background-image` value for the placeholder cover.
    pub fn cover_background(&self) -> String {
        format!("url('{}')", self.routes.cover_placeholder)
    }
}

/// Usable unescaped inside `[...]`: a CSS identifier of ASCII letters,
/// digits, `-` and `_` that does not start with a digit.
fn is_attribute_name(name: &str) -> bool {
    name.chars()
        .next()
        .is_some_and(|first| !first.is_ascii_digit())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Usable unescaped inside a double-quoted attribute selector value.
fn is_action_value(value: &str) -> bool {
    !value.chars().any(|c| {
        c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '[' | ']' | '=' | '\\')
    })
}

fn action_selector(attribute: &str, value: &str) -> String {
    format!(r#"[{attribute}="{value}"]"#)
}
