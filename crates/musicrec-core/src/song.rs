//! Song references read from activated elements.

use tracing::{debug, trace};

use crate::config::UiConfig;

/// Read access to an element's attributes.
///
/// Implemented for DOM elements by the UI crate; mocked in tests.
#[cfg_attr(test, mockall::automock)]
pub trait AttributeSource {
    /// Value of the attribute, or `None` when it is not set.
    fn attribute(&self, name: &str) -> Option<String>;
}

/// A song as described by the attributes of the element that was clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongRef {
    /// Song identifier, possibly empty.
    pub id: String,
    /// Preview audio URL.
    pub preview_url: Option<String>,
    /// Song title.
    pub title: Option<String>,
    /// Song artist.
    pub artist: Option<String>,
}

impl SongRef {
    /// Read a song reference from an element. Empty attributes count as absent.
    pub fn from_attributes(source: &impl AttributeSource, config: &UiConfig) -> Self {
        let attrs = &config.attributes;
        Self {
            id: source.attribute(&attrs.song_id).unwrap_or_default(),
            preview_url: non_empty(source.attribute(&attrs.preview)),
            title: non_empty(source.attribute(&attrs.title)),
            artist: non_empty(source.attribute(&attrs.artist)),
        }
    }

    /// Title to display, falling back to the configured placeholder.
    pub fn display_title<'a>(&'a self, config: &'a UiConfig) -> &'a str {
        self.title
            .as_deref()
            .unwrap_or(&config.labels.unknown_title)
    }

    /// Artist to display; empty when unknown.
    pub fn display_artist(&self) -> &str {
        self.artist.as_deref().unwrap_or_default()
    }

    /// Accessible label of the mini-player's open link.
    pub fn open_link_label(&self, config: &UiConfig) -> String {
        format!(
            "{}{}",
            config.labels.open_song_prefix,
            self.title.as_deref().unwrap_or_default()
        )
    }

    /// Detail page of this song.
    pub fn detail_path(&self, config: &UiConfig) -> String {
        config.song_path(&self.id)
    }
}

/// What clicking a song control should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SongActivation {
    /// Play the preview in the mini-player.
    OpenPreview(SongRef),
    /// Navigate the browser to the given path.
    Navigate(String),
}

impl SongActivation {
    /// Decide the activation for a clicked song control.
    ///
    /// Returns `None` when the element has neither a preview nor an id.
    pub fn resolve(song: SongRef, config: &UiConfig) -> Option<Self> {
        if song.preview_url.is_some() {
            debug!(song_id = %song.id, "Opening preview");
            Some(Self::OpenPreview(song))
        } else if !song.id.is_empty() {
            let path = song.detail_path(config);
            debug!(song_id = %song.id, %path, "No preview, navigating to song page");
            Some(Self::Navigate(path))
        } else {
            trace!("Song control has neither preview nor id");
            None
        }
    }

    /// Read and resolve in one step.
    pub fn from_element(source: &impl AttributeSource, config: &UiConfig) -> Option<Self> {
        Self::resolve(SongRef::from_attributes(source, config), config)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use mockall::predicate::{eq, function};

    fn mock_with(attrs: &'static [(&'static str, &'static str)]) -> MockAttributeSource {
        let mut mock = MockAttributeSource::new();
        mock.expect_attribute().returning(move |name| {
            attrs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_string())
        });
        mock
    }

    #[test]
    fn test_reads_all_attributes() {
        let mock = mock_with(&[
            ("data-song-id", "42"),
            ("data-preview", "/p/42.mp3"),
            ("data-title", "X"),
            ("data-artist", "Y"),
        ]);
        let song = SongRef::from_attributes(&mock, &UiConfig::default());
        assert_eq!(song.id, "42");
        assert_eq!(song.preview_url.as_deref(), Some("/p/42.mp3"));
        assert_eq!(song.title.as_deref(), Some("X"));
        assert_eq!(song.artist.as_deref(), Some("Y"));
    }

    #[test]
    fn test_empty_attributes_are_absent() {
        let mock = mock_with(&[
            ("data-song-id", "7"),
            ("data-preview", ""),
            ("data-title", ""),
        ]);
        let song = SongRef::from_attributes(&mock, &UiConfig::default());
        assert_eq!(song.preview_url, None);
        assert_eq!(song.title, None);
        assert_eq!(song.artist, None);
    }

    #[test]
    fn test_uses_configured_attribute_names() {
        let mut config = UiConfig::default();
        config.attributes.song_id = "data-track".to_string();

        let mut mock = MockAttributeSource::new();
        mock.expect_attribute()
            .with(eq("data-track"))
            .times(1)
            .returning(|_| Some("9".to_string()));
        mock.expect_attribute()
            .with(function(|name: &str| name != "data-track"))
            .returning(|_| None);

        let song = SongRef::from_attributes(&mock, &config);
        assert_eq!(song.id, "9");
    }

    #[test]
    fn test_display_defaults() {
        let config = UiConfig::default();
        let song = SongRef {
            id: "1".to_string(),
            preview_url: None,
            title: None,
            artist: None,
        };
        assert_eq!(song.display_title(&config), "Unknown");
        assert_eq!(song.display_artist(), "");
        assert_eq!(song.open_link_label(&config), "Open song ");
    }

    #[test]
    fn test_open_link_label_with_title() {
        let config = UiConfig::default();
        let song = SongRef {
            id: "1".to_string(),
            preview_url: None,
            title: Some("Blue".to_string()),
            artist: None,
        };
        assert_eq!(song.open_link_label(&config), "Open song Blue");
        assert_eq!(song.detail_path(&config), "/song/1");
    }

    #[test]
    fn test_preview_opens_mini_player() {
        let mock = mock_with(&[("data-song-id", "42"), ("data-preview", "/p/42.mp3")]);
        let activation = SongActivation::from_element(&mock, &UiConfig::default()).unwrap();
        match activation {
            SongActivation::OpenPreview(song) => assert_eq!(song.id, "42"),
            other => panic!("unexpected activation: {other:?}"),
        }
    }

    #[test]
    fn test_missing_preview_navigates() {
        let mock = mock_with(&[("data-song-id", "42")]);
        assert_eq!(
            SongActivation::from_element(&mock, &UiConfig::default()),
            Some(SongActivation::Navigate("/song/42".to_string()))
        );
    }

    #[test]
    fn test_nothing_without_preview_or_id() {
        let mock = mock_with(&[("data-song-id", "")]);
        assert_eq!(
            SongActivation::from_element(&mock, &UiConfig::default()),
            None
        );
    }
}
