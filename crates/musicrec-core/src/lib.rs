//! `Musicrec` Core Library
//!
//! Browser-independent logic behind the page behaviors of the `Musicrec`
//! site:
//! - The page contract (element ids, attributes, labels, routes)
//! - Song references and the open-preview / navigate decision
//! - The mini-player playback state and its derived presentation
//! - The like toggle
//! - Intent-based click delegation
//!
//! The `musicrec-ui` crate binds these to the DOM.
//!
//! # Error Handling
//!
//! Fallible operations return [`Result`] with the crate's [`Error`].

pub mod config;
pub mod error;
pub mod intent;
pub mod like;
pub mod playback;
pub mod song;

pub use config::{
    ActionNames, AttributeNames, CONFIG_SCRIPT_ID, ClassNames, ElementIds, KeyBindings, Labels,
    Routes, Selectors, UiConfig,
};
pub use error::{Error, Result};
pub use intent::{DelegationTarget, Intent, IntentRegistry, Matched};
pub use like::{LikeState, LikeView};
pub use playback::{PlaybackEvent, PlaybackState, PlayerView};
pub use song::{AttributeSource, SongActivation, SongRef};
