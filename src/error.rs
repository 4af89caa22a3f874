//! Error types for tvclock

use thiserror::Error;

/// Errors raised while binding the page or driving the video cycle.
///
/// None of these are surfaced to the viewer: the controller logs them and
/// degrades to a visible, playing state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlayerError {
    /// A required page element could not be found at startup
    #[error("required element #{0} not found")]
    MissingElement(String),

    /// The next-video request never produced a response
    #[error("next-video request failed: {0}")]
    Request(String),

    /// The next-video endpoint answered with a non-2xx status
    #[error("next-video endpoint returned HTTP {0}")]
    Status(u16),

    /// The next-video body was not `{ "videoPath": "..." }`
    #[error("malformed next-video response: {0}")]
    Malformed(String),

    /// The endpoint could not be resolved to an absolute URL
    #[error("invalid next-video endpoint: {0}")]
    Endpoint(String),

    /// A page listener could not be installed
    #[error("failed to bind page listener: {0}")]
    Bind(String),

    /// The media element refused to start playback
    #[error("playback failed: {0}")]
    Playback(String),

    /// The media element reported an error while loading a source
    #[error("media failed to load: {0}")]
    Load(String),
}

impl From<reqwest::Error> for PlayerError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => PlayerError::Status(status.as_u16()),
            None if err.is_decode() => PlayerError::Malformed(err.to_string()),
            None => PlayerError::Request(err.to_string()),
        }
    }
}
