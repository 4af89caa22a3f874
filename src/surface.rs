//! Seams between the controllers and the page.
//!
//! The browser build implements these over `web_sys` elements and
//! `gloo-timers`; tests substitute in-memory fakes.

use crate::error::PlayerError;
use std::time::Duration;

/// The single video element the background plays on.
#[allow(async_fn_in_trait)]
pub trait MediaSurface {
    /// Current source URL, empty when none is assigned
    fn src(&self) -> String;
    fn set_src(&self, src: &str);
    /// Ask the element to (re)load its current source
    fn load(&self);
    /// Total length in seconds, NaN until metadata is known
    fn duration(&self) -> f64;
    /// Playback position in seconds
    fn current_time(&self) -> f64;
    fn set_opacity(&self, opacity: f64);
    /// Whether enough data is buffered to start playing
    fn is_ready(&self) -> bool;
    /// Whether the current source already failed, so no readiness signal
    /// will follow until it is reloaded
    fn has_failed(&self) -> bool;
    /// Resolves once, on the first readiness signal after the call.
    async fn wait_ready(&self) -> Result<(), PlayerError>;
    async fn play(&self) -> Result<(), PlayerError>;
}

/// A text node the clock renders into.
pub trait TextSurface {
    fn set_text(&self, text: &str);
}

/// Non-blocking delay.
#[allow(async_fn_in_trait)]
pub trait Sleeper {
    async fn sleep(&self, duration: Duration);
}
