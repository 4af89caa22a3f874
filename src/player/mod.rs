//! Background video cycle: fade out, fetch the next path, load, fade in.

pub mod controller;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use controller::CycleController;

use crate::error::PlayerError;
use crate::settings::PlayerSettings;

/// Run `install` with both page elements, or fail without calling it.
///
/// Everything with a side effect (clock timer, listeners, first playback)
/// belongs inside `install`, so a missing element leaves the page untouched.
pub fn bind_elements<C, V, R>(
    settings: &PlayerSettings,
    clock: Option<C>,
    video: Option<V>,
    install: impl FnOnce(C, V) -> Result<R, PlayerError>,
) -> Result<R, PlayerError> {
    let clock =
        clock.ok_or_else(|| PlayerError::MissingElement(settings.clock_element_id.clone()))?;
    let video =
        video.ok_or_else(|| PlayerError::MissingElement(settings.video_element_id.clone()))?;
    install(clock, video)
}
