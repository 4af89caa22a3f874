use serde::{Deserialize, Serialize};
use std::time::Duration;

#[cfg(target_arch = "wasm32")]
use gloo_storage::{errors::StorageError, LocalStorage, Storage};

#[cfg(target_arch = "wasm32")]
const SETTINGS_KEY: &str = "tvclock.settings";

/// Player settings, overridable from local storage.
///
/// Every field falls back to its default when absent, so a stored object only
/// needs the keys it wants to change, e.g. `{"fade_out_ms": 4000}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Path (or absolute URL) of the next-video endpoint
    pub endpoint: String,
    pub video_element_id: String,
    pub clock_element_id: String,
    /// Source for the first video; resolved from the endpoint when unset
    pub initial_video: Option<String>,
    /// How long the fade-out runs before the source is swapped
    pub fade_out_ms: u32,
    /// Pause between playback starting and the fade-in
    pub settle_ms: u32,
    /// Remaining playback (seconds) at which the fade-out begins
    pub trigger_threshold_secs: f64,
    pub clock_interval_ms: u32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            endpoint: "/next-video".to_string(),
            video_element_id: "background-video".to_string(),
            clock_element_id: "current-time".to_string(),
            initial_video: None,
            fade_out_ms: 1000,
            settle_ms: 100,
            trigger_threshold_secs: 1.0,
            clock_interval_ms: 1000,
        }
    }
}

impl PlayerSettings {
    /// Replace values that would stall or break the cycle with their defaults.
    pub fn normalized(mut self) -> Self {
        let defaults = Self::default();
        if self.endpoint.trim().is_empty() {
            self.endpoint = defaults.endpoint;
        }
        if self.video_element_id.trim().is_empty() {
            self.video_element_id = defaults.video_element_id;
        }
        if self.clock_element_id.trim().is_empty() {
            self.clock_element_id = defaults.clock_element_id;
        }
        if self
            .initial_video
            .as_ref()
            .is_some_and(|path| path.trim().is_empty())
        {
            self.initial_video = None;
        }
        if !self.trigger_threshold_secs.is_finite() || self.trigger_threshold_secs <= 0.0 {
            self.trigger_threshold_secs = defaults.trigger_threshold_secs;
        }
        if self.clock_interval_ms == 0 {
            self.clock_interval_ms = defaults.clock_interval_ms;
        }
        self
    }

    pub fn cycle_timings(&self) -> CycleTimings {
        CycleTimings {
            fade_out: Duration::from_millis(u64::from(self.fade_out_ms)),
            settle: Duration::from_millis(u64::from(self.settle_ms)),
            trigger_threshold: self.trigger_threshold_secs,
        }
    }

    pub fn clock_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.clock_interval_ms))
    }
}

/// Delays and thresholds the cycle controller runs with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleTimings {
    pub fade_out: Duration,
    pub settle: Duration,
    /// Seconds
    pub trigger_threshold: f64,
}

impl Default for CycleTimings {
    fn default() -> Self {
        PlayerSettings::default().cycle_timings()
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_settings() -> PlayerSettings {
    PlayerSettings::default()
}

#[cfg(target_arch = "wasm32")]
pub fn load_settings() -> PlayerSettings {
    match LocalStorage::get::<PlayerSettings>(SETTINGS_KEY) {
        Ok(settings) => settings.normalized(),
        Err(StorageError::KeyNotFound(_)) => PlayerSettings::default(),
        Err(err) => {
            tracing::warn!(%err, "ignoring unreadable stored settings");
            PlayerSettings::default()
        }
    }
}
