/// Where the background video is in its swap cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CycleState {
    /// Playing; the next trigger may start a cycle
    #[default]
    Idle,
    FadingOut,
    /// Resolving, assigning and buffering the next source
    Loading,
    FadingIn,
}

impl CycleState {
    pub fn is_idle(self) -> bool {
        self == CycleState::Idle
    }
}

/// What started a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Remaining playback dropped under the threshold
    TimeUpdate,
    /// The element reported end of media before the time check fired
    Ended,
}

/// Whether the remaining playback is inside the fade-out window.
///
/// Remaining time must be strictly positive, and a NaN duration (metadata not
/// loaded yet) never qualifies.
pub fn fade_out_due(duration: f64, current_time: f64, threshold: f64) -> bool {
    let remaining = duration - current_time;
    remaining <= threshold && remaining > 0.0
}
