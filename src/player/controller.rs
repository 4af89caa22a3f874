use crate::api::VideoSource;
use crate::player::state::{fade_out_due, CycleState, Trigger};
use crate::settings::CycleTimings;
use crate::surface::{MediaSurface, Sleeper};
use std::cell::Cell;
use tracing::{debug, error, info, warn};

/// Drives one video element through `Idle → FadingOut → Loading → FadingIn`.
///
/// All entry points take `&self`; the state lives in a `Cell` and is checked
/// and set within a single poll, so on the single-threaded browser executor a
/// second trigger can never observe `Idle` while a cycle is in flight.
pub struct CycleController<M, S, T> {
    media: M,
    source: S,
    sleeper: T,
    timings: CycleTimings,
    state: Cell<CycleState>,
}

impl<M, S, T> CycleController<M, S, T>
where
    M: MediaSurface,
    S: VideoSource,
    T: Sleeper,
{
    pub fn new(media: M, source: S, sleeper: T, timings: CycleTimings) -> Self {
        Self {
            media,
            source,
            sleeper,
            timings,
            state: Cell::new(CycleState::Idle),
        }
    }

    pub fn state(&self) -> CycleState {
        self.state.get()
    }

    #[cfg(test)]
    pub fn media(&self) -> &M {
        &self.media
    }

    /// First playback after page load.
    ///
    /// Starts invisible, fetches a first source if the element has none or its
    /// source already failed, waits for readiness when needed, then fades in
    /// whether or not autoplay was allowed.
    pub async fn start(&self) {
        if !self.state().is_idle() {
            return;
        }
        self.state.set(CycleState::Loading);
        self.media.set_opacity(0.0);

        if self.media.src().is_empty() {
            let path = self.next_video_path().await;
            if path.is_empty() {
                warn!("no video available, showing the clock only");
                self.finish();
                return;
            }
            info!(%path, "starting with resolved video");
            self.media.set_src(&path);
            self.media.load();
        } else if self.media.has_failed() {
            // The error event fired before we were listening; reload so a
            // fresh readiness or error signal follows.
            error!(src = %self.media.src(), "first video failed before playback started");
            let path = self.next_video_path().await;
            self.media.set_src(&path);
            self.media.load();
        }

        if !self.media.is_ready() {
            if let Err(err) = self.media.wait_ready().await {
                error!(%err, "first video failed to load");
            }
        }

        self.state.set(CycleState::FadingIn);
        match self.media.play().await {
            Ok(()) => self.sleeper.sleep(self.timings.settle).await,
            Err(err) => warn!(%err, "autoplay was prevented"),
        }
        self.finish();
    }

    /// Position update from the element. Returns whether a cycle ran.
    pub async fn on_time_update(&self) -> bool {
        if !self.state().is_idle() {
            return false;
        }
        let due = fade_out_due(
            self.media.duration(),
            self.media.current_time(),
            self.timings.trigger_threshold,
        );
        if !due {
            return false;
        }
        self.run_cycle(Trigger::TimeUpdate).await;
        true
    }

    /// End of media. Only acts when the time-based trigger did not already
    /// start a cycle.
    pub async fn on_ended(&self) -> bool {
        if !self.state().is_idle() {
            return false;
        }
        self.run_cycle(Trigger::Ended).await;
        true
    }

    /// Path of the next video, or the current source when the server can't
    /// provide one, so a failed request degrades to a replay.
    pub async fn next_video_path(&self) -> String {
        match self.source.next_video().await {
            Ok(path) => path,
            Err(err) => {
                let current = self.media.src();
                error!(%err, %current, "error fetching next video, replaying current");
                current
            }
        }
    }

    async fn run_cycle(&self, trigger: Trigger) {
        self.state.set(CycleState::FadingOut);
        debug!(?trigger, "video cycle started");
        self.media.set_opacity(0.0);
        self.sleeper.sleep(self.timings.fade_out).await;

        self.state.set(CycleState::Loading);
        let path = self.next_video_path().await;
        info!(%path, "switching background video");
        self.media.set_src(&path);
        self.media.load();
        if let Err(err) = self.media.wait_ready().await {
            error!(%err, %path, "next video failed to load");
        }

        self.state.set(CycleState::FadingIn);
        match self.media.play().await {
            Ok(()) => self.sleeper.sleep(self.timings.settle).await,
            Err(err) => error!(%err, "error playing next video"),
        }
        self.finish();
    }

    /// Visible and ready for the next trigger, however the cycle went.
    fn finish(&self) {
        self.media.set_opacity(1.0);
        self.state.set(CycleState::Idle);
    }
}
