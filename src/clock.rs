//! Clock overlay: current local time, refreshed on a fixed interval.

use crate::surface::{Sleeper, TextSurface};
use chrono::{NaiveTime, Timelike};
use std::time::Duration;

/// Render a time as a 12-hour clock with two-digit fields, e.g. `01:05 PM`.
pub fn format_clock(time: NaiveTime) -> String {
    let (is_pm, hour) = time.hour12();
    let meridiem = if is_pm { "PM" } else { "AM" };
    format!("{hour:02}:{:02} {meridiem}", time.minute())
}

pub struct ClockUpdater<D, T, N> {
    display: D,
    sleeper: T,
    now: N,
    interval: Duration,
}

impl<D, T, N> ClockUpdater<D, T, N>
where
    D: TextSurface,
    T: Sleeper,
    N: Fn() -> NaiveTime,
{
    pub fn new(display: D, sleeper: T, now: N, interval: Duration) -> Self {
        Self {
            display,
            sleeper,
            now,
            interval,
        }
    }

    pub fn tick(&self) {
        self.display.set_text(&format_clock((self.now)()));
    }

    /// Render now, then once per interval until the page goes away.
    pub async fn run(self) {
        loop {
            self.tick();
            self.sleeper.sleep(self.interval).await;
        }
    }
}
