use crate::foundation::core::Fps;

/// Fixed-rate tick gate driven by display-refresh timestamps.
///
/// A refresh is accepted as a tick when at least one interval has elapsed since the last
/// accepted tick (`elapsed >= interval`). On acceptance the reference time is moved to
/// `now - (elapsed % interval)`, so scheduling jitter does not accumulate as rate drift.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickClock {
    interval_ms: f64,
    last_tick_ms: f64,
}

impl TickClock {
    /// Clock for `fps`, with its reference time at `start_ms`.
    pub fn new(fps: Fps, start_ms: f64) -> Self {
        Self {
            interval_ms: fps.frame_interval_ms(),
            last_tick_ms: start_ms,
        }
    }

    /// Minimum interval between accepted ticks.
    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Reference time of the last accepted tick (phase corrected).
    pub fn last_tick_ms(&self) -> f64 {
        self.last_tick_ms
    }

    /// Move the reference time without accepting a tick.
    pub fn reset(&mut self, now_ms: f64) {
        self.last_tick_ms = now_ms;
    }

    /// Offer a refresh timestamp. Returns `true` if it is accepted as a tick.
    ///
    /// Non-finite timestamps are never accepted and leave the reference time unchanged.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        if !now_ms.is_finite() {
            return false;
        }
        let elapsed = now_ms - self.last_tick_ms;
        if !(elapsed >= self.interval_ms) {
            return false;
        }
        self.last_tick_ms = now_ms - (elapsed % self.interval_ms);
        true
    }
}

/// Mutable state of the playback loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackState {
    /// 0-based index of the frame the next tick renders.
    pub current_frame: usize,
    /// Whether the loop still wants refresh callbacks.
    pub running: bool,
}

#[cfg(test)]
#[path = "../../tests/unit/player/clock.rs"]
mod tests;
