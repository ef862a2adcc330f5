use crate::{
    foundation::error::{FlipbookError, FlipbookResult},
    player::frame_player::{FramePlayer, PlayerPhase, TickOutcome},
    render::surface::DisplaySurface,
};

/// Counters from one [`RefreshDriver::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackStats {
    /// Refresh callbacks delivered.
    pub refreshes: u64,
    /// Refreshes accepted as ticks.
    pub ticks: u64,
    /// Refreshes that only waited.
    pub waits: u64,
    /// Last frame index drawn, if any.
    pub last_frame: Option<usize>,
    /// Outcome of the final refresh delivered.
    pub outcome: TickOutcome,
}

/// Headless display-refresh source on a virtual clock.
///
/// Delivers timestamps `start + k * period` for `k = 1, 2, ...` until the player stops asking
/// for frames or `max_refreshes` is reached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RefreshDriver {
    period_ms: f64,
    max_refreshes: Option<u64>,
}

impl RefreshDriver {
    /// Driver refreshing at `refresh_hz`.
    pub fn new(refresh_hz: f64) -> FlipbookResult<Self> {
        if !(refresh_hz.is_finite() && refresh_hz > 0.0) {
            return Err(FlipbookError::validation(format!(
                "refresh rate must be a positive number, got {refresh_hz}"
            )));
        }
        Ok(Self {
            period_ms: 1000.0 / refresh_hz,
            max_refreshes: None,
        })
    }

    /// Stop after `max` refreshes even if the player is still playing.
    pub fn with_max_refreshes(mut self, max: u64) -> Self {
        self.max_refreshes = Some(max);
        self
    }

    /// Time between refreshes.
    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    /// Start `player` at `start_ms` if it is ready, then deliver refreshes.
    ///
    /// `on_draw` sees every tick that drew a frame, with the surface as drawn.
    pub fn run<S, O>(
        &self,
        player: &mut FramePlayer<S>,
        start_ms: f64,
        mut on_draw: O,
    ) -> FlipbookResult<PlaybackStats>
    where
        S: DisplaySurface,
        O: FnMut(usize, &S) -> FlipbookResult<()>,
    {
        if player.phase() == PlayerPhase::Ready {
            player.start(start_ms)?;
        }

        let mut stats = PlaybackStats {
            refreshes: 0,
            ticks: 0,
            waits: 0,
            last_frame: None,
            outcome: TickOutcome::Stopped,
        };

        loop {
            if self.max_refreshes.is_some_and(|max| stats.refreshes >= max) {
                break;
            }
            stats.refreshes += 1;
            let now = start_ms + stats.refreshes as f64 * self.period_ms;
            let outcome = player.on_animation_frame(now)?;
            stats.outcome = outcome;

            match outcome {
                TickOutcome::Waiting => stats.waits += 1,
                TickOutcome::Rendered { frame } | TickOutcome::Finished { frame } => {
                    stats.ticks += 1;
                    if player.last_drawn() == Some(frame) {
                        stats.last_frame = Some(frame);
                        on_draw(frame, player.surface())?;
                    }
                }
                TickOutcome::Stopped => {}
            }

            if !outcome.wants_next_frame() {
                break;
            }
        }

        tracing::debug!(
            refreshes = stats.refreshes,
            ticks = stats.ticks,
            waits = stats.waits,
            "refresh driver stopped"
        );
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/player/driver.rs"]
mod tests;
