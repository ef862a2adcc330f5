use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::{
    assets::{host::AssetHost, sequence::FrameSequence, store::FrameStore},
    foundation::{
        config::FlipbookConfig,
        error::{FlipbookError, FlipbookResult},
    },
    player::{
        clock::{PlaybackState, TickClock},
        detect::{ResolvedBase, detect_base},
        preload::{PreloadSummary, preload_frames},
    },
    render::surface::{Container, DisplaySurface, render_cover},
};

/// Lifecycle phase of a [`FramePlayer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerPhase {
    /// Surface attached and sized; nothing loaded yet.
    Mounted,
    /// Detection or preload in progress.
    Preloading,
    /// All frames reported; waiting for [`FramePlayer::start`].
    Ready,
    /// Consuming refresh callbacks.
    Playing,
    /// Rendered the last frame. Terminal.
    Finished,
    /// No candidate base served the probe frame. Terminal.
    Failed,
    /// Cancelled or torn down. Terminal.
    Cancelled,
}

impl PlayerPhase {
    /// True for phases the player never leaves.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Failed | Self::Cancelled)
    }
}

/// Result of one refresh callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Less than one interval since the last tick; nothing drawn.
    Waiting,
    /// Tick accepted and `frame` drawn (or skipped if it failed to load).
    Rendered {
        /// 0-based index of the frame.
        frame: usize,
    },
    /// Tick accepted on the last frame; playback is over.
    Finished {
        /// 0-based index of the last frame.
        frame: usize,
    },
    /// The player is not playing (cancelled, finished earlier, or never started).
    Stopped,
}

impl TickOutcome {
    /// Whether the host should schedule another refresh callback.
    pub fn wants_next_frame(self) -> bool {
        matches!(self, Self::Waiting | Self::Rendered { .. })
    }

    /// The frame drawn by this tick, if any.
    pub fn frame(self) -> Option<usize> {
        match self {
            Self::Rendered { frame } | Self::Finished { frame } => Some(frame),
            Self::Waiting | Self::Stopped => None,
        }
    }
}

/// Cloneable flag that stops a player's loop at its next refresh callback.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// Fresh, un-fired handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Plays a numbered frame sequence onto a [`DisplaySurface`].
///
/// Lifecycle: [`mount`](Self::mount), [`load`](Self::load), [`start`](Self::start), then feed
/// every display refresh to [`on_animation_frame`](Self::on_animation_frame) until it stops
/// asking for more. [`teardown`](Self::teardown) releases frames at any point.
pub struct FramePlayer<S: DisplaySurface> {
    config: FlipbookConfig,
    sequence: FrameSequence,
    surface: S,
    frames: FrameStore,
    base: Option<ResolvedBase>,
    state: PlaybackState,
    clock: TickClock,
    phase: PlayerPhase,
    cancel: CancelHandle,
    last_drawn: Option<usize>,
}

impl<S: DisplaySurface> std::fmt::Debug for FramePlayer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FramePlayer")
            .field("phase", &self.phase)
            .field("base", &self.base)
            .field("state", &self.state)
            .field("frames_loaded", &self.frames.loaded())
            .field("surface_size", &self.surface.size())
            .finish()
    }
}

impl<S: DisplaySurface> FramePlayer<S> {
    /// Attach `surface` to `container` and size it to the container.
    ///
    /// Without a container there is nothing to animate on this page: returns `Ok(None)`.
    pub fn mount(
        container: Option<&dyn Container>,
        mut surface: S,
        config: FlipbookConfig,
    ) -> FlipbookResult<Option<Self>> {
        let Some(container) = container else {
            tracing::debug!("no container for flipbook; player not mounted");
            return Ok(None);
        };
        config.validate()?;

        surface.resize(container.client_size())?;
        let sequence = FrameSequence::from_config(&config);
        let clock = TickClock::new(config.fps, 0.0);
        Ok(Some(Self {
            config,
            sequence,
            surface,
            frames: FrameStore::default(),
            base: None,
            state: PlaybackState::default(),
            clock,
            phase: PlayerPhase::Mounted,
            cancel: CancelHandle::new(),
            last_drawn: None,
        }))
    }

    /// Resolve the base path, then preload every frame from it.
    ///
    /// `on_ready` runs exactly once, when the last frame has reported. If no base serves the
    /// probe frame the player moves to [`PlayerPhase::Failed`], no frame requests are issued,
    /// and `on_ready` never runs.
    pub fn load<H, F>(&mut self, host: &H, on_ready: F) -> FlipbookResult<PreloadSummary>
    where
        H: AssetHost + ?Sized,
        F: FnOnce(&PreloadSummary),
    {
        if self.phase != PlayerPhase::Mounted {
            return Err(FlipbookError::playback(format!(
                "load requires a freshly mounted player, phase is {:?}",
                self.phase
            )));
        }
        self.phase = PlayerPhase::Preloading;

        let resolved = match detect_base(host, &self.sequence, &self.config.bases) {
            Ok(resolved) => resolved,
            Err(err) => {
                self.phase = PlayerPhase::Failed;
                return Err(err);
            }
        };

        let (frames, summary) = preload_frames(
            host,
            &self.sequence,
            &resolved.base,
            self.config.parallel_preload,
            on_ready,
        );
        self.frames = frames;
        self.base = Some(resolved);
        self.phase = PlayerPhase::Ready;
        Ok(summary)
    }

    /// Begin playback with `now_ms` as the reference time.
    ///
    /// The first frame is drawn by the first refresh at or after `now_ms + interval`.
    pub fn start(&mut self, now_ms: f64) -> FlipbookResult<()> {
        if self.phase != PlayerPhase::Ready {
            return Err(FlipbookError::playback(format!(
                "start requires a loaded player, phase is {:?}",
                self.phase
            )));
        }
        if !now_ms.is_finite() {
            return Err(FlipbookError::validation(format!(
                "start time must be finite, got {now_ms}"
            )));
        }
        if self.cancel.is_cancelled() {
            self.phase = PlayerPhase::Cancelled;
            return Ok(());
        }

        self.clock.reset(now_ms);
        self.state = PlaybackState {
            current_frame: 0,
            running: true,
        };
        self.phase = PlayerPhase::Playing;
        tracing::info!(
            frames = self.frames.len(),
            fps = self.config.fps.as_f64(),
            "playback started"
        );
        Ok(())
    }

    /// Per-display-refresh callback.
    ///
    /// A frame the surface cannot draw is skipped like a frame that never loaded; the tick
    /// still advances.
    pub fn on_animation_frame(&mut self, now_ms: f64) -> FlipbookResult<TickOutcome> {
        if self.phase != PlayerPhase::Playing {
            return Ok(TickOutcome::Stopped);
        }
        if self.cancel.is_cancelled() {
            self.stop(PlayerPhase::Cancelled);
            return Ok(TickOutcome::Stopped);
        }
        if !self.clock.poll(now_ms) {
            return Ok(TickOutcome::Waiting);
        }

        let frame = self.state.current_frame;
        let drawn = match self.render_frame(frame) {
            Ok(drawn) => drawn,
            Err(FlipbookError::Render(msg)) => {
                tracing::warn!(frame, error = %msg, "failed to draw frame; skipping");
                false
            }
            Err(err) => return Err(err),
        };
        self.last_drawn = drawn.then_some(frame);

        if frame + 1 >= self.frames.len() {
            self.stop(PlayerPhase::Finished);
            tracing::info!(frame, "playback finished");
            return Ok(TickOutcome::Finished { frame });
        }
        self.state.current_frame += 1;
        Ok(TickOutcome::Rendered { frame })
    }

    /// Cover-fit frame `index` onto the surface.
    ///
    /// Returns `false` without touching the surface if that frame did not load.
    pub fn render_frame(&mut self, index: usize) -> FlipbookResult<bool> {
        let Some(frame) = self.frames.get(index) else {
            tracing::debug!(index, "frame not loaded; skipping draw");
            return Ok(false);
        };
        render_cover(&mut self.surface, frame)?;
        Ok(true)
    }

    /// Viewport resize: match the container's size and redraw the current frame.
    pub fn on_viewport_resize(&mut self, container: &dyn Container) -> FlipbookResult<()> {
        self.surface.resize(container.client_size())?;
        if self.frames.loaded() > 0 {
            self.render_frame(self.state.current_frame)?;
        }
        Ok(())
    }

    /// Handle that stops playback at the next refresh callback.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Cancel playback and release every frame. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        self.cancel.cancel();
        self.frames.clear();
        if !self.phase.is_terminal() {
            self.stop(PlayerPhase::Cancelled);
        }
    }

    fn stop(&mut self, phase: PlayerPhase) {
        self.state.running = false;
        self.phase = phase;
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> PlayerPhase {
        self.phase
    }

    /// Playback state snapshot.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Index the next tick will draw (or the last one drawn, once finished).
    pub fn current_frame(&self) -> usize {
        self.state.current_frame
    }

    /// Frame drawn by the most recent accepted tick, if that tick drew anything.
    pub fn last_drawn(&self) -> Option<usize> {
        self.last_drawn
    }

    /// Base path chosen during [`load`](Self::load).
    pub fn base(&self) -> Option<&ResolvedBase> {
        self.base.as_ref()
    }

    /// Loaded frames.
    pub fn frames(&self) -> &FrameStore {
        &self.frames
    }

    /// Tick gate (interval and phase reference).
    pub fn clock(&self) -> &TickClock {
        &self.clock
    }

    /// Configuration the player was mounted with.
    pub fn config(&self) -> &FlipbookConfig {
        &self.config
    }

    /// The drawing surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the drawing surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

#[cfg(test)]
#[path = "../../tests/unit/player/frame_player.rs"]
mod tests;
