//! Flipbook plays a numbered still-image sequence as a decorative background animation.
//!
//! # Pipeline overview
//!
//! 1. **Mount**: size a [`DisplaySurface`] to its [`Container`] ([`FramePlayer::mount`]).
//! 2. **Detect**: probe candidate base paths for frame 1 and keep the first that serves it
//!    ([`detect_base`]).
//! 3. **Preload**: request every frame from that base, counting failures as completions
//!    ([`preload_frames`], [`Preloader`]).
//! 4. **Play**: feed display-refresh timestamps to [`FramePlayer::on_animation_frame`]; a
//!    [`TickClock`] gates them to the configured frame rate and each accepted tick draws one
//!    frame with a [`cover_fit`], stopping on the last frame.
//!
//! The page effects shipped alongside the flipbook, [`CursorDecorator`] and
//! [`ScrollRevealer`], are independent of the player.
//!
//! Constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single pass**: playback never loops or reverses.
//! - **Premultiplied RGBA8**: decoded frames and the CPU surface store premultiplied pixels.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod effects;
mod foundation;
mod player;
mod render;

pub use assets::decode::{DecodedFrame, decode_image};
pub use assets::host::{AssetHost, FsAssetHost, MemoryAssetHost, normalize_rel_path};
pub use assets::sequence::FrameSequence;
pub use assets::store::FrameStore;
pub use effects::cursor::{CursorDecorator, CursorPlacement, DEFAULT_INTERACTIVE, HOVER_CLASS};
pub use effects::reveal::{
    DEFAULT_TARGETS, IntersectionEntry, RevealOptions, ScrollRevealer, VISIBLE_CLASS,
};
pub use effects::selector::{Element, ElementId, Selector, matches_any, parse_selector_list};
pub use foundation::config::FlipbookConfig;
pub use foundation::core::{Affine, Fps, Point, Rect, Size, SurfaceSize, Vec2};
pub use foundation::error::{FlipbookError, FlipbookResult};
pub use player::clock::{PlaybackState, TickClock};
pub use player::detect::{ResolvedBase, detect_base};
pub use player::driver::{PlaybackStats, RefreshDriver};
pub use player::frame_player::{CancelHandle, FramePlayer, PlayerPhase, TickOutcome};
pub use player::preload::{PreloadSummary, Preloader, preload_frames};
pub use render::cpu::PixmapSurface;
pub use render::fit::{CoverFit, cover_fit};
pub use render::surface::{Container, DisplaySurface, render_cover};
