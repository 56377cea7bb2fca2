//! spiralcam draws the complex-exponential spiral `z(θ) = e^(iθ) + e^(i·π·θ)` point by point
//! and follows its tip with a camera that cycles through timed zoom phases.
//!
//! # Pipeline overview
//!
//! 1. **Generate**: `CurveSpec -> Curve` (eager, immutable point sequence)
//! 2. **Schedule**: `FrameIndex -> PlaybackCursor` (active phase and revealed-point count)
//! 3. **Frame**: `PlaybackCursor -> Viewport -> FrameScene` (pixel-space trail and tip marker)
//! 4. **Render**: `FrameScene -> FrameRGBA` (CPU backend)
//! 5. **Encode** (optional): stream frames to a [`FrameSink`] (ffmpeg MP4, PNG sequence)
//!
//! Every frame is a pure function of its index, so ranges can be rendered in parallel and
//! still reach the sink in order.
//!
//! # Getting started
//!
//! ```no_run
//! use spiralcam::{FfmpegSink, FfmpegSinkOpts, Preset, SpiralSession, SpiralSessionOpts};
//!
//! let config = Preset::Classic.config();
//! let range = config.full_range();
//! let mut session = SpiralSession::new(config, SpiralSessionOpts::default())?;
//! let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("out/classic.mp4"));
//! session.render_range(range, &mut sink)?;
//! # Ok::<(), spiralcam::SpiralError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Camera viewport selection.
pub mod camera;
/// Animation configuration and presets.
pub mod config;
/// Spiral curve sampling.
pub mod curve;
/// Frame sinks.
pub mod encode;
/// Phase scheduling and the playback cursor.
pub mod playback;
/// Scene construction and rasterization.
pub mod render;
/// Session-oriented rendering API.
pub mod session;

pub use crate::camera::viewport::{Viewport, select_viewport};
pub use crate::config::model::{AnimationConfig, Style};
pub use crate::config::presets::Preset;
pub use crate::curve::generator::{Curve, CurveSpec, generate_curve, spiral_point};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, ensure_parent_dir, is_ffmpeg_on_path};
pub use crate::encode::png::{PngSequenceSink, write_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::foundation::core::{
    Affine, BezPath, Canvas, Fps, FrameIndex, FrameRange, Point, Rect, Vec2,
};
pub use crate::foundation::error::{SpiralError, SpiralResult};
pub use crate::playback::cursor::{Clock, PlaybackCursor, RevealMode};
pub use crate::playback::schedule::{PhaseKind, PhaseSchedule, PhaseSlot, PhaseSpec};
pub use crate::render::backend::{BackendKind, FrameRGBA, RenderBackend, create_backend};
pub use crate::render::cpu::CpuBackend;
pub use crate::render::scene::{FrameScene, Marker, SceneOpts, build_scene};
pub use crate::session::spiral_session::{
    FrameState, RenderStats, RenderThreading, SpiralSession, SpiralSessionOpts,
};
