//! Encoding sinks.
//!
//! Sinks consume rendered frames in timeline order and are driven by
//! [`crate::SpiralSession::render_range`].

/// `ffmpeg`-based sink (MP4 output via system `ffmpeg`).
pub mod ffmpeg;
/// PNG output: single frames and numbered sequences.
pub mod png;
/// Generic frame sink trait and the in-memory sink.
pub mod sink;
