//! Frame rasterization.
//!
//! A frame is first described as a [`scene::FrameScene`] in pixel space, then rasterized by a
//! [`backend::RenderBackend`] into premultiplied RGBA8.

/// Backend trait, frame buffer type, and backend construction.
pub mod backend;
/// CPU backend powered by `vello_cpu`.
pub mod cpu;
/// Pixel-space scene description for one frame.
pub mod scene;
