use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{SpiralError, SpiralResult};
use crate::render::backend::FrameRGBA;

/// Configuration provided to a [`FrameSink`] at the start of a range render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
}

/// Sink contract for consuming rendered frames in timeline order.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order within the
/// requested render range.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> SpiralResult<()>;
    /// Push one frame in strictly increasing timeline order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> SpiralResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> SpiralResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    finished: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// Return `true` once `end` has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> SpiralResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> SpiralResult<()> {
        if let Some((last, _)) = self.frames.last()
            && idx.0 <= last.0
        {
            return Err(SpiralError::encode(
                "in-memory sink received out-of-order frame index",
            ));
        }
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> SpiralResult<()> {
        self.finished = true;
        Ok(())
    }
}
