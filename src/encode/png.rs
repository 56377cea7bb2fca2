use crate::encode::ffmpeg::ensure_parent_dir;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{SpiralError, SpiralResult};
use crate::render::backend::FrameRGBA;
use anyhow::Context as _;
use std::path::{Path, PathBuf};

/// Write a frame as a PNG, un-premultiplying alpha if needed.
pub fn write_png(frame: &FrameRGBA, path: &Path) -> SpiralResult<()> {
    ensure_parent_dir(path)?;
    let straight;
    let bytes = if frame.premultiplied {
        straight = unpremultiply(&frame.data);
        &straight
    } else {
        &frame.data
    };
    image::save_buffer_with_format(
        path,
        bytes,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn unpremultiply(src: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len());
    for px in src.chunks_exact(4) {
        let a = px[3];
        match a {
            0 => out.extend_from_slice(&[0, 0, 0, 0]),
            255 => out.extend_from_slice(px),
            _ => {
                let un = |c: u8| {
                    let v = (u32::from(c) * 255 + u32::from(a) / 2) / u32::from(a);
                    v.min(255) as u8
                };
                out.extend_from_slice(&[un(px[0]), un(px[1]), un(px[2]), a]);
            }
        }
    }
    out
}

/// Sink that writes each frame to `<dir>/<prefix><index>.png` with zero-padded indices.
pub struct PngSequenceSink {
    dir: PathBuf,
    prefix: String,
    digits: usize,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
    written: u64,
}

impl PngSequenceSink {
    /// Create a sink writing into `dir` with the default `frame_` prefix and 6 digits.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: "frame_".to_owned(),
            digits: 6,
            cfg: None,
            last_idx: None,
            written: 0,
        }
    }

    /// Override the file name prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Path the frame `idx` is written to.
    pub fn path_for(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!(
            "{}{:0width$}.png",
            self.prefix,
            idx.0,
            width = self.digits
        ))
    }

    /// Number of frames written since the last `begin`.
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> SpiralResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(SpiralError::validation(
                "png sink width/height must be non-zero",
            ));
        }
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create frame directory '{}'", self.dir.display()))?;
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> SpiralResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| SpiralError::encode("png sink not started"))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(SpiralError::encode(
                "png sink received out-of-order frame index",
            ));
        }
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(SpiralError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        self.last_idx = Some(idx);
        write_png(frame, &self.path_for(idx))?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> SpiralResult<()> {
        if self.cfg.take().is_none() {
            return Err(SpiralError::encode("png sink not started"));
        }
        tracing::debug!(frames = self.written, dir = %self.dir.display(), "png sequence finished");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
