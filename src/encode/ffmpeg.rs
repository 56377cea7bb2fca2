use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{SpiralError, SpiralResult};
use crate::foundation::math::{mul_div255_u16, premul_rgba8};
use crate::render::backend::FrameRGBA;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

/// Options for [`FfmpegSink`] MP4 output.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output MP4 file path.
    pub out_path: PathBuf,
    /// Overwrite output file if it already exists.
    pub overwrite: bool,
    /// Background color used to flatten alpha (RGBA8, straight alpha).
    pub bg_rgba: [u8; 4],
}

impl FfmpegSinkOpts {
    /// Create options for outputting an MP4 to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            bg_rgba: [0, 0, 0, 255],
        }
    }

    /// Set whether an existing output file may be replaced.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Set the background used when flattening alpha.
    pub fn with_bg_rgba(mut self, bg_rgba: [u8; 4]) -> Self {
        self.bg_rgba = bg_rgba;
        self
    }
}

/// Sink that spawns the system `ffmpeg` and streams raw frames to stdin.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,

    scratch: Vec<u8>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    /// Create a new sink that streams into `ffmpeg`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            scratch: Vec::new(),
            cfg: None,
            last_idx: None,
        }
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> SpiralResult<()> {
        validate_sink_config(&cfg)?;

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(SpiralError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(SpiralError::encode(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        if self.opts.overwrite {
            cmd.arg("-y");
        } else {
            cmd.arg("-n");
        }

        // Input: raw RGBA8 frames, already flattened to opaque in push_frame.
        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
        ]);
        push_input_fps(&mut cmd, cfg.fps);
        cmd.args(["-i", "pipe:0"]);
        // Output: h264 + yuv420p for broad compatibility.
        cmd.args([
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ]);
        cmd.arg(&self.opts.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            SpiralError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| SpiralError::encode("failed to open ffmpeg stdin (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| SpiralError::encode("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        tracing::debug!(
            out = %self.opts.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            "spawned ffmpeg"
        );

        self.scratch = vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4];
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> SpiralResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| SpiralError::encode("ffmpeg sink not started"))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(SpiralError::encode(
                "ffmpeg sink received out-of-order frame index",
            ));
        }
        self.last_idx = Some(idx);

        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(SpiralError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        if frame.data.len() != self.scratch.len() {
            return Err(SpiralError::validation(
                "frame.data size mismatch with width*height*4",
            ));
        }

        flatten_to_opaque_rgba8(
            &mut self.scratch,
            &frame.data,
            frame.premultiplied,
            self.opts.bg_rgba,
        )?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(SpiralError::encode("ffmpeg sink is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(&self.scratch).map_err(|e| {
            SpiralError::encode(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        Ok(())
    }

    fn end(&mut self) -> SpiralResult<()> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| SpiralError::encode("ffmpeg sink not started"))?;

        let status = child.wait().map_err(|e| {
            SpiralError::encode(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| SpiralError::encode("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| SpiralError::encode(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(SpiralError::encode(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }

        self.cfg = None;
        Ok(())
    }
}

impl FfmpegSink {
    // Tear down an encoder that never reached `end`: close stdin, kill and reap the child.
    fn abort(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
            tracing::debug!(out = %self.opts.out_path.display(), "aborted ffmpeg");
        }
        if let Some(handle) = self.stderr_drain.take() {
            let _ = handle.join();
        }
        self.cfg = None;
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        self.abort();
    }
}

fn validate_sink_config(cfg: &SinkConfig) -> SpiralResult<()> {
    if cfg.fps.num == 0 || cfg.fps.den == 0 {
        return Err(SpiralError::validation("fps must be non-zero"));
    }
    if cfg.width == 0 || cfg.height == 0 {
        return Err(SpiralError::validation(
            "ffmpeg sink width/height must be non-zero",
        ));
    }
    if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
        return Err(SpiralError::validation(
            "ffmpeg sink width/height must be even (required for yuv420p mp4 output)",
        ));
    }
    Ok(())
}

fn push_input_fps(cmd: &mut Command, fps: Fps) {
    // For rawvideo input, `-r` goes before `-i`. Rational rates are passed as `num/den`.
    cmd.args(["-r", &format!("{}/{}", fps.num, fps.den)]);
}

fn flatten_to_opaque_rgba8(
    dst: &mut [u8],
    src: &[u8],
    src_is_premul: bool,
    bg_rgba: [u8; 4],
) -> SpiralResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(SpiralError::validation(
            "flatten_to_opaque_rgba8 expects equal-length rgba8 buffers",
        ));
    }

    let bg_r = bg_rgba[0] as u16;
    let bg_g = bg_rgba[1] as u16;
    let bg_b = bg_rgba[2] as u16;

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = s[3] as u16;
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }

        let inv = 255u16 - a;
        let [pr, pg, pb, _] = if src_is_premul {
            [s[0], s[1], s[2], s[3]]
        } else {
            premul_rgba8([s[0], s[1], s[2], s[3]])
        };
        let r = pr as u16 + mul_div255_u16(bg_r, inv);
        let g = pg as u16 + mul_div255_u16(bg_g, inv);
        let b = pb as u16 + mul_div255_u16(bg_b, inv);

        d[0] = r.min(255) as u8;
        d[1] = g.min(255) as u8;
        d[2] = b.min(255) as u8;
        d[3] = 255;
    }

    Ok(())
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> SpiralResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
