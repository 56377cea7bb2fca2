use crate::curve::generator::CurveSpec;
use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange};
use crate::foundation::error::{SpiralError, SpiralResult};
use crate::playback::cursor::{Clock, RevealMode};
use crate::playback::schedule::{PhaseSchedule, PhaseSpec};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Drawing colors (straight-alpha RGBA8) and stroke sizes in pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Style {
    /// Frame background.
    pub background: [u8; 4],
    /// Color of the drawn curve.
    pub line: [u8; 4],
    /// Curve stroke width.
    pub line_width: f64,
    /// Color of the tip marker.
    pub marker: [u8; 4],
    /// Tip marker radius. Zero hides the marker.
    pub marker_radius: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            background: [0, 0, 0, 255],
            line: [204, 204, 204, 255],
            line_width: 1.0,
            marker: [255, 255, 255, 255],
            marker_radius: 3.0,
        }
    }
}

impl Style {
    fn validate(&self) -> SpiralResult<()> {
        if self.background[3] != 255 {
            return Err(SpiralError::validation(
                "style background must be opaque (alpha 255)",
            ));
        }
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            return Err(SpiralError::validation(
                "style line_width must be finite and > 0",
            ));
        }
        if !self.marker_radius.is_finite() || self.marker_radius < 0.0 {
            return Err(SpiralError::validation(
                "style marker_radius must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Full description of one spiral animation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnimationConfig {
    /// Output raster size.
    pub canvas: Canvas,
    /// Output frame rate.
    pub fps: Fps,
    /// Output length in frames.
    pub duration: u64,
    /// Unit of phase durations and speeds.
    #[serde(default)]
    pub clock: Clock,
    /// How revealed points advance over time.
    #[serde(default)]
    pub reveal: RevealMode,
    /// Curve parameters.
    #[serde(default)]
    pub curve: CurveSpec,
    /// Camera phases in cycle order.
    pub phases: Vec<PhaseSpec>,
    /// Drawing style.
    #[serde(default)]
    pub style: Style,
}

impl AnimationConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> SpiralResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| SpiralError::serde(format!("parse animation config JSON: {e}")))
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SpiralResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SpiralError::validation(format!("open animation config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> SpiralResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SpiralError::serde(format!("serialize animation config: {e}")))
    }

    /// Validate every part of the configuration.
    pub fn validate(&self) -> SpiralResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(SpiralError::validation("canvas width/height must be > 0"));
        }
        if self.canvas.width > u32::from(u16::MAX) || self.canvas.height > u32::from(u16::MAX) {
            return Err(SpiralError::validation(
                "canvas width/height must fit in 16 bits",
            ));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        if self.duration == 0 {
            return Err(SpiralError::validation("duration must be > 0 frames"));
        }
        self.curve.validate()?;
        self.schedule()?;
        self.style.validate()
    }

    /// Build the validated phase schedule.
    pub fn schedule(&self) -> SpiralResult<PhaseSchedule> {
        PhaseSchedule::new(self.phases.clone())
    }

    /// Range covering the whole animation.
    pub fn full_range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.duration),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
