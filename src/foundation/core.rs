use crate::foundation::error::{SpiralError, SpiralResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Absolute 0-based frame index in output timeline space.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Half-open frame range `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// Inclusive range start.
    pub start: FrameIndex,
    /// Exclusive range end.
    pub end: FrameIndex,
}

impl FrameRange {
    /// Create a validated range with `start <= end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> SpiralResult<Self> {
        if start.0 > end.0 {
            return Err(SpiralError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of frames contained in the range.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// Return `true` when the range has no frames.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// Return `true` when `f` is inside `[start, end)`.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }
}

/// Rational frames-per-second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator.
    pub num: u32,
    /// Denominator, must be > 0.
    pub den: u32,
}

impl Fps {
    /// Create a validated frame rate.
    pub fn new(num: u32, den: u32) -> SpiralResult<Self> {
        if den == 0 {
            return Err(SpiralError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(SpiralError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert a frame count to seconds.
    ///
    /// Computed as `frames * den / num` so whole-second boundaries come out exact.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * f64::from(self.den) / f64::from(self.num)
    }
}

/// Output raster size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Length of the shorter canvas side.
    pub fn min_side(self) -> u32 {
        self.width.min(self.height)
    }

    /// Canvas center in pixel space.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) * 0.5, f64::from(self.height) * 0.5)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
