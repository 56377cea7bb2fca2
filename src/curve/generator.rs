use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{SpiralError, SpiralResult};
use std::sync::Arc;

/// Parameters of the sampled spiral.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CurveSpec {
    /// Total number of full turns swept by the angle parameter.
    pub turns: f64,
    /// Number of samples `N`, spaced uniformly with both endpoints included.
    pub samples: usize,
    /// Angular frequency of the second phasor relative to the first.
    #[serde(default = "default_ratio")]
    pub ratio: f64,
}

fn default_ratio() -> f64 {
    std::f64::consts::PI
}

impl Default for CurveSpec {
    fn default() -> Self {
        Self {
            turns: 113.0,
            samples: 50_000,
            ratio: default_ratio(),
        }
    }
}

impl CurveSpec {
    /// Check that the parameters describe a non-empty, finite curve.
    pub fn validate(&self) -> SpiralResult<()> {
        if self.samples == 0 {
            return Err(SpiralError::validation("curve samples must be > 0"));
        }
        if !self.turns.is_finite() || self.turns < 0.0 {
            return Err(SpiralError::validation(
                "curve turns must be finite and >= 0",
            ));
        }
        if !self.ratio.is_finite() {
            return Err(SpiralError::validation("curve ratio must be finite"));
        }
        Ok(())
    }

    /// Angle of sample `i` in radians.
    ///
    /// Samples are laid out in degrees first, matching `linspace(0, turns * 360, N)`.
    pub fn theta_at(&self, i: usize) -> f64 {
        if self.samples <= 1 {
            return 0.0;
        }
        let stop_deg = self.turns * 360.0;
        let step = stop_deg / (self.samples - 1) as f64;
        let deg = if i + 1 == self.samples {
            stop_deg
        } else {
            i as f64 * step
        };
        deg.to_radians()
    }
}

/// Evaluate the complex spiral at `theta` and return its real/imaginary parts.
pub fn spiral_point(theta: f64, ratio: f64) -> Point {
    let (s1, c1) = theta.sin_cos();
    let (s2, c2) = (ratio * theta).sin_cos();
    Point::new(c1 + c2, s1 + s2)
}

/// Immutable, shared point sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct Curve {
    spec: CurveSpec,
    points: Arc<[Point]>,
}

impl Curve {
    /// Parameters the curve was generated from.
    pub fn spec(&self) -> &CurveSpec {
        &self.spec
    }

    /// Number of points `N`.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Return `true` when the curve has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All points in sweep order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Point at index `i`, if in range.
    pub fn point(&self, i: usize) -> Option<Point> {
        self.points.get(i).copied()
    }

    /// Axis-aligned bounds of all points.
    pub fn bounds(&self) -> Rect {
        let mut it = self.points.iter();
        let Some(first) = it.next() else {
            return Rect::ZERO;
        };
        let mut r = Rect::from_points(*first, *first);
        for p in it {
            r = r.union_pt(*p);
        }
        r
    }
}

/// Generate the point sequence described by `spec`.
pub fn generate_curve(spec: &CurveSpec) -> SpiralResult<Curve> {
    spec.validate()?;
    let points: Arc<[Point]> = (0..spec.samples)
        .map(|i| spiral_point(spec.theta_at(i), spec.ratio))
        .collect();
    tracing::debug!(samples = spec.samples, turns = spec.turns, "generated curve");
    Ok(Curve {
        spec: *spec,
        points,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/curve/generator.rs"]
mod tests;
