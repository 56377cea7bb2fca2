use crate::curve::generator::Curve;
use crate::foundation::core::{Affine, Canvas, Point, Rect, Vec2};
use crate::playback::schedule::PhaseSpec;

/// Visible square region of curve space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Center in curve units.
    pub center: Point,
    /// Half of the side length in curve units.
    pub half_width: f64,
}

impl Viewport {
    /// Viewport centered at the origin.
    pub fn centered(half_width: f64) -> Self {
        Self {
            center: Point::ORIGIN,
            half_width,
        }
    }

    /// Horizontal extent `(min, max)`.
    pub fn x_range(&self) -> (f64, f64) {
        (
            self.center.x - self.half_width,
            self.center.x + self.half_width,
        )
    }

    /// Vertical extent `(min, max)`.
    pub fn y_range(&self) -> (f64, f64) {
        (
            self.center.y - self.half_width,
            self.center.y + self.half_width,
        )
    }

    /// Region as a rectangle in curve units.
    pub fn rect(&self) -> Rect {
        let (x0, x1) = self.x_range();
        let (y0, y1) = self.y_range();
        Rect::new(x0, y0, x1, y1)
    }

    /// Return `true` when `p` lies inside the viewport (edges included).
    pub fn contains(&self, p: Point) -> bool {
        let (x0, x1) = self.x_range();
        let (y0, y1) = self.y_range();
        (x0..=x1).contains(&p.x) && (y0..=y1).contains(&p.y)
    }

    /// Map curve space into pixel space.
    ///
    /// Aspect is equal on both axes, the y axis points up, and the square is fitted into the
    /// shorter canvas side around the canvas center. On a non-square canvas the longer axis
    /// shows more of the curve than `half_width`.
    pub fn to_canvas_affine(&self, canvas: Canvas) -> Affine {
        let scale = f64::from(canvas.min_side()) / (2.0 * self.half_width);
        Affine::translate(canvas.center().to_vec2())
            * Affine::scale_non_uniform(scale, -scale)
            * Affine::translate(-self.center.to_vec2())
    }

    /// Viewport region actually visible on `canvas`, in curve units.
    pub fn visible_rect(&self, canvas: Canvas) -> Rect {
        let scale = f64::from(canvas.min_side()) / (2.0 * self.half_width);
        let half = Vec2::new(
            f64::from(canvas.width) * 0.5 / scale,
            f64::from(canvas.height) * 0.5 / scale,
        );
        Rect::from_points(self.center - half, self.center + half)
    }
}

/// Pick the viewport for a phase given how many points are revealed.
///
/// Wide phases show a fixed view around the origin. Following phases center on the most
/// recently revealed point, or the origin when nothing has been revealed yet. The half-width is
/// always the phase's configured value, with no easing across phase changes.
pub fn select_viewport(phase: &PhaseSpec, curve: &Curve, revealed: usize) -> Viewport {
    if !phase.kind.follows_tip() {
        return Viewport::centered(phase.half_width);
    }

    let center = revealed
        .checked_sub(1)
        .and_then(|tip| curve.point(tip))
        .unwrap_or(Point::ORIGIN);
    Viewport {
        center,
        half_width: phase.half_width,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/camera/viewport.rs"]
mod tests;
