use crate::camera::viewport::Viewport;
use crate::config::model::Style;
use crate::curve::generator::Curve;
use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect};

/// Tuning for scene construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneOpts {
    /// Drop trail segments whose bounds miss the visible area.
    pub cull_offscreen: bool,
    /// Skip points closer than this (in pixels) to the previously emitted point.
    pub min_segment_px: f64,
}

impl Default for SceneOpts {
    fn default() -> Self {
        Self {
            cull_offscreen: true,
            min_segment_px: 0.25,
        }
    }
}

/// Filled circle drawn at the tip of the trail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    /// Center in pixels.
    pub center: Point,
    /// Radius in pixels.
    pub radius: f64,
    /// Straight-alpha RGBA8 color.
    pub color: [u8; 4],
}

/// Everything needed to rasterize one frame, in pixel space.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameScene {
    /// Output size.
    pub canvas: Canvas,
    /// Straight-alpha RGBA8 background.
    pub background: [u8; 4],
    /// Revealed part of the curve as a polyline.
    pub trail: BezPath,
    /// Straight-alpha RGBA8 trail color.
    pub line: [u8; 4],
    /// Trail stroke width in pixels.
    pub line_width: f64,
    /// Tip marker, when at least one point is revealed and the marker is enabled.
    pub marker: Option<Marker>,
}

/// Build the scene for the first `revealed` points of `curve` seen through `viewport`.
pub fn build_scene(
    curve: &Curve,
    revealed: usize,
    viewport: &Viewport,
    canvas: Canvas,
    style: &Style,
    opts: SceneOpts,
) -> FrameScene {
    let to_px = viewport.to_canvas_affine(canvas);
    let revealed = revealed.min(curve.len());
    let visible = &curve.points()[..revealed];

    // Pad by the stroke so segments just outside still contribute their edge pixels.
    let pad = style.line_width.max(style.marker_radius) + 1.0;
    let bounds = Rect::new(
        -pad,
        -pad,
        f64::from(canvas.width) + pad,
        f64::from(canvas.height) + pad,
    );
    let trail = polyline(visible, to_px, bounds, opts);

    let marker = match visible.last() {
        Some(&tip) if style.marker_radius > 0.0 => Some(Marker {
            center: to_px * tip,
            radius: style.marker_radius,
            color: style.marker,
        }),
        _ => None,
    };

    FrameScene {
        canvas,
        background: style.background,
        trail,
        line: style.line,
        line_width: style.line_width,
        marker,
    }
}

fn polyline(points: &[Point], to_px: Affine, bounds: Rect, opts: SceneOpts) -> BezPath {
    let mut path = BezPath::new();
    let Some((&first, rest)) = points.split_first() else {
        return path;
    };

    let min_step_sq = opts.min_segment_px * opts.min_segment_px;
    let mut prev = to_px * first;
    // Whether the pen currently sits at `prev` (i.e. the last element emitted ends there).
    let mut pen_down = false;
    let last_i = rest.len().saturating_sub(1);

    for (i, &p) in rest.iter().enumerate() {
        let cur = to_px * p;
        if i != last_i && (cur - prev).hypot2() < min_step_sq {
            continue;
        }

        let keep = !opts.cull_offscreen || overlaps(Rect::from_points(prev, cur), bounds);
        if keep {
            if !pen_down {
                path.move_to(prev);
                pen_down = true;
            }
            path.line_to(cur);
        } else {
            pen_down = false;
        }
        prev = cur;
    }

    path
}

fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && a.x1 >= b.x0 && a.y0 <= b.y1 && a.y1 >= b.y0
}

#[cfg(test)]
#[path = "../../tests/unit/render/scene.rs"]
mod tests;
