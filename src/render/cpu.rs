use crate::foundation::core::{BezPath, Point};
use crate::foundation::error::{SpiralError, SpiralResult};
use crate::render::backend::{BackendKind, FrameRGBA, RenderBackend};
use crate::render::scene::FrameScene;
use kurbo::Shape;

// Tolerance used when flattening the marker circle into a path.
const CIRCLE_TOLERANCE: f64 = 0.05;

/// CPU backend powered by `vello_cpu`.
///
/// The output pixmap is kept between frames and only reallocated when the canvas size changes.
#[derive(Default)]
pub struct CpuBackend {
    pixmap: Option<CpuSurface>,
}

struct CpuSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl CpuBackend {
    /// Create a backend with no allocated surface.
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_surface(&mut self, width: u32, height: u32) -> SpiralResult<&mut CpuSurface> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| SpiralError::render("canvas width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| SpiralError::render("canvas height exceeds u16"))?;

        let stale = match &self.pixmap {
            Some(s) => s.width != width_u16 || s.height != height_u16,
            None => true,
        };
        if stale {
            self.pixmap = Some(CpuSurface {
                width: width_u16,
                height: height_u16,
                pixmap: vello_cpu::Pixmap::new(width_u16, height_u16),
            });
        }
        self.pixmap
            .as_mut()
            .ok_or_else(|| SpiralError::render("cpu surface missing after allocation"))
    }
}

impl RenderBackend for CpuBackend {
    fn render_scene(&mut self, scene: &FrameScene) -> SpiralResult<FrameRGBA> {
        if scene.canvas.width == 0 || scene.canvas.height == 0 {
            return Err(SpiralError::render("canvas width/height must be non-zero"));
        }
        let surface = self.ensure_surface(scene.canvas.width, scene.canvas.height)?;

        let mut ctx = vello_cpu::RenderContext::new(surface.width, surface.height);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

        ctx.set_paint(color(scene.background));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(surface.width),
            f64::from(surface.height),
        ));

        if !scene.trail.elements().is_empty() {
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(scene.line_width));
            ctx.set_paint(color(scene.line));
            ctx.stroke_path(&bezpath_to_cpu(&scene.trail));
        }

        if let Some(marker) = scene.marker {
            let circle = kurbo::Circle::new(marker.center, marker.radius);
            ctx.set_paint(color(marker.color));
            ctx.fill_path(&bezpath_to_cpu(&circle.to_path(CIRCLE_TOLERANCE)));
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut surface.pixmap);

        Ok(FrameRGBA {
            width: scene.canvas.width,
            height: scene.canvas.height,
            data: surface.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Cpu
    }
}

fn color([r, g, b, a]: [u8; 4]) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(r, g, b, a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
