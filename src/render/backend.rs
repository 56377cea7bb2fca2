use crate::foundation::error::SpiralResult;
use crate::render::scene::FrameScene;

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**. The `premultiplied` flag makes this explicit at API
/// boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA8 bytes of the pixel at `(x, y)`, if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// A rasterizer that turns a [`FrameScene`] into a [`FrameRGBA`].
pub trait RenderBackend: Send {
    /// Rasterize one frame.
    fn render_scene(&mut self, scene: &FrameScene) -> SpiralResult<FrameRGBA>;

    /// Kind used to construct equivalent worker backends for parallel rendering.
    fn kind(&self) -> BackendKind;
}

/// Available backend kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    /// CPU raster backend powered by `vello_cpu`.
    #[default]
    Cpu,
}

/// Create a rendering backend implementation.
pub fn create_backend(kind: BackendKind) -> Box<dyn RenderBackend> {
    match kind {
        BackendKind::Cpu => Box::new(crate::render::cpu::CpuBackend::new()),
    }
}
