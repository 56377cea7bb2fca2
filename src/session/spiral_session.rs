use crate::camera::viewport::{Viewport, select_viewport};
use crate::config::model::AnimationConfig;
use crate::curve::generator::{Curve, generate_curve};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, FrameIndex, FrameRange};
use crate::foundation::error::{SpiralError, SpiralResult};
use crate::playback::cursor::PlaybackCursor;
use crate::playback::schedule::PhaseSchedule;
use crate::render::backend::{BackendKind, FrameRGBA, RenderBackend, create_backend};
use crate::render::scene::{FrameScene, SceneOpts, build_scene};
use rayon::prelude::*;

// Upper bound on frames held per chunk before they reach the sink.
const MAX_REORDER_BUFFER_BYTES: u64 = 128 * 1024 * 1024;

/// Frame-level threading and chunking for range renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderThreading {
    /// Render frames of a chunk in parallel on a rayon pool.
    pub parallel: bool,
    /// Frames per chunk. Zero is treated as one.
    pub chunk_size: usize,
    /// Worker thread count override (parallel mode only).
    pub threads: Option<usize>,
    /// Reuse the previous frame when nothing visible changed.
    pub static_frame_elision: bool,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
            static_frame_elision: false,
        }
    }
}

/// Options for [`SpiralSession::new`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpiralSessionOpts {
    /// Backend used for the session (and for parallel workers).
    pub backend: BackendKind,
    /// Scene construction tuning.
    pub scene: SceneOpts,
    /// Range render threading.
    pub threading: RenderThreading,
}

/// Counters reported by [`SpiralSession::render_range`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames pushed to the sink.
    pub frames_total: u64,
    /// Frames actually rasterized.
    pub frames_rendered: u64,
    /// Frames reused from an identical predecessor.
    pub frames_elided: u64,
}

/// Playback cursor and camera for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameState {
    /// Derived playback cursor.
    pub cursor: PlaybackCursor,
    /// Selected viewport.
    pub viewport: Viewport,
}

impl FrameState {
    // Two frames with equal keys rasterize identically.
    fn visual_key(&self) -> (usize, u64, u64, u64) {
        (
            self.cursor.revealed,
            self.viewport.center.x.to_bits(),
            self.viewport.center.y.to_bits(),
            self.viewport.half_width.to_bits(),
        )
    }
}

/// A validated animation with its curve generated and a backend ready to draw.
pub struct SpiralSession {
    config: AnimationConfig,
    schedule: PhaseSchedule,
    curve: Curve,
    backend: Box<dyn RenderBackend>,
    opts: SpiralSessionOpts,
}

impl SpiralSession {
    /// Validate `config`, generate the curve, and create the backend.
    pub fn new(config: AnimationConfig, opts: SpiralSessionOpts) -> SpiralResult<Self> {
        config.validate()?;
        let schedule = config.schedule()?;
        let curve = generate_curve(&config.curve)?;
        let backend = create_backend(opts.backend);
        tracing::info!(
            samples = curve.len(),
            phases = schedule.phases().len(),
            cycle = schedule.total_duration(),
            "session ready"
        );
        Ok(Self {
            config,
            schedule,
            curve,
            backend,
            opts,
        })
    }

    /// Validated configuration.
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Generated curve.
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// Phase schedule.
    pub fn schedule(&self) -> &PhaseSchedule {
        &self.schedule
    }

    /// Session options.
    pub fn opts(&self) -> &SpiralSessionOpts {
        &self.opts
    }

    /// Playback cursor for `frame`.
    pub fn cursor_at(&self, frame: FrameIndex) -> PlaybackCursor {
        self.frame_state(frame).cursor
    }

    /// Camera viewport for `frame`.
    pub fn viewport_at(&self, frame: FrameIndex) -> Viewport {
        self.frame_state(frame).viewport
    }

    /// Cursor and viewport for `frame`.
    pub fn frame_state(&self, frame: FrameIndex) -> FrameState {
        frame_state(&self.config, &self.schedule, &self.curve, frame)
    }

    /// Pixel-space scene for `frame`.
    pub fn scene_at(&self, frame: FrameIndex) -> FrameScene {
        let state = self.frame_state(frame);
        scene_for(&self.config, &self.curve, &state, self.opts.scene)
    }

    /// Render a single frame.
    #[tracing::instrument(skip_all, fields(frame = frame.0))]
    pub fn render_frame(&mut self, frame: FrameIndex) -> SpiralResult<FrameRGBA> {
        let scene = self.scene_at(frame);
        self.backend.render_scene(&scene)
    }

    /// Render `range` in order into `sink`.
    ///
    /// The range must be non-empty and inside the configured duration. Frames reach the sink in
    /// strictly increasing order regardless of threading.
    #[tracing::instrument(skip(self, sink), fields(start = range.start.0, end = range.end.0))]
    pub fn render_range(
        &mut self,
        range: FrameRange,
        sink: &mut dyn FrameSink,
    ) -> SpiralResult<RenderStats> {
        if range.is_empty() {
            return Err(SpiralError::validation("render range must be non-empty"));
        }
        if range.end.0 > self.config.duration {
            return Err(SpiralError::validation(
                "render range must be within the configured duration",
            ));
        }

        let threading = self.opts.threading.clone();
        let chunk_size =
            effective_chunk_size(threading.chunk_size, self.config.canvas, range.len_frames());
        let pool = if threading.parallel {
            Some(build_thread_pool(threading.threads)?)
        } else {
            None
        };

        sink.begin(SinkConfig {
            width: self.config.canvas.width,
            height: self.config.canvas.height,
            fps: self.config.fps,
        })?;
        tracing::info!(frames = range.len_frames(), parallel = threading.parallel, "render started");

        let mut stats = RenderStats::default();
        let mut last_phase = None;
        let mut chunk_start = range.start.0;
        while chunk_start < range.end.0 {
            let chunk_end = (chunk_start + chunk_size).min(range.end.0);
            let states: Vec<FrameState> = (chunk_start..chunk_end)
                .map(|f| self.frame_state(FrameIndex(f)))
                .collect();

            for s in &states {
                if last_phase != Some(s.cursor.phase) {
                    tracing::debug!(
                        frame = s.cursor.frame.0,
                        phase = %s.cursor.phase,
                        revealed = s.cursor.revealed,
                        "phase change"
                    );
                    last_phase = Some(s.cursor.phase);
                }
            }

            let plan = plan_chunk(&states, threading.static_frame_elision);
            let rendered = match pool.as_ref() {
                Some(pool) => self.render_unique_parallel(&states, &plan.unique, pool)?,
                None => self.render_unique_sequential(&states, &plan.unique)?,
            };

            for (state, &u) in states.iter().zip(&plan.frame_to_unique) {
                let frame = rendered.get(u).ok_or_else(|| {
                    SpiralError::render("internal error: unique frame missing for chunk")
                })?;
                sink.push_frame(state.cursor.frame, frame)?;
            }

            stats.frames_total += states.len() as u64;
            stats.frames_rendered += plan.unique.len() as u64;
            stats.frames_elided += (states.len() - plan.unique.len()) as u64;
            chunk_start = chunk_end;
        }

        sink.end()?;
        tracing::info!(
            rendered = stats.frames_rendered,
            elided = stats.frames_elided,
            "render finished"
        );
        Ok(stats)
    }

    fn render_unique_sequential(
        &mut self,
        states: &[FrameState],
        unique: &[usize],
    ) -> SpiralResult<Vec<FrameRGBA>> {
        let mut out = Vec::with_capacity(unique.len());
        for &i in unique {
            let scene = scene_for(&self.config, &self.curve, &states[i], self.opts.scene);
            out.push(self.backend.render_scene(&scene)?);
        }
        Ok(out)
    }

    fn render_unique_parallel(
        &self,
        states: &[FrameState],
        unique: &[usize],
        pool: &rayon::ThreadPool,
    ) -> SpiralResult<Vec<FrameRGBA>> {
        let config = &self.config;
        let curve = &self.curve;
        let scene_opts = self.opts.scene;
        let kind = self.backend.kind();

        let rendered = pool.install(|| {
            unique
                .par_iter()
                .map_init(
                    || create_backend(kind),
                    |worker, &i| -> SpiralResult<FrameRGBA> {
                        let scene = scene_for(config, curve, &states[i], scene_opts);
                        worker.render_scene(&scene)
                    },
                )
                .collect::<Vec<_>>()
        });
        rendered.into_iter().collect()
    }
}

fn frame_state(
    config: &AnimationConfig,
    schedule: &PhaseSchedule,
    curve: &Curve,
    frame: FrameIndex,
) -> FrameState {
    let cursor = PlaybackCursor::at(
        schedule,
        config.clock,
        config.reveal,
        config.fps,
        curve.len(),
        frame,
    );
    // `locate` only returns configured phases.
    let viewport = match schedule.spec(cursor.phase) {
        Some(spec) => select_viewport(spec, curve, cursor.revealed),
        None => Viewport::centered(2.5),
    };
    FrameState { cursor, viewport }
}

fn scene_for(
    config: &AnimationConfig,
    curve: &Curve,
    state: &FrameState,
    opts: SceneOpts,
) -> FrameScene {
    build_scene(
        curve,
        state.cursor.revealed,
        &state.viewport,
        config.canvas,
        &config.style,
        opts,
    )
}

struct ChunkPlan {
    // Indices into the chunk of frames that must be rasterized.
    unique: Vec<usize>,
    // For every frame of the chunk, its position in `unique`.
    frame_to_unique: Vec<usize>,
}

fn plan_chunk(states: &[FrameState], elide: bool) -> ChunkPlan {
    let mut unique = Vec::with_capacity(states.len());
    let mut frame_to_unique = Vec::with_capacity(states.len());
    for (i, s) in states.iter().enumerate() {
        let repeat = elide
            && i > 0
            && unique
                .last()
                .is_some_and(|&u: &usize| states[u].visual_key() == s.visual_key());
        if !repeat {
            unique.push(i);
        }
        frame_to_unique.push(unique.len() - 1);
    }
    ChunkPlan {
        unique,
        frame_to_unique,
    }
}

fn build_thread_pool(threads: Option<usize>) -> SpiralResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SpiralError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SpiralError::render(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    chunk_size.max(1) as u64
}

fn effective_chunk_size(requested: usize, canvas: Canvas, range_len: u64) -> u64 {
    let bytes_per_frame = u64::from(canvas.width)
        .saturating_mul(u64::from(canvas.height))
        .saturating_mul(4)
        .max(1);
    let max_chunk_by_mem = (MAX_REORDER_BUFFER_BYTES / bytes_per_frame).max(1);
    normalized_chunk_size(requested)
        .min(max_chunk_by_mem)
        .min(range_len.max(1))
}
