use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use spiralcam::{
    AnimationConfig, FfmpegSink, FfmpegSinkOpts, FrameIndex, FrameRange, PngSequenceSink, Preset,
    RenderStats, RenderThreading, SpiralSession, SpiralSessionOpts,
};

#[derive(Parser, Debug)]
#[command(name = "spiralcam", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render a numbered PNG sequence into a directory.
    Frames(FramesArgs),
    /// Print phase, revealed count and viewport for some frames.
    Probe(ProbeArgs),
    /// Print a preset's configuration as JSON.
    Config(ConfigArgs),
}

fn parse_preset(name: &str) -> Result<Preset, String> {
    Preset::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = Preset::ALL.iter().map(|p| p.name()).collect();
        format!("unknown preset '{name}' (expected one of: {})", known.join(", "))
    })
}

#[derive(Args, Debug)]
struct Source {
    /// Animation config JSON.
    #[arg(long, conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Built-in preset (used when no config is given).
    #[arg(long, default_value = "classic", value_parser = parse_preset)]
    preset: Preset,
}

impl Source {
    fn load(&self) -> anyhow::Result<AnimationConfig> {
        let cfg = match &self.config {
            Some(path) => AnimationConfig::from_path(path)
                .with_context(|| format!("load config '{}'", path.display()))?,
            None => self.preset.config(),
        };
        cfg.validate().context("validate config")?;
        Ok(cfg)
    }
}

#[derive(Args, Debug)]
struct RangeArgs {
    /// First frame (inclusive).
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Last frame (exclusive). Defaults to the configured duration.
    #[arg(long)]
    end: Option<u64>,
}

impl RangeArgs {
    fn resolve(&self, cfg: &AnimationConfig) -> anyhow::Result<FrameRange> {
        let end = self.end.unwrap_or(cfg.duration);
        Ok(FrameRange::new(FrameIndex(self.start), FrameIndex(end))?)
    }
}

#[derive(Args, Debug)]
struct ThreadingArgs {
    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Render chunk size.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,

    /// Reuse the previous frame when nothing visible changed.
    #[arg(long, default_value_t = false)]
    static_frame_elision: bool,
}

impl ThreadingArgs {
    fn session_opts(&self) -> SpiralSessionOpts {
        SpiralSessionOpts {
            threading: RenderThreading {
                parallel: self.parallel,
                chunk_size: self.chunk_size,
                threads: self.threads,
                static_frame_elision: self.static_frame_elision,
            },
            ..SpiralSessionOpts::default()
        }
    }
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    source: Source,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: Source,

    #[command(flatten)]
    range: RangeArgs,

    #[command(flatten)]
    threading: ThreadingArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Fail instead of replacing an existing output file.
    #[arg(long, default_value_t = false)]
    no_overwrite: bool,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    source: Source,

    #[command(flatten)]
    range: RangeArgs,

    #[command(flatten)]
    threading: ThreadingArgs,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,

    /// File name prefix.
    #[arg(long, default_value = "frame_")]
    prefix: String,
}

#[derive(Args, Debug)]
struct ProbeArgs {
    #[command(flatten)]
    source: Source,

    /// Frames to inspect.
    #[arg(long = "frame", required = true, num_args = 1..)]
    frames: Vec<u64>,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// Preset to print.
    #[arg(long, default_value = "classic", value_parser = parse_preset)]
    preset: Preset,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Probe(args) => cmd_probe(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = args.source.load()?;
    let mut session = SpiralSession::new(cfg, SpiralSessionOpts::default())?;
    let frame = session.render_frame(FrameIndex(args.frame))?;
    spiralcam::write_png(&frame, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = args.source.load()?;
    let range = args.range.resolve(&cfg)?;
    let opts = FfmpegSinkOpts::new(&args.out)
        .with_overwrite(!args.no_overwrite)
        .with_bg_rgba(cfg.style.background);

    let mut session = SpiralSession::new(cfg, args.threading.session_opts())?;
    let mut sink = FfmpegSink::new(opts);
    let stats = session.render_range(range, &mut sink)?;
    report(&stats);
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let cfg = args.source.load()?;
    let range = args.range.resolve(&cfg)?;

    let mut session = SpiralSession::new(cfg, args.threading.session_opts())?;
    let mut sink = PngSequenceSink::new(&args.out_dir).with_prefix(args.prefix);
    let stats = session.render_range(range, &mut sink)?;
    report(&stats);
    eprintln!("wrote {} frames to {}", sink.written(), args.out_dir.display());
    Ok(())
}

fn cmd_probe(args: ProbeArgs) -> anyhow::Result<()> {
    let cfg = args.source.load()?;
    let session = SpiralSession::new(cfg, SpiralSessionOpts::default())?;
    for f in args.frames {
        let s = session.frame_state(FrameIndex(f));
        let (x0, x1) = s.viewport.x_range();
        let (y0, y1) = s.viewport.y_range();
        println!(
            "frame {f}: t={:.4} lap={} phase={} offset={:.4} revealed={} x=[{x0:.4}, {x1:.4}] y=[{y0:.4}, {y1:.4}]",
            s.cursor.time, s.cursor.lap, s.cursor.phase, s.cursor.phase_offset, s.cursor.revealed,
        );
    }
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let cfg = args.preset.config();
    println!("{}", cfg.to_json_pretty()?);
    Ok(())
}

fn report(stats: &RenderStats) {
    eprintln!(
        "frames: total={} rendered={} elided={}",
        stats.frames_total, stats.frames_rendered, stats.frames_elided
    );
}
