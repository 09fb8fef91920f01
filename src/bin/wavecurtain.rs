use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rayon::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "wavecurtain", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single moment of a curtain motion as SVG or PNG.
    Frame(FrameArgs),
    /// Render every frame of a curtain motion into a directory.
    Sequence(SequenceArgs),
    /// Print a preset configuration as JSON.
    Preset(PresetArgs),
}

#[derive(Args, Debug)]
struct CurtainArgs {
    /// Curtain configuration JSON. Overrides `--preset`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Built-in configuration to use when no `--config` is given.
    #[arg(long, value_enum, default_value_t = PresetChoice::Overlay)]
    preset: PresetChoice,

    /// Jitter seed for the hero preset.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Override the tween ease (e.g. `InOutQuart` or `power3.inOut`).
    #[arg(long)]
    ease: Option<String>,

    /// Motion to play.
    #[arg(long, value_enum, default_value_t = MotionChoice::Open)]
    motion: MotionChoice,

    /// Output width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Output height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    curtain: CurtainArgs,

    /// Seconds since the motion started.
    #[arg(long)]
    time: f64,

    /// Output path; `.png` rasterizes, anything else writes SVG.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct SequenceArgs {
    #[command(flatten)]
    curtain: CurtainArgs,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Output directory for `frame_NNNNN.*` files and `frames.json`.
    #[arg(long)]
    out_dir: PathBuf,

    /// Rasterize frames to PNG instead of writing SVG.
    #[arg(long, default_value_t = false)]
    png: bool,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Args, Debug)]
struct PresetArgs {
    #[arg(value_enum)]
    preset: PresetChoice,

    /// Jitter seed for the hero preset.
    #[arg(long, default_value_t = 1)]
    seed: u64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PresetChoice {
    Overlay,
    Hero,
    Entrance,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MotionChoice {
    Open,
    Close,
    Pulse,
    Enter,
}

impl From<MotionChoice> for wavecurtain::Motion {
    fn from(m: MotionChoice) -> Self {
        match m {
            MotionChoice::Open => Self::Open,
            MotionChoice::Close => Self::Close,
            MotionChoice::Pulse => Self::Pulse,
            MotionChoice::Enter => Self::Enter,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sequence(args) => cmd_sequence(args),
        Command::Preset(args) => cmd_preset(args),
    }
}

fn preset_config(choice: PresetChoice, seed: u64) -> wavecurtain::CurtainConfig {
    match choice {
        PresetChoice::Overlay => wavecurtain::CurtainConfig::overlay(),
        PresetChoice::Hero => wavecurtain::CurtainConfig::hero(seed),
        PresetChoice::Entrance => wavecurtain::CurtainConfig::entrance(),
    }
}

fn load_config(args: &CurtainArgs) -> anyhow::Result<wavecurtain::CurtainConfig> {
    let mut cfg = match &args.config {
        Some(path) => wavecurtain::CurtainConfig::from_path(path)?,
        None => preset_config(args.preset, args.seed),
    };
    if let Some(name) = &args.ease {
        cfg.ease = wavecurtain::Ease::parse(name)?;
    }
    Ok(cfg)
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn write_frame(
    snap: &wavecurtain::FrameSnapshot,
    fills: &[String; 2],
    canvas: wavecurtain::Canvas,
    out: &Path,
    png: bool,
) -> anyhow::Result<()> {
    let svg = snap.to_svg(fills, canvas);
    if png {
        let frame = wavecurtain::rasterize_svg(&svg, canvas)?;
        frame.save_png(out)?;
    } else {
        ensure_parent(out)?;
        std::fs::write(out, svg).with_context(|| format!("write svg '{}'", out.display()))?;
    }
    Ok(())
}

#[tracing::instrument(skip_all, fields(time = args.time))]
fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.curtain)?;
    let canvas = wavecurtain::Canvas::new(args.curtain.width, args.curtain.height)?;
    let snap = wavecurtain::snapshot_at(&cfg, args.curtain.motion.into(), args.time)?;

    let png = args
        .out
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    write_frame(&snap, &cfg.fills, canvas, &args.out, png)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

#[tracing::instrument(skip_all, fields(fps = args.fps, parallel = args.parallel))]
fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.curtain)?;
    let canvas = wavecurtain::Canvas::new(args.curtain.width, args.curtain.height)?;
    let fps = wavecurtain::Fps::new(args.fps, 1)?;
    let frames = wavecurtain::record(&cfg, args.curtain.motion.into(), fps)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let ext = if args.png { "png" } else { "svg" };
    let frame_path = |snap: &wavecurtain::FrameSnapshot| {
        let idx = snap.frame.map_or(0, |f| f.0);
        args.out_dir.join(format!("frame_{idx:05}.{ext}"))
    };

    if args.parallel {
        let pool = build_thread_pool(args.threads)?;
        pool.install(|| {
            frames.par_iter().try_for_each(|snap| {
                write_frame(snap, &cfg.fills, canvas, &frame_path(snap), args.png)
            })
        })?;
    } else {
        for snap in &frames {
            write_frame(snap, &cfg.fills, canvas, &frame_path(snap), args.png)?;
        }
    }

    let index = args.out_dir.join("frames.json");
    let f = std::fs::File::create(&index)
        .with_context(|| format!("create '{}'", index.display()))?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(f), &frames)
        .with_context(|| format!("write '{}'", index.display()))?;

    eprintln!("wrote {} frames to {}", frames.len(), args.out_dir.display());
    Ok(())
}

fn cmd_preset(args: PresetArgs) -> anyhow::Result<()> {
    let cfg = preset_config(args.preset, args.seed);
    let json = serde_json::to_string_pretty(&cfg).context("serialize preset")?;
    println!("{json}");
    Ok(())
}

fn build_thread_pool(threads: Option<usize>) -> anyhow::Result<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        anyhow::bail!("'threads' must be >= 1 when set");
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build rayon thread pool: {e}"))
}
