use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{ArgAction, Args, Parser, Subcommand};
use plexus::{
    FfmpegSink, FfmpegSinkOpts, PlexusError, PngSequenceSink, Quality, RecordingRenderer,
    RenderSession, RenderSessionOpts, SceneKind, Seconds, StyleConfig,
};

#[derive(Parser, Debug)]
#[command(name = "plexus", version, about = "Animated brachial plexus diagrams")]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available scenes.
    List,
    /// Dry-run a scene and print a summary of its render calls.
    Run(RunArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a whole scene to MP4 (requires `ffmpeg` on PATH) or a PNG sequence.
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Scene name, e.g. `overview` or `erbs-palsy`.
    #[arg(long)]
    scene: SceneKind,

    /// Style JSON overriding the default palette and geometry.
    #[arg(long)]
    style: Option<PathBuf>,
}

impl SceneArgs {
    fn style(&self) -> anyhow::Result<StyleConfig> {
        match &self.style {
            Some(path) => StyleConfig::from_path(path)
                .with_context(|| format!("load style '{}'", path.display())),
            None => Ok(StyleConfig::default()),
        }
    }
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Write the call transcript as JSON.
    #[arg(long)]
    transcript: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output quality preset.
    #[arg(long, default_value_t = Quality::Medium)]
    quality: Quality,

    /// Scene time in seconds (default: the final frame).
    #[arg(long)]
    at: Option<f64>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output quality preset.
    #[arg(long, default_value_t = Quality::High)]
    quality: Quality,

    /// Output MP4 path.
    #[arg(long, conflicts_with = "frames", required_unless_present = "frames")]
    out: Option<PathBuf>,

    /// Output directory for a PNG sequence.
    #[arg(long)]
    frames: Option<PathBuf>,

    /// Extra font directory.
    #[arg(long)]
    font_dir: Option<PathBuf>,

    /// Rasterize frames in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Frames per parallel chunk.
    #[arg(long, default_value_t = 32)]
    chunk_size: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.cmd {
        Command::List => cmd_list(),
        Command::Run(args) => cmd_run(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// 2 configuration, 3 lookup, 4 unknown grouping, 1 anything else.
fn exit_code(e: &anyhow::Error) -> u8 {
    match e.chain().find_map(|c| c.downcast_ref::<PlexusError>()) {
        Some(PlexusError::Configuration(_)) => 2,
        Some(PlexusError::Lookup(_)) => 3,
        Some(PlexusError::UnknownGrouping(_)) => 4,
        _ => 1,
    }
}

fn cmd_list() -> anyhow::Result<()> {
    for kind in SceneKind::ALL {
        println!("{:<22}{}", kind.slug(), kind.name());
    }
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let style = args.scene.style()?;
    let scene = args.scene.scene.script(&style);
    let mut rec = RecordingRenderer::new();
    let report = plexus::play_scene(&scene, &style, &mut rec)?;

    println!("scene:       {}", report.scene);
    println!("steps:       {}", report.steps_visited.len());
    println!("calls:       {}", report.calls);
    println!("duration:    {:.2}s", report.duration.0);
    println!("fingerprint: {}", report.fingerprint);

    if let Some(path) = args.transcript {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        std::fs::write(&path, rec.transcript_json()?)
            .with_context(|| format!("write transcript '{}'", path.display()))?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let style = args.scene.style()?;
    let scene = args.scene.scene.script(&style);
    let opts = RenderSessionOpts::from_quality(args.quality);
    let sess = RenderSession::new(&scene, &style, opts)?;
    let frame = match args.at {
        Some(t) => sess.frame_at(Seconds(t))?,
        None => sess.final_frame()?,
    };
    frame.save_png(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let style = args.scene.style()?;
    let scene = args.scene.scene.script(&style);
    let opts = RenderSessionOpts {
        font_dir: args.font_dir.clone(),
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        ..RenderSessionOpts::from_quality(args.quality)
    };
    let sess = RenderSession::new(&scene, &style, opts)?;

    let (stats, target) = match (args.out, args.frames) {
        (Some(out), _) => {
            let opts = FfmpegSinkOpts::new(&out)
                .with_background(style.palette.background)
                .with_preset(args.quality.encode_preset())
                .with_title(scene.name.clone());
            let mut sink = FfmpegSink::new(opts);
            (sess.render_to(&mut sink)?, out)
        }
        (None, Some(dir)) => {
            let mut sink = PngSequenceSink::new(&dir);
            (sess.render_to(&mut sink)?, dir)
        }
        (None, None) => anyhow::bail!("either --out or --frames is required"),
    };

    eprintln!(
        "wrote {} ({} frames, {:.2}s)",
        target.display(),
        stats.frames,
        stats.duration.0
    );
    Ok(())
}
