//! Sakura - render the falling petal effect to PNG
//!
//! Usage:
//!   sakura render [--config sakura.toml] [--frames 300] [--output sakura.png]
//!                 [--burst 640,200@30] [--shuffle-at 120] [--frames-dir out --every 10]
//!   sakura config > sakura.toml

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use sakura_core::{Color, SceneConfig};
use sakura_player::{BurstAt, PlayerApp, Script, SnapshotPlan};
use sakura_render::NIGHT_SKY;
use sakura_runtime::{run, FixedStepScheduler, FrameScheduler, InputEvent, RealtimeScheduler};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sakura")]
#[command(about = "Falling sakura petals over a night sky, rendered headless to PNG")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the effect for a number of frames and write PNG snapshots
    Render(RenderArgs),

    /// Print the default scene config as TOML
    Config,
}

#[derive(Args)]
struct RenderArgs {
    /// Scene file (TOML); built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Logical width
    #[arg(long)]
    width: Option<f64>,

    /// Logical height
    #[arg(long)]
    height: Option<f64>,

    /// Device pixel ratio, clamped to [1, 2]
    #[arg(long)]
    dpr: Option<f64>,

    /// Target petal count
    #[arg(long, allow_hyphen_values = true)]
    count: Option<i64>,

    /// Base wind strength
    #[arg(long, allow_hyphen_values = true)]
    wind: Option<f32>,

    /// Gust amplitude
    #[arg(long)]
    gust: Option<f32>,

    /// RNG seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Frames to render
    #[arg(long, default_value_t = 300)]
    frames: u64,

    /// Simulated frame rate
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Pace frames against the wall clock instead of stepping instantly
    #[arg(long)]
    realtime: bool,

    /// Where to write the last frame
    #[arg(long, short, default_value = "sakura.png")]
    output: PathBuf,

    /// Directory for periodic frame dumps
    #[arg(long)]
    frames_dir: Option<PathBuf>,

    /// Dump every Nth frame into --frames-dir
    #[arg(long, default_value_t = 10)]
    every: u64,

    /// Pointer burst as x,y@frame (repeatable)
    #[arg(long = "burst")]
    bursts: Vec<BurstAt>,

    /// Re-roll the wind pattern at this frame (repeatable)
    #[arg(long = "shuffle-at")]
    shuffles: Vec<u64>,

    /// Backdrop colour as #rrggbb (defaults to the night sky)
    #[arg(long, value_parser = parse_color, conflicts_with = "transparent")]
    background: Option<Color>,

    /// Keep a transparent background instead of the night sky
    #[arg(long)]
    transparent: bool,
}

fn parse_color(s: &str) -> Result<Color, String> {
    Color::parse_hex(s).ok_or_else(|| format!("expected #rrggbb, got '{s}'"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Render(args) => render(args),
        Commands::Config => {
            let text = toml::to_string_pretty(&SceneConfig::default())
                .context("Failed to serialize default config")?;
            print!("{text}");
            Ok(())
        }
    }
}

fn render(args: RenderArgs) -> Result<()> {
    let scene = load_scene(&args)?;

    let mut script = Script::new();
    for burst in &args.bursts {
        script.burst(*burst);
    }
    for &frame in &args.shuffles {
        script.at(frame, InputEvent::Shuffle);
    }
    // slider overrides go through the same path as live input
    if let Some(count) = args.count {
        script.at(0, InputEvent::SetTargetCount(count));
    }
    if let Some(wind) = args.wind {
        script.at(0, InputEvent::SetWind(wind));
    }
    if let Some(gust) = args.gust {
        script.at(0, InputEvent::SetGustiness(gust));
    }

    let snapshots = SnapshotPlan {
        final_frame: Some(args.output.clone()),
        frames_dir: args.frames_dir.clone(),
        every: args.every,
        background: (!args.transparent)
            .then(|| args.background.unwrap_or_else(|| Color::from_hex(NIGHT_SKY))),
    };

    let mut app = PlayerApp::new(&scene, script, snapshots).context("Failed to start effect")?;
    let mut scheduler: Box<dyn FrameScheduler> = if args.realtime {
        Box::new(RealtimeScheduler::new(args.fps, Some(args.frames)))
    } else {
        Box::new(FixedStepScheduler::at_fps(args.fps, args.frames))
    };

    let frames = run(scheduler.as_mut(), &mut app).context("Frame loop failed")?;
    let path = app.finish().context("Failed to write final frame")?;

    if let Some(stats) = app.last_stats() {
        tracing::info!(
            frames,
            petals = stats.petals,
            target = stats.target,
            sprites = stats.sprites,
            "done"
        );
    }
    if let Some(path) = path {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn load_scene(args: &RenderArgs) -> Result<SceneConfig> {
    let mut scene = match &args.config {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("Failed to load scene config '{}'", path.display()))?,
        None => SceneConfig::default(),
    };

    if let Some(width) = args.width {
        scene.viewport.width = width;
    }
    if let Some(height) = args.height {
        scene.viewport.height = height;
    }
    if let Some(dpr) = args.dpr {
        scene.viewport.device_pixel_ratio = dpr;
    }
    if args.seed.is_some() {
        scene.seed = args.seed;
    }
    Ok(scene)
}
