use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use rootplay::{
    CalculationRequest, ChartFrame, FormInput, GraphWindow, MethodKind, PlaybackStatus,
    Rasterizer, RecordingSurface, ReplayTransport, Settings, Visualizer,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rootplay", version)]
struct Cli {
    /// Settings JSON; every key is optional.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate form inputs and print the request that would be sent.
    Request(FormArgs),
    /// Render one step of a recorded response as PNG (or SVG by extension).
    Step(StepArgs),
    /// Render every step of a recorded response to numbered PNGs.
    Frames(FramesArgs),
    /// Replay a recorded response with autoplay in real time.
    Play(PlayArgs),
    /// Sample a formula over the window its inputs imply and print the viewport.
    Curve(FormArgs),
}

#[derive(Args, Debug, Clone)]
struct FormArgs {
    #[arg(long)]
    formula: String,

    /// bisection (alias dichotomy), newton, or simple_iter.
    #[arg(long, default_value = "bisection", value_parser = parse_method)]
    method: MethodKind,

    #[arg(long, default_value = "-10", allow_hyphen_values = true)]
    a: String,

    #[arg(long, default_value = "10", allow_hyphen_values = true)]
    b: String,

    #[arg(long, default_value = "2.5", allow_hyphen_values = true)]
    x0: String,

    /// Tolerance exponent: epsilon = 10^-precision.
    #[arg(long)]
    precision: Option<u32>,

    /// Task segment of the endpoint path.
    #[arg(long)]
    task: Option<String>,
}

#[derive(Args, Debug)]
struct ResponseArgs {
    #[command(flatten)]
    form: FormArgs,

    /// Recorded service response: a success body or `{"status", "body"}` envelope.
    #[arg(long)]
    response: PathBuf,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,
}

#[derive(Args, Debug)]
struct StepArgs {
    #[command(flatten)]
    common: ResponseArgs,

    /// Step index (0-based); clamped to the trace.
    #[arg(long, default_value_t = 0)]
    index: usize,

    /// Output path; `.svg` writes the SVG document, anything else a PNG.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    common: ResponseArgs,

    /// Directory receiving `step_0000.png`, `step_0001.png`, ...
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct PlayArgs {
    #[command(flatten)]
    common: ResponseArgs,

    /// Clock multiplier; 2 plays twice as fast.
    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    #[arg(long)]
    tick_ms: Option<u64>,
}

fn parse_method(s: &str) -> Result<MethodKind, String> {
    s.parse().map_err(|e: rootplay::RootplayError| e.to_string())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rootplay=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;
    match cli.cmd {
        Command::Request(args) => cmd_request(args, &settings),
        Command::Step(args) => cmd_step(args, settings),
        Command::Frames(args) => cmd_frames(args, settings),
        Command::Play(args) => cmd_play(args, settings),
        Command::Curve(args) => cmd_curve(args, settings),
    }
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let settings = match path {
        Some(p) => Settings::from_path(p)?,
        None => Settings::default(),
    };
    settings.validate()?;
    Ok(settings)
}

fn form_input(args: &FormArgs, settings: &Settings) -> FormInput {
    FormInput {
        formula: args.formula.clone(),
        a: args.a.clone(),
        b: args.b.clone(),
        x0: args.x0.clone(),
        precision: args.precision.unwrap_or(settings.input.precision),
    }
}

fn apply_overrides(args: &ResponseArgs, settings: &mut Settings) {
    if let Some(w) = args.width {
        settings.chart.width = w;
    }
    if let Some(h) = args.height {
        settings.chart.height = h;
    }
    if let Some(task) = &args.form.task {
        settings.input.task = task.clone();
    }
    if let Some(p) = args.form.precision {
        settings.input.precision = p;
    }
}

/// Build a session from the form flags and load the recorded trace into it.
fn load_session(
    args: &ResponseArgs,
    settings: Settings,
) -> anyhow::Result<Visualizer<RecordingSurface>> {
    let mut vis = Visualizer::new(settings, RecordingSurface::new())?;
    vis.edit_formula(args.form.formula.clone());
    vis.edit_bounds(args.form.a.clone(), args.form.b.clone());
    vis.edit_initial_guess(args.form.x0.clone());
    vis.select_method(args.form.method);

    let mut transport = ReplayTransport::from_path(&args.response)?;
    vis.calculate_with(&mut transport)
        .with_context(|| format!("replay '{}'", args.response.display()))?;
    if let Some(summary) = vis.result() {
        eprintln!(
            "root {}  iterations {}  error {}  steps {}",
            summary.root, summary.iterations, summary.error, summary.steps
        );
    }
    Ok(vis)
}

fn cmd_request(args: FormArgs, settings: &Settings) -> anyhow::Result<()> {
    let task = args.task.as_deref().unwrap_or(&settings.input.task);
    let req = CalculationRequest::from_form(task, args.method, &form_input(&args, settings))?;
    println!("POST {}", req.path());
    println!("{}", req.body()?);
    Ok(())
}

fn cmd_step(args: StepArgs, mut settings: Settings) -> anyhow::Result<()> {
    apply_overrides(&args.common, &mut settings);
    let mut vis = load_session(&args.common, settings)?;
    vis.seek(args.index);
    let frame = vis.frame();

    ensure_parent(&args.out)?;
    let svg = rootplay::frame_to_svg(&frame, &vis.settings().chart);
    let is_svg = args
        .out
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if is_svg {
        std::fs::write(&args.out, svg)
            .with_context(|| format!("write svg '{}'", args.out.display()))?;
    } else {
        let chart = &vis.settings().chart;
        let rgba = Rasterizer::with_system_fonts().rasterize(&svg, chart.width, chart.height)?;
        rootplay::write_png(&rgba, &args.out)?;
    }

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs, mut settings: Settings) -> anyhow::Result<()> {
    apply_overrides(&args.common, &mut settings);
    let mut vis = load_session(&args.common, settings)?;
    let len = vis.trace().map_or(0, |t| t.len());

    let mut frames: Vec<ChartFrame> = Vec::with_capacity(len);
    for i in 0..len {
        vis.seek(i);
        frames.push(vis.frame());
    }

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    let chart = vis.settings().chart.clone();
    let rasterizer = Rasterizer::with_system_fonts();

    frames
        .par_iter()
        .enumerate()
        .try_for_each(|(i, frame)| -> anyhow::Result<()> {
            let svg = rootplay::frame_to_svg(frame, &chart);
            let rgba = rasterizer.rasterize(&svg, chart.width, chart.height)?;
            let path = args.out_dir.join(format!("step_{i:04}.png"));
            rootplay::write_png(&rgba, &path)?;
            Ok(())
        })?;

    eprintln!("wrote {len} frames to {}", args.out_dir.display());
    Ok(())
}

fn cmd_play(args: PlayArgs, mut settings: Settings) -> anyhow::Result<()> {
    if !args.speed.is_finite() || args.speed <= 0.0 {
        anyhow::bail!("--speed must be a positive number, got {}", args.speed);
    }
    apply_overrides(&args.common, &mut settings);
    if let Some(tick) = args.tick_ms {
        settings.playback.tick_ms = tick;
    }
    let mut vis = load_session(&args.common, settings)?;
    print_step(&vis)?;

    vis.toggle_play();
    while vis.state().status == PlaybackStatus::Playing {
        let Some(due) = vis.next_due() else {
            break;
        };
        let dt = due.saturating_sub(vis.now());
        let wall = Duration::try_from_secs_f64(dt.as_secs_f64() / args.speed).with_context(|| {
            format!("--speed {} gives an unrepresentable tick delay", args.speed)
        })?;
        std::thread::sleep(wall);
        vis.advance(dt);
        print_step(&vis)?;
    }
    Ok(())
}

fn print_step(vis: &Visualizer<RecordingSurface>) -> anyhow::Result<()> {
    let state = vis.state();
    let Some(step) = vis.trace().and_then(|t| t.get(state.index)) else {
        return Ok(());
    };
    tracing::info!(counter = %vis.controls().counter, status = ?state.status, "step");
    println!("{}", serde_json::to_string(step)?);
    Ok(())
}

fn cmd_curve(args: FormArgs, settings: Settings) -> anyhow::Result<()> {
    let window = GraphWindow::for_inputs(args.method, &args.a, &args.b, &args.x0);
    let mut renderer = rootplay::CurveRenderer::new(settings.curve.clone());
    let viewport = renderer.render(&args.formula, window.center, window.span)?;
    let out = serde_json::json!({
        "formula": args.formula,
        "viewport": viewport,
        "samples": renderer.base_curve().points.len(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
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
