use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use serde_json::json;
use vidtour::{
    BubbleState, HostCallbacks, OverlayView, SessionOpts, SimulatedSurface, Size, StopPoint,
    TourPlayer, TutorialData, VideoSource, project_timeline, stop_markers,
};

#[derive(Parser, Debug)]
#[command(name = "vidtour", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). Logs go to stderr.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse and validate a tutorial JSON file.
    Check(CheckArgs),
    /// Run a headless session and print a JSON-lines trace of what the viewer would see.
    Simulate(SimulateArgs),
    /// Print the progress-bar projection at a given time.
    Timeline(TimelineArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input tutorial JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input tutorial JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Simulated media duration in seconds.
    #[arg(long)]
    duration: f64,

    /// Playback tick interval in milliseconds.
    #[arg(long, default_value_t = 250)]
    tick_ms: u64,

    /// How long the simulated viewer reads each area before acknowledging it, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    dwell_ms: u64,

    /// Settle delay after each acknowledgment, in milliseconds.
    #[arg(long, default_value_t = 300)]
    settle_ms: u64,

    /// Container size as WIDTHxHEIGHT pixels.
    #[arg(long, default_value = "1280x720", value_parser = parse_size)]
    container: Size,

    /// Measured bubble size as WIDTHxHEIGHT pixels.
    #[arg(long, default_value = "280x96", value_parser = parse_size)]
    bubble: Size,
}

#[derive(Parser, Debug)]
struct TimelineArgs {
    /// Input tutorial JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Media duration in seconds.
    #[arg(long)]
    duration: f64,

    /// Current playback time in seconds.
    #[arg(long, default_value_t = 0.0)]
    at: f64,
}

fn parse_size(s: &str) -> Result<Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w: f64 = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
    let h: f64 = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
    if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
        return Err(format!("size must be positive, got '{s}'"));
    }
    Ok(Size::new(w, h))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Simulate(args) => cmd_simulate(args),
        Command::Timeline(args) => cmd_timeline(args),
    }
}

fn load(path: &Path) -> anyhow::Result<TutorialData> {
    TutorialData::from_path(path).with_context(|| format!("load tutorial '{}'", path.display()))
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let data = load(&args.in_path)?;
    data.validate()
        .with_context(|| format!("validate '{}'", args.in_path.display()))?;
    let areas: usize = data.stop_points.iter().map(|s| s.areas.len()).sum();
    println!(
        "ok: {} stop points, {areas} areas (version '{}')",
        data.stop_points.len(),
        data.version
    );
    Ok(())
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let data = load(&args.in_path)?;
    let times = data.stop_times();
    let out = json!({
        "duration": args.duration,
        "at": args.at,
        "segments": project_timeline(&times, args.duration, args.at),
        "markers": stop_markers(&times, args.duration),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

/// Buffers host notifications so the driver loop can print them with a timestamp.
#[derive(Default)]
struct TraceLog {
    pending: Vec<serde_json::Value>,
}

impl HostCallbacks for TraceLog {
    fn on_start(&mut self) {
        self.pending.push(json!({ "event": "started" }));
    }

    fn on_complete(&mut self) {
        self.pending.push(json!({ "event": "completed" }));
    }

    fn on_step_advanced(&mut self, stop: &StopPoint, area_index: usize) {
        self.pending.push(json!({
            "event": "step_advanced",
            "stop": stop.id,
            "area_index": area_index,
        }));
    }
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    if !(args.duration.is_finite() && args.duration > 0.0) {
        anyhow::bail!("--duration must be a positive number of seconds");
    }
    if args.tick_ms == 0 {
        anyhow::bail!("--tick-ms must be > 0");
    }
    let data = load(&args.in_path)?;
    if let Err(e) = data.validate() {
        tracing::warn!("tutorial has validation problems; simulating anyway: {e}");
    }
    let total_areas: u64 = data.stop_points.iter().map(|s| s.areas.len() as u64).sum();

    let opts = SessionOpts {
        settle_delay_ms: args.settle_ms,
        ..SessionOpts::default()
    };
    let surface = SimulatedSurface::new(
        args.duration,
        args.container.width.round() as u32,
        args.container.height.round() as u32,
    );
    let mut player = TourPlayer::with_parts(
        surface,
        TraceLog::default(),
        vidtour::BlobUrlRegistry::new(),
        opts,
    );
    player.load_source(Some(VideoSource::Url(format!(
        "simulated://{}",
        args.in_path.display()
    ))))?;
    player.load_tutorial(Some(data));

    let tick = Duration::from_millis(args.tick_ms);
    let budget = Duration::from_secs_f64(args.duration)
        + Duration::from_millis((args.dwell_ms + args.settle_ms + 2 * args.tick_ms) * total_areas)
        + Duration::from_secs(1);

    let mut now = Duration::ZERO;
    let mut shown: Option<(String, Duration)> = None;
    player.start();
    loop {
        now += tick;
        let events = player.surface_mut().advance(tick.as_secs_f64());
        for ev in events {
            player.handle_surface_event(ev);
        }
        player.advance_clock(now);

        match player.overlay(args.container) {
            OverlayView::Active(active) => {
                if active.bubble == BubbleState::Measuring
                    && let Some(p) = player.report_bubble_size(args.bubble)
                {
                    emit(
                        &player,
                        json!({
                            "event": "bubble_placed",
                            "stop": active.stop_id,
                            "area": active.area_id,
                            "text": active.text,
                            "placement": p,
                        }),
                    );
                }
                let key = format!("{}/{}", active.stop_id, active.area_id);
                if !active.closing {
                    let since = match &shown {
                        Some((k, since)) if *k == key => *since,
                        _ => {
                            shown = Some((key, now));
                            now
                        }
                    };
                    if now.saturating_sub(since) >= Duration::from_millis(args.dwell_ms) {
                        match active.highlight.as_ref() {
                            Some(h) if active.click_to_advance => {
                                player.click(h.bounds().center(), args.container);
                            }
                            _ => player.press_next(),
                        }
                    }
                }
            }
            OverlayView::Finished => {
                flush(&mut player);
                return Ok(());
            }
            OverlayView::Unavailable(reason) => anyhow::bail!("cannot render: {reason}"),
            OverlayView::Idle | OverlayView::Hidden => {}
        }
        flush(&mut player);

        if now > budget {
            anyhow::bail!("simulation did not finish within {:.1}s", budget.as_secs_f64());
        }
    }
}

fn emit(player: &TourPlayer<SimulatedSurface, TraceLog>, mut line: serde_json::Value) {
    let t = player.state().map_or(0.0, |s| s.current_time);
    line["t"] = json!(t);
    println!("{line}");
}

fn flush(player: &mut TourPlayer<SimulatedSurface, TraceLog>) {
    let lines = std::mem::take(&mut player.callbacks_mut().pending);
    for line in lines {
        emit(player, line);
    }
}
