use std::io::Write as _;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use shapes_morph::display::Viewport;
use shapes_morph::{IntervalClock, PlaybackConfig, Scheduler, SequenceStore};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "shapes-morph", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the builtin sequences.
    List,
    /// Play a sequence in the terminal.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Sequence name (unknown names fall back to "identity").
    sequence: Option<String>,

    /// Frame interval in milliseconds.
    #[arg(long)]
    interval: Option<u32>,

    /// Stop after this many seconds.
    #[arg(long, default_value_t = 10.0)]
    duration: f64,

    /// Playback config (TOML).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Viewport width in columns (defaults to $COLUMNS or 80).
    #[arg(long)]
    columns: Option<usize>,

    /// Viewport height in rows (defaults to $LINES or 24).
    #[arg(long)]
    rows: Option<usize>,

    /// Print telemetry when playback ends.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::List => cmd_list(),
        Command::Play(args) => cmd_play(args),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "shapes_morph=debug",
        _ => "shapes_morph=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_list() -> anyhow::Result<()> {
    let store = SequenceStore::builtin();
    for seq in store.iter() {
        let interval = seq
            .suggested_interval_ms()
            .map(|ms| format!("{ms}ms"))
            .unwrap_or_else(|| "-".to_string());
        println!("{:<12} {:>3} frames  {:>7}", seq.name(), seq.len(), interval);
    }
    Ok(())
}

fn env_dim(var: &str, fallback: usize) -> usize {
    std::env::var(var)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .filter(|&n: &usize| n > 0)
        .unwrap_or(fallback)
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => PlaybackConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => PlaybackConfig::default(),
    };
    anyhow::ensure!(
        args.duration.is_finite() && args.duration > 0.0,
        "duration must be a positive number of seconds"
    );

    let name = args.sequence.as_deref().unwrap_or_else(|| config.sequence());
    let store = SequenceStore::builtin();
    let interval = args
        .interval
        .or(config.interval_ms)
        .or_else(|| store.get_sequence(name).suggested_interval_ms())
        .unwrap_or_else(|| config.interval_ms());

    let viewport = Viewport::new(
        args.columns.unwrap_or_else(|| env_dim("COLUMNS", 80)),
        args.rows.unwrap_or_else(|| env_dim("LINES", 24)).saturating_sub(1),
    );
    let extent = store.get_sequence(name).max_dimensions();

    let mut scheduler = Scheduler::new(IntervalClock::new()).with_config(&config);
    scheduler.start(name, interval);
    if !scheduler.is_running() {
        anyhow::bail!("playback could not start");
    }

    let mut out = std::io::stdout().lock();
    paint(&mut out, &viewport, &scheduler, extent)?;

    let deadline = Instant::now() + Duration::from_secs_f64(args.duration);
    while Instant::now() < deadline {
        match scheduler.wait() {
            Some(true) => paint(&mut out, &viewport, &scheduler, extent)?,
            Some(false) => {}
            None => break,
        }
    }
    scheduler.stop();

    if args.stats {
        let t = scheduler.telemetry();
        writeln!(
            out,
            "fps {}  frame time {}ms  dropped {}  frames {}",
            t.fps, t.frame_time, t.dropped_frames, t.total_frames
        )?;
    }
    scheduler.dispose();
    Ok(())
}

fn paint(
    out: &mut impl std::io::Write,
    viewport: &Viewport,
    scheduler: &Scheduler<IntervalClock>,
    extent: (usize, usize),
) -> anyhow::Result<()> {
    // Clear screen and home the cursor
    write!(out, "\x1b[2J\x1b[H")?;
    writeln!(out, "{}", viewport.render(scheduler.current_frame_content(), Some(extent)))?;
    out.flush()?;
    Ok(())
}
