//! Command line preview for pattern-composer documents
//!
//! Decodes a pattern (JSON file, or `-` for stdin) and either prints frames,
//! writes a thumbnail GIF, prints the canonical encoding, or plays the
//! pattern live in a true-color terminal.

use std::{
    io::{Read, Write},
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration as StdDuration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use pattern_composer::{
    Duration, Frame, FrameScheduler, Instant, OutputDriver, Painter, PainterConfig,
    PatternChannel, PatternRegistry, PatternSlot, Rgb, ThumbnailCache, ThumbnailConfig,
    encoding::encode_string, to_base64_url,
};

/// Pattern channel size
const CHANNEL_SIZE: usize = 4;

static PATTERNS: PatternChannel<CHANNEL_SIZE> = PatternChannel::new();

#[derive(Parser, Debug)]
#[command(name = "pattern-composer-preview", version)]
struct Cli {
    /// Log decoding and cache activity to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print rendered frames as `L` + hex lines.
    Frames(FramesArgs),
    /// Write a looping GIF thumbnail.
    Thumbnail(ThumbnailArgs),
    /// Print the canonical encoding.
    Canonical(CanonicalArgs),
    /// Check the pattern tree for structural problems.
    Validate(ValidateArgs),
    /// Play the pattern in the terminal.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Input pattern JSON (`-` for stdin).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Number of LEDs.
    #[arg(long, default_value_t = 30)]
    leds: usize,

    /// Time of the first frame, in milliseconds.
    #[arg(long, default_value_t = 0)]
    start_ms: u64,

    /// Time between frames, in milliseconds.
    #[arg(long, default_value_t = 100)]
    step_ms: u64,

    /// Number of frames.
    #[arg(long, default_value_t = 10)]
    count: u64,
}

#[derive(Parser, Debug)]
struct ThumbnailArgs {
    /// Input pattern JSON (`-` for stdin).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    /// Number of LEDs (image width).
    #[arg(long)]
    leds: Option<usize>,

    /// Frames per second.
    #[arg(long)]
    hz: Option<u32>,

    /// Animation length in seconds.
    #[arg(long)]
    seconds: Option<u64>,
}

#[derive(Parser, Debug)]
struct CanonicalArgs {
    /// Input pattern JSON (`-` for stdin).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Wrap the output in URL-safe base64.
    #[arg(long, default_value_t = false)]
    base64: bool,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input pattern JSON (`-` for stdin).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Number of LEDs.
    #[arg(long, default_value_t = 100)]
    leds: usize,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input pattern JSON (`-` for stdin).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Number of LEDs.
    #[arg(long, default_value_t = 60)]
    leds: usize,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u64,

    /// Stop after this many seconds.
    #[arg(long, default_value_t = 10)]
    seconds: u64,

    /// Fade in from black instead of cutting.
    #[arg(long, default_value_t = false)]
    fade: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let registry = PatternRegistry::with_builtin();
    match cli.cmd {
        Command::Frames(args) => cmd_frames(&registry, &args),
        Command::Thumbnail(args) => cmd_thumbnail(registry, &args),
        Command::Canonical(args) => cmd_canonical(&registry, &args),
        Command::Validate(args) => cmd_validate(&registry, &args),
        Command::Play(args) => cmd_play(&registry, &args),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .context("read stdin")?;
        return Ok(bytes);
    }
    std::fs::read(path).with_context(|| format!("read pattern '{}'", path.display()))
}

fn load(registry: &PatternRegistry, path: &Path) -> anyhow::Result<PatternSlot> {
    let bytes = read_input(path)?;
    registry
        .decode(&bytes)
        .with_context(|| format!("decode pattern '{}'", path.display()))
}

fn cmd_frames(registry: &PatternRegistry, args: &FramesArgs) -> anyhow::Result<()> {
    let mut pattern = load(registry, &args.in_path)?;
    let mut leds = Frame::new(args.leds);
    let mut out = std::io::stdout().lock();
    for index in 0..args.count {
        let now_ms = args.start_ms + index * args.step_ms;
        pattern.render(Instant::from_millis(now_ms), &mut leds);
        writeln!(out, "{now_ms:>8} {}", leds.to_hex())?;
    }
    Ok(())
}

fn cmd_thumbnail(registry: PatternRegistry, args: &ThumbnailArgs) -> anyhow::Result<()> {
    let defaults = ThumbnailConfig::default();
    let config = ThumbnailConfig {
        num_leds: args.leds.unwrap_or(defaults.num_leds),
        hz: args.hz.unwrap_or(defaults.hz),
        duration: args
            .seconds
            .map_or(defaults.duration, Duration::from_secs),
    };
    let bytes = read_input(&args.in_path)?;
    let cache = ThumbnailCache::new(Arc::new(registry), config);
    let thumbnail = cache.get_or_render(&bytes)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &thumbnail.gif)
        .with_context(|| format!("write gif '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} frames)",
        args.out.display(),
        config.frame_count()
    );
    Ok(())
}

fn cmd_canonical(registry: &PatternRegistry, args: &CanonicalArgs) -> anyhow::Result<()> {
    let pattern = load(registry, &args.in_path)?;
    let canonical = encode_string(&pattern)?;
    let mut out = std::io::stdout().lock();
    if args.base64 {
        writeln!(out, "{}", to_base64_url(canonical.as_bytes()))?;
    } else {
        writeln!(out, "{canonical}")?;
    }
    Ok(())
}

fn cmd_validate(registry: &PatternRegistry, args: &ValidateArgs) -> anyhow::Result<()> {
    let pattern = load(registry, &args.in_path)?;
    pattern.validate(args.leds)?;
    writeln!(
        std::io::stdout().lock(),
        "ok: {} on {} LEDs",
        pattern.kind().as_str(),
        args.leds
    )?;
    Ok(())
}

/// Draws frames as rows of true-color blocks
struct TerminalDriver<W: Write> {
    out: W,
}

impl<W: Write> OutputDriver for TerminalDriver<W> {
    fn write(&mut self, colors: &[Rgb]) {
        let mut line = String::with_capacity(colors.len() * 20 + 8);
        line.push('\r');
        for color in colors {
            line.push_str(&format!("\x1b[38;2;{};{};{}m█", color.r, color.g, color.b));
        }
        line.push_str("\x1b[0m");
        if let Err(err) = self.out.write_all(line.as_bytes()).and_then(|()| self.out.flush()) {
            tracing::warn!(%err, "terminal write failed");
        }
    }
}

fn cmd_play(registry: &PatternRegistry, args: &PlayArgs) -> anyhow::Result<()> {
    let pattern = load(registry, &args.in_path)?;
    let config = PainterConfig {
        num_leds: args.leds,
        ..PainterConfig::default()
    };

    let sender = PATTERNS.sender();
    let start = Instant::now();
    let mut painter = Painter::new(PATTERNS.receiver(), &config);
    if args.fade {
        painter.cut_to(pattern_composer::pattern::StaticColor::new(Rgb::default()).into(), start);
        sender
            .fade_to(pattern)
            .map_err(|_| anyhow::anyhow!("pattern channel is full"))?;
    } else {
        sender
            .cut_to(pattern)
            .map_err(|_| anyhow::anyhow!("pattern channel is full"))?;
    }

    let frame_duration = Duration::from_millis(1000 / args.fps.max(1));
    let driver = TerminalDriver {
        out: std::io::stdout().lock(),
    };
    let mut scheduler = FrameScheduler::with_frame_duration(painter, driver, frame_duration);
    let end = start + Duration::from_secs(args.seconds);
    loop {
        let now = Instant::now();
        if now >= end {
            break;
        }
        let result = scheduler.tick(now);
        std::thread::sleep(StdDuration::from_millis(result.sleep_duration.as_millis()));
    }

    let mut out = scheduler.into_output().out;
    writeln!(out)?;
    Ok(())
}
