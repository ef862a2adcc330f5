use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "flipbook", version)]
struct Cli {
    /// Log progress (repeat for debug output).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report which candidate base path serves the sequence.
    Probe(ProbeArgs),
    /// Play the sequence headlessly, writing one PNG per tick.
    Play(PlayArgs),
    /// Print the cover fit of an image onto a surface.
    Fit(FitArgs),
}

#[derive(Parser, Debug)]
struct ProbeArgs {
    /// Directory the frame URLs are relative to.
    #[arg(long)]
    root: PathBuf,

    /// JSON config overriding the defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Directory the frame URLs are relative to.
    #[arg(long)]
    root: PathBuf,

    /// Output directory for tick PNGs.
    #[arg(long)]
    out: PathBuf,

    /// JSON config overriding the defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Surface width in pixels.
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Surface height in pixels.
    #[arg(long, default_value_t = 360)]
    height: u32,

    /// Simulated display refresh rate.
    #[arg(long, default_value_t = 60.0)]
    refresh_hz: f64,

    /// Stop after this many refreshes.
    #[arg(long)]
    max_refreshes: Option<u64>,
}

#[derive(Parser, Debug)]
struct FitArgs {
    /// Image size as WxH.
    #[arg(long)]
    image: String,

    /// Surface size as WxH.
    #[arg(long)]
    surface: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Probe(args) => cmd_probe(args),
        Command::Play(args) => cmd_play(args),
        Command::Fit(args) => cmd_fit(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<flipbook::FlipbookConfig> {
    match path {
        Some(p) => Ok(flipbook::FlipbookConfig::from_json_file(p)?),
        None => Ok(flipbook::FlipbookConfig::default()),
    }
}

fn cmd_probe(args: ProbeArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    cfg.validate()?;

    let host = flipbook::FsAssetHost::new(&args.root);
    let sequence = flipbook::FrameSequence::from_config(&cfg);
    let resolved = flipbook::detect_base(&host, &sequence, &cfg.bases)?;

    println!("{}", resolved.base);
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let size = flipbook::SurfaceSize::new(args.width, args.height);
    let surface = flipbook::PixmapSurface::new(size, cfg.clear_rgba)?;

    let mut player = flipbook::FramePlayer::mount(Some(&size), surface, cfg)?
        .context("player did not mount")?;

    let host = flipbook::FsAssetHost::new(&args.root);
    let summary = player.load(&host, |s| {
        tracing::info!(loaded = s.loaded, total = s.total, "frames ready");
    })?;
    if !summary.failed.is_empty() {
        eprintln!(
            "warning: {} of {} frames failed to load",
            summary.failed.len(),
            summary.total
        );
    }

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    let mut driver = flipbook::RefreshDriver::new(args.refresh_hz)?;
    if let Some(max) = args.max_refreshes {
        driver = driver.with_max_refreshes(max);
    }

    let out_dir = args.out.clone();
    let stats = driver.run(&mut player, 0.0, |frame, surface| {
        let path = out_dir.join(format!("tick_{frame:03}.png"));
        surface
            .to_rgba_image()?
            .save_with_format(&path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    })?;

    println!(
        "base={} refreshes={} ticks={} waits={} last_frame={} phase={:?}",
        player.base().map(|b| b.base.as_str()).unwrap_or("-"),
        stats.refreshes,
        stats.ticks,
        stats.waits,
        stats
            .last_frame
            .map(|f| f.to_string())
            .unwrap_or_else(|| "-".to_string()),
        player.phase(),
    );
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_fit(args: FitArgs) -> anyhow::Result<()> {
    let image = flipbook::SurfaceSize::parse(&args.image)?;
    let surface = flipbook::SurfaceSize::parse(&args.surface)?;
    let fit = flipbook::cover_fit(image, surface)
        .with_context(|| format!("no cover fit for image {image} on surface {surface}"))?;

    println!(
        "ratio={} size={}x{} offset=({}, {})",
        fit.ratio, fit.size.width, fit.size.height, fit.offset.x, fit.offset.y
    );
    Ok(())
}
