use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wraster::{Color, EngineConfig, Filter, FlipMode, GradientStyle, ImageEngine, RImage};

#[derive(Parser, Debug)]
#[command(name = "wraster", version)]
struct Cli {
    /// Engine configuration JSON (cache sizing, filter, fallback decoding).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print format and geometry of an image as JSON.
    Info(InfoArgs),
    /// Load, optionally transform, and save an image.
    Convert(ConvertArgs),
    /// Render a gradient into a file.
    Gradient(GradientArgs),
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// Image to inspect.
    path: PathBuf,

    /// Frame index for multi-frame containers.
    #[arg(long, default_value_t = 0)]
    index: usize,
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output image.
    #[arg(long)]
    out: PathBuf,

    /// Output format (XPM, PNG, JPEG). Defaults to the output extension.
    #[arg(long)]
    format: Option<String>,

    /// Frame index for multi-frame containers.
    #[arg(long, default_value_t = 0)]
    index: usize,

    /// Resize to WIDTHxHEIGHT.
    #[arg(long, value_parser = parse_size)]
    scale: Option<(u32, u32)>,

    /// Use filtered resampling instead of nearest neighbour.
    #[arg(long)]
    smooth: bool,

    /// Resampling filter for --smooth.
    #[arg(long)]
    filter: Option<Filter>,

    /// Rotate clockwise by this many degrees.
    #[arg(long)]
    rotate: Option<f64>,

    /// Mirror the image (h, v or hv).
    #[arg(long)]
    flip: Option<FlipMode>,

    /// Title embedded by formats that support one.
    #[arg(long)]
    title: Option<String>,
}

#[derive(Parser, Debug)]
struct GradientArgs {
    /// Output image.
    #[arg(long)]
    out: PathBuf,

    /// Output format. Defaults to the output extension.
    #[arg(long)]
    format: Option<String>,

    /// Width in pixels.
    #[arg(long)]
    width: u32,

    /// Height in pixels.
    #[arg(long)]
    height: u32,

    /// First color (#rrggbb).
    #[arg(long)]
    from: Color,

    /// Last color (#rrggbb).
    #[arg(long)]
    to: Color,

    /// Intermediate stops, in order.
    #[arg(long)]
    via: Vec<Color>,

    /// horizontal, vertical or diagonal.
    #[arg(long, default_value = "horizontal")]
    style: GradientStyle,
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
    let h = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
    Ok((w, h))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut engine = make_engine(cli.config.as_deref())?;
    match cli.cmd {
        Command::Info(args) => cmd_info(&mut engine, args),
        Command::Convert(args) => cmd_convert(&mut engine, args),
        Command::Gradient(args) => cmd_gradient(&mut engine, args),
    }
}

fn make_engine(config: Option<&Path>) -> anyhow::Result<ImageEngine> {
    let Some(path) = config else {
        return Ok(ImageEngine::from_env());
    };
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    let cfg = EngineConfig::from_json_str(&src)
        .with_context(|| format!("parse config '{}'", path.display()))?;
    Ok(ImageEngine::new(cfg))
}

fn format_for(explicit: Option<&str>, out: &Path) -> String {
    if let Some(f) = explicit {
        return f.to_string();
    }
    out.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_uppercase)
        .unwrap_or_else(|| "PNG".to_string())
}

fn save(
    engine: &mut ImageEngine,
    img: &RImage,
    out: &Path,
    format: Option<&str>,
    title: Option<&str>,
) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let format = format_for(format, out);
    engine
        .save(img, out, &format, title)
        .with_context(|| format!("write {format} '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_info(engine: &mut ImageEngine, args: InfoArgs) -> anyhow::Result<()> {
    let format = engine.image_file_format(&args.path);
    let img = engine
        .load(&args.path, args.index)
        .with_context(|| format!("load '{}'", args.path.display()))?;
    let info = serde_json::json!({
        "path": args.path.display().to_string(),
        "format": format,
        "width": img.width(),
        "height": img.height(),
        "alpha": img.has_alpha(),
        "background": img.background.to_hex(),
    });
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

fn cmd_convert(engine: &mut ImageEngine, args: ConvertArgs) -> anyhow::Result<()> {
    let mut img = engine
        .load(&args.in_path, args.index)
        .with_context(|| format!("load '{}'", args.in_path.display()))?;

    if let Some(filter) = args.filter {
        engine.set_filter(filter);
    }
    if let Some((w, h)) = args.scale {
        img = if args.smooth {
            engine.smooth_scale(&img, w, h)?
        } else {
            wraster::scale(&img, w, h)?
        };
    }
    if let Some(degrees) = args.rotate {
        img = wraster::rotate(&img, degrees)?;
    }
    if let Some(mode) = args.flip {
        img = wraster::flip(&img, mode)?;
    }

    save(
        engine,
        &img,
        &args.out,
        args.format.as_deref(),
        args.title.as_deref(),
    )
}

fn cmd_gradient(engine: &mut ImageEngine, args: GradientArgs) -> anyhow::Result<()> {
    let img = if args.via.is_empty() {
        wraster::render_gradient(args.width, args.height, args.from, args.to, args.style)?
    } else {
        let mut stops = vec![args.from];
        stops.extend(args.via.iter().copied());
        stops.push(args.to);
        wraster::render_multi_gradient(args.width, args.height, &stops, args.style)?
    };
    save(engine, &img, &args.out, args.format.as_deref(), None)
}
