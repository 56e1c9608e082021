use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sha2::Digest as _;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

use folio::render::text::TextLayoutEngine;
use folio::shell::view::{self, ProjectFilter};
use folio::{
    AnimationConfig, AnimationEngine, Canvas, ContentDocument, CpuRenderer, EncodeConfig,
    FfmpegSink, FrameSink, Fps, Locale, PngSequenceSink, RenderSettings, Rng64, TickInput,
    Variant,
};

#[derive(Parser, Debug)]
#[command(name = "folio", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export the resume as a PDF.
    Export(ExportArgs),
    /// Render the walker animation as a PNG sequence.
    Frames(FramesArgs),
    /// Render the walker animation as an MP4 (requires `ffmpeg` on PATH).
    Video(VideoArgs),
    /// Print the shell's view of a content document.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Content document JSON.
    #[arg(long)]
    content: PathBuf,

    /// Output locale.
    #[arg(long, default_value = "en")]
    lang: Locale,

    /// `short` or `long`.
    #[arg(long, default_value = "short")]
    variant: Variant,

    /// Directory the PDF is written into.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct AnimationArgs {
    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Number of ticks to render.
    #[arg(long, default_value_t = 120)]
    frames: u64,

    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Use the dark palette.
    #[arg(long)]
    dark: bool,

    /// Seed for the walker's random source. Clock-seeded when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Font file for the status panel text. Text is skipped without one.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Animation tuning as JSON. Missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    anim: AnimationArgs,

    /// Directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct VideoArgs {
    #[command(flatten)]
    anim: AnimationArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Replace an existing output file.
    #[arg(long)]
    overwrite: bool,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    #[arg(long)]
    content: PathBuf,

    #[arg(long, default_value = "en")]
    lang: Locale,

    /// `all` or a project category.
    #[arg(long, default_value = "all")]
    filter: ProjectFilter,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Export(args) => cmd_export(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Video(args) => cmd_video(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn read_content(path: &Path) -> anyhow::Result<ContentDocument> {
    ContentDocument::from_path(path)
        .with_context(|| format!("load content '{}'", path.display()))
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let doc = read_content(&args.content)?;
    let exported = folio::export_resume(&doc, args.lang, args.variant)?;
    let path = exported.write_to_dir(&args.out_dir)?;
    eprintln!("wrote {} ({} pages)", path.display(), exported.pages);
    println!("{}", sha256_hex(&exported.bytes));
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let mut sink = PngSequenceSink::new(&args.out_dir);
    render_animation(&args.anim, &mut sink)?;
    eprintln!(
        "wrote {} frames to {}",
        sink.written().len(),
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_video(args: VideoArgs) -> anyhow::Result<()> {
    if !folio::encode::ffmpeg::is_ffmpeg_on_path() {
        anyhow::bail!("ffmpeg not found on PATH");
    }
    let mut cfg = EncodeConfig::new(&args.out);
    cfg.overwrite = args.overwrite;
    let mut sink = FfmpegSink::new(cfg);
    render_animation(&args.anim, &mut sink)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn render_animation(args: &AnimationArgs, sink: &mut dyn FrameSink) -> anyhow::Result<()> {
    let cfg = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("read animation config '{}'", path.display()))?;
            AnimationConfig::from_json_str(&json)?
        }
        None => AnimationConfig::default(),
    };
    let input = TickInput {
        viewport: Canvas {
            width: args.width,
            height: args.height,
        },
        dark: args.dark,
    };
    let fps = Fps::new(args.fps, 1)?;

    let settings = RenderSettings {
        clear_rgba: Some(if args.dark {
            [15, 23, 42, 255]
        } else {
            [255, 247, 237, 255]
        }),
        font_path: None,
    };
    let mut renderer = CpuRenderer::new(settings)?;
    if let Some(font) = &args.font {
        let engine = TextLayoutEngine::from_path(font)
            .with_context(|| format!("load font '{}'", font.display()))?;
        eprintln!(
            "font family={} sha256={}",
            engine.family_name(),
            sha256_hex(engine.font().data.data())
        );
        renderer = renderer.with_text_engine(engine);
    }

    let rng = match args.seed {
        Some(seed) => Rng64::new(seed),
        None => Rng64::from_clock(),
    };
    let mut engine = AnimationEngine::with_rng(cfg, input, rng);
    engine.run(args.frames, input, fps, &mut renderer, sink)?;
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let doc = read_content(&args.content)?;
    let locale = args.lang;
    let label = |key: &str, fallback: &'static str| -> String {
        view::ui(&doc, key, locale).unwrap_or(fallback).to_string()
    };

    println!("{} | {}", doc.profile.name, doc.profile.role.get(locale));
    println!("{}", doc.profile.tagline.get(locale));
    for s in &doc.profile.socials {
        println!(
            "  [{}] {} {}",
            view::social_icon(&s.icon_name).as_str(),
            s.network,
            s.url
        );
    }

    println!("\n{}", label("history", "History"));
    for h in &doc.history {
        println!("  {}  {} @ {}", h.year, h.title.get(locale), h.institution);
    }

    let cats: Vec<_> = view::categories(&doc)
        .iter()
        .map(ToString::to_string)
        .collect();
    println!(
        "\n{} [{}] filter={}",
        label("projects", "Projects"),
        cats.join(", "),
        args.filter
    );
    for p in view::filtered_projects(&doc, args.filter) {
        println!(
            "  {} ({}) {}",
            p.title.get(locale),
            p.category.as_str(),
            p.technologies.join(", ")
        );
    }

    println!("\n{}", label("papers", "Publications"));
    for p in &doc.publications {
        println!("  [{}] {}. {}. {}.", p.year, p.title, view::author_line(p), p.venue);
        if let Some(url) = view::doi_url(p) {
            println!("      {url}");
        }
    }
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        use std::fmt::Write as _;
        let _ = write!(out, "{b:02x}");
    }
    out
}
