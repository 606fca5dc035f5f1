use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use bdnsub::{
    BDN_FILE_NAME, FrameRate, Manifest, ManifestMeta, PngDirSink, RenderSession, RenderSessionOpts,
    SvgRasterizer, SvgRasterizerOpts, TextStyle, VideoFormat, write_bdn_xml_file,
};

/// Render a subtitle file into PNG event images and a BDN XML manifest.
#[derive(Parser, Debug)]
#[command(name = "bdnsub", version)]
struct Cli {
    /// Input subtitle file (SubRip or ASS/SSA).
    subtitle_file: PathBuf,

    /// Track title written into the manifest.
    #[arg(short = 't', long, default_value = "Undefined")]
    trackname: String,

    /// Language code written into the manifest.
    #[arg(short = 'l', long, default_value = "und")]
    language: String,

    /// Output video format: 1080p, 1080i, 720p, 576i, 480p or 480i.
    #[arg(short = 'v', long, default_value = "1080p")]
    video_format: VideoFormat,

    /// Frame rate: 23.976, 24, 25, 29.97, 50 or 59.94.
    #[arg(short = 'f', long, default_value = "23.976")]
    fps: FrameRate,

    /// Quantize transparency for disc players.
    #[arg(short = 'd', long, default_value_t = false)]
    dvd_mode: bool,

    /// Directory receiving the images and bdn.xml.
    #[arg(short = 'o', long, default_value = ".")]
    out_dir: PathBuf,

    /// Extra directory of font files.
    #[arg(long)]
    font_dir: Option<PathBuf>,

    /// Font family used for subtitle text.
    #[arg(long)]
    font_family: Option<String>,

    /// Also write the manifest as JSON to this path.
    #[arg(long)]
    manifest_json: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut style = TextStyle::default();
    if let Some(family) = cli.font_family.clone() {
        style.font_family = family;
    }
    let raster_opts = SvgRasterizerOpts {
        style,
        font_dir: cli.font_dir.clone(),
        system_fonts: true,
    };

    let opts = RenderSessionOpts {
        video_format: cli.video_format,
        frame_rate: cli.fps,
        disc_mode: cli.dvd_mode,
    };

    let rasterizer = SvgRasterizer::open(&cli.subtitle_file, opts.video_format.canvas(), raster_opts)
        .with_context(|| format!("open subtitle file '{}'", cli.subtitle_file.display()))?;
    let mut sink = PngDirSink::new(&cli.out_dir)?;

    let output = RenderSession::new(rasterizer, opts).run(&mut sink)?;

    let meta = ManifestMeta {
        track_name: cli.trackname,
        language: cli.language,
        video_format: opts.video_format,
        frame_rate: opts.frame_rate,
    };
    let manifest = Manifest::build(&output.events, meta)?;

    let xml_path = cli.out_dir.join(BDN_FILE_NAME);
    write_bdn_xml_file(&manifest, &xml_path)?;
    if let Some(path) = &cli.manifest_json {
        manifest.write_json(path)?;
    }

    eprintln!(
        "wrote {} events ({} images) and {}",
        manifest.event_count(),
        sink.written(),
        xml_path.display()
    );
    if output.stats.encode_failures > 0 {
        eprintln!("{} images failed to encode", output.stats.encode_failures);
    }
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}
