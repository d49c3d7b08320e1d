use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use petpet::{
    AvatarData, AvatarModel, AvatarSource, PipelineConfig, Placement, RgbaImage, TemplateType,
    WorkerPool, blit_over, decode_path,
};

#[derive(Parser, Debug)]
#[command(name = "petpet", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw one output frame as a PNG.
    Frame(FrameArgs),
    /// Print the resolved placement as JSON.
    Inspect(InspectArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TemplateArg {
    Gif,
    Img,
}

impl From<TemplateArg> for TemplateType {
    fn from(t: TemplateArg) -> Self {
        match t {
            TemplateArg::Gif => TemplateType::Gif,
            TemplateArg::Img => TemplateType::Img,
        }
    }
}

#[derive(Parser, Debug)]
struct ModelArgs {
    /// Avatar image or GIF.
    #[arg(long)]
    avatar: PathBuf,

    /// Avatar entry JSON.
    #[arg(long)]
    spec: PathBuf,

    /// Pipeline config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Template type.
    #[arg(long, value_enum, default_value_t = TemplateArg::Img)]
    template: TemplateArg,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    model: ModelArgs,

    /// Canvas size as WxH. Defaults to the background size.
    #[arg(long, value_parser = parse_size)]
    canvas: Option<(u32, u32)>,

    /// Output frame index (0-based).
    #[arg(long, default_value_t = 0)]
    index: usize,

    /// Scale applied to placement coordinates.
    #[arg(long, default_value_t = 1.0)]
    multiple: f32,

    /// Background image; its first frame is the canvas.
    #[arg(long)]
    background: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    #[command(flatten)]
    model: ModelArgs,
}

#[derive(serde::Serialize)]
struct InspectReport<'a> {
    frames: usize,
    width: u32,
    height: u32,
    placement: &'a Placement,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{s}'"))?;
    let w = w.trim().parse::<u32>().map_err(|e| format!("width: {e}"))?;
    let h = h.trim().parse::<u32>().map_err(|e| format!("height: {e}"))?;
    if w == 0 || h == 0 {
        return Err(format!("canvas must be non-empty, got '{s}'"));
    }
    Ok((w, h))
}

fn read_to_string(path: &Path, what: &str) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read {what} '{}'", path.display()))
}

fn build_model(args: &ModelArgs) -> anyhow::Result<AvatarModel> {
    let data = AvatarData::from_json(&read_to_string(&args.spec, "avatar spec")?)?;
    let config = match &args.config {
        Some(path) => PipelineConfig::from_json(&read_to_string(path, "pipeline config")?)?,
        None => PipelineConfig::default(),
    };
    let source = AvatarSource::new(decode_path(&args.avatar)?)?;

    let owned;
    let pool = match config.threads {
        Some(n) => {
            owned = WorkerPool::new(Some(n))?;
            &owned
        }
        None => WorkerPool::shared()?,
    };
    Ok(AvatarModel::build(
        &data,
        source,
        args.template.into(),
        &config,
        pool,
    )?)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let model = build_model(&args.model)?;

    let background = match &args.background {
        Some(path) => decode_path(path)?.into_iter().next(),
        None => None,
    };
    let (w, h) = match (args.canvas, &background) {
        (Some(size), _) => size,
        (None, Some(bg)) => bg.dimensions(),
        (None, None) => anyhow::bail!("either --canvas or --background is required"),
    };

    let mut canvas = RgbaImage::new(w, h);
    match &background {
        Some(bg) if model.is_on_top() => {
            blit_over(&mut canvas, bg, 0, 0, 1.0);
            model.draw_onto(&mut canvas, args.index, args.multiple)?;
        }
        Some(bg) => {
            model.draw_onto(&mut canvas, args.index, args.multiple)?;
            blit_over(&mut canvas, bg, 0, 0, 1.0);
        }
        None => model.draw_onto(&mut canvas, args.index, args.multiple)?,
    }

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        canvas.as_raw(),
        w,
        h,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let model = build_model(&args.model)?;
    let report = InspectReport {
        frames: model.frame_count(),
        width: model.image_width(),
        height: model.image_height(),
        placement: model.placement(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
