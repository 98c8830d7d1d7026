use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "paperscribe", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one image per background in a directory.
    Batch(BatchArgs),
    /// Generate a single image from explicit inputs.
    One(OneArgs),
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// JSON generator config; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory of background photos.
    #[arg(long)]
    backgrounds: Option<PathBuf>,

    /// Directory of paper textures.
    #[arg(long)]
    papers: Option<PathBuf>,

    /// Corpus text file, one candidate per line.
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// TrueType/OpenType font.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Output directory.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Stop at the first failed image.
    #[arg(long)]
    fail_fast: bool,
}

#[derive(Args, Debug)]
struct OneArgs {
    #[arg(long)]
    background: PathBuf,

    #[arg(long)]
    paper: PathBuf,

    #[arg(long)]
    font: PathBuf,

    /// Text to write on the paper.
    #[arg(long, conflicts_with = "corpus", required_unless_present = "corpus")]
    text: Option<String>,

    /// Pick the text from this corpus file instead.
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// Output image; `.jpg`/`.jpeg` drops alpha.
    #[arg(long)]
    out: PathBuf,

    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Batch(args) => cmd_batch(args),
        Command::One(args) => cmd_one(args),
    }
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let mut cfg = match &args.config {
        Some(path) => paperscribe::GeneratorConfig::load(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => paperscribe::GeneratorConfig::default(),
    };
    if let Some(dir) = args.backgrounds {
        cfg.backgrounds_dir = dir;
    }
    if let Some(dir) = args.papers {
        cfg.papers_dir = dir;
    }
    if let Some(file) = args.corpus {
        cfg.corpus_file = file;
    }
    if let Some(file) = args.font {
        cfg.font_file = file;
    }
    if let Some(dir) = args.out {
        cfg.output_dir = dir;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    if args.fail_fast {
        cfg.keep_going = false;
    }

    let mut rng = paperscribe::rng_from_seed(cfg.seed);
    let report = paperscribe::run_batch(&cfg, &mut rng).context("run batch")?;

    for failure in report.failures() {
        if let paperscribe::ImageOutcome::Failed { background, reason } = failure {
            eprintln!("failed: {}: {reason}", background.display());
        }
    }
    println!("{report}");

    if !report.all_succeeded() {
        anyhow::bail!("{} image(s) failed", report.failed());
    }
    Ok(())
}

fn cmd_one(args: OneArgs) -> anyhow::Result<()> {
    let mut rng = paperscribe::rng_from_seed(args.seed);

    let text = match (args.text, &args.corpus) {
        (Some(text), _) => text,
        (None, Some(path)) => paperscribe::Corpus::load(path)
            .with_context(|| format!("load corpus '{}'", path.display()))?
            .pick(&mut rng),
        (None, None) => anyhow::bail!("one of --text or --corpus is required"),
    };

    let font = paperscribe::FontAsset::load(&args.font)
        .with_context(|| format!("load font '{}'", args.font.display()))?;
    let mut synth = paperscribe::Synthesizer::new(font, paperscribe::SynthParams::default())?;

    let generated = synth
        .generate_from_paths(&args.background, &args.paper, &text, &args.out, &mut rng)
        .with_context(|| format!("generate '{}'", args.out.display()))?;

    println!(
        "wrote {} ({} words, paper {}x{} at {},{} rotated {} deg)",
        args.out.display(),
        generated.words.len(),
        generated.paper_size.0,
        generated.paper_size.1,
        generated.placement.x,
        generated.placement.y,
        generated.placement.angle_deg,
    );
    Ok(())
}
