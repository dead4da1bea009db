use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use medvis_core::config::MedvisConfig;
use medvis_core::run::ProcessingStatus;
use medvis_core::sequencer::Sequencer;
use medvis_core::upload::SelectedFile;

use crate::summary::{print_findings, print_process_summary};

/// Longest silence tolerated between two updates of a run.
const STALL_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Args)]
pub struct ProcessArgs {
    /// Input image file
    pub file: PathBuf,

    /// Config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Fixed seed for anomaly placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// TrueType font for the finding labels
    #[arg(long)]
    pub label_font: Option<PathBuf>,

    /// Cut every delay to a millisecond
    #[arg(long)]
    pub fast: bool,

    /// Output file path
    #[arg(short, long, default_value = "derived.png")]
    pub output: PathBuf,
}

pub fn run(args: &ProcessArgs) -> Result<()> {
    let config = load_config(args)?;
    let file = SelectedFile::from_path(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    print_process_summary(&args.file, &args.output, &config);

    let mut sequencer = Sequencer::scripted(&config).context("Invalid pipeline config")?;
    sequencer.submit(file)?;

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:36} [{bar:40}] {pos}%")?
            .progress_chars("=> "),
    );

    while sequencer.is_running() {
        let Some(update) = sequencer.wait_update(STALL_TIMEOUT) else {
            pb.abandon_with_message("Stalled");
            bail!("No progress for {}s", STALL_TIMEOUT.as_secs());
        };
        pb.set_message(update.message.clone());
        pb.set_position(update.progress as u64);
    }

    let run = sequencer.run();
    if run.status != ProcessingStatus::Success {
        pb.abandon_with_message(run.message.clone());
        let reason = run.failure.as_deref().unwrap_or("unknown error");
        bail!("{} ({})", run.message, reason);
    }
    pb.finish_with_message(run.message.clone());

    let Some(derived) = sequencer.derived() else {
        bail!("Run finished without a processed image");
    };
    derived
        .save_png(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!(output = %args.output.display(), findings = derived.findings().len(), "processed image saved");

    print_findings(derived.findings());
    println!("\nOutput saved to {}", args.output.display());

    Ok(())
}

fn load_config(args: &ProcessArgs) -> Result<MedvisConfig> {
    let mut config = if let Some(ref config_path) = args.config {
        MedvisConfig::load(config_path)
            .with_context(|| format!("Failed to load config {}", config_path.display()))?
    } else {
        MedvisConfig::default()
    };

    if args.fast {
        config = config.fast();
    }
    if let Some(seed) = args.seed {
        config.pipeline.overlay.seed = Some(seed);
    }
    if let Some(ref font) = args.label_font {
        config.pipeline.overlay.label_font = Some(font.clone());
    }
    config.validate().context("Invalid pipeline config")?;

    Ok(config)
}
