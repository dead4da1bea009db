use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use medvis_core::io::image_io::probe_dimensions;
use medvis_core::upload::{SelectedFile, UploadPolicy};

#[derive(Args)]
pub struct CheckArgs {
    /// Image file to validate
    pub file: PathBuf,

    /// Maximum accepted file size in MB
    #[arg(long, default_value = "10")]
    pub max_size_mb: u32,
}

pub fn run(args: &CheckArgs) -> Result<()> {
    let file = SelectedFile::from_path(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let policy = UploadPolicy {
        max_size_mb: args.max_size_mb,
        ..UploadPolicy::default()
    };

    println!("File:        {}", file.name);
    println!("Type:        {}", file.mime);
    println!("Size:        {:.2} MB", file.size() as f64 / (1024.0 * 1024.0));

    policy.validate(&file)?;

    let (width, height) = probe_dimensions(&file.bytes)?;
    println!("Dimensions:  {}x{}", width, height);
    println!("Status:      accepted");

    Ok(())
}
