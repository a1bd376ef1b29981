//! refs command: Export the reference table as references.yaml
//!
//! Scans documents the same way `optimize` does and writes every cited URL,
//! numbered in order of first appearance across all inputs.

use crate::error::Error;
use crate::files::{expand_inputs, read_input, write_output};
use crate::optimize::{optimize_with, OptimizeOptions};
use crate::schema::ReferencesFile;
use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct RefsArgs {
    /// Files, glob patterns or directories to scan (`-` for stdin)
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Output file (`-` for stdout)
    #[arg(short, long, default_value = "references.yaml")]
    pub output: PathBuf,

    /// Ignore #anchors when deduplicating URLs
    #[arg(long)]
    pub strip_anchors: bool,
}

#[derive(Debug, Serialize)]
pub struct RefsOutput {
    pub file: String,
    pub scanned_files: usize,
    pub total_urls: usize,
}

pub async fn run_refs(args: RefsArgs) -> Result<()> {
    let inputs = expand_inputs(&args.inputs).await?;

    if inputs.is_empty() {
        return Err(Error::NoInputs.into());
    }

    let options = OptimizeOptions {
        strip_fragments: args.strip_anchors,
        ..OptimizeOptions::default()
    };

    let mut refs_file = ReferencesFile::new(Utc::now().format("%Y-%m-%d").to_string());
    for input in &inputs {
        let content = read_input(input).await?;
        let optimized = optimize_with(&content, &options);
        refs_file.add_document(&input.to_string(), &optimized.references);
    }

    let yaml = refs_file.to_yaml()?;
    write_output(&args.output, &yaml)
        .await
        .with_context(|| format!("Failed to export references to {}", args.output.display()))?;

    let output = RefsOutput {
        file: args.output.display().to_string(),
        scanned_files: inputs.len(),
        total_urls: refs_file.meta.total_links,
    };
    let json = serde_json::to_string(&output)?;

    if args.output == Path::new("-") {
        eprintln!("{}", json);
    } else {
        println!("{}", json);
    }

    Ok(())
}
