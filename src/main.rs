//! ref-optimize CLI
//!
//! Replaces links in markdown with numbered citations and a references
//! section, cutting the tokens an LLM has to read.

use anyhow::Result;
use clap::{Parser, Subcommand};

use ref_optimize::refs::{run_refs, RefsArgs};
use ref_optimize::rewrite::{run_optimize, OptimizeArgs};

#[derive(Parser)]
#[command(name = "ref-optimize")]
#[command(author = "RoyalBit Inc.")]
#[command(version)]
#[command(about = "Replace links with numbered citations to cut LLM tokens")]
#[command(long_about = "Replace links with numbered citations to cut LLM tokens.\n\nCommands:\n  optimize   Rewrite links as [N] citations with a references section\n  refs       Export cited URLs as references.yaml")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite links as [N] citations and append a references section
    Optimize(OptimizeArgs),
    /// Export the cited URLs of one or more documents as YAML
    Refs(RefsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Optimize(args) => run_optimize(args).await,
        Commands::Refs(args) => run_refs(args).await,
    }
}
