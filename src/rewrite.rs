//! optimize command: Replace links with numbered citations
//!
//! Rewrites each input, writes the result, and prints a compact JSON summary.

use crate::error::Error;
use crate::files::{default_output, expand_inputs, read_input, write_output, Input};
use crate::optimize::{optimize_with, OptimizeOptions};
use crate::stats::Reduction;
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct OptimizeArgs {
    /// Files, glob patterns or directories to optimize (`-` for stdin)
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Output file for a single input (`-` for stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write outputs into this directory, keeping file names
    #[arg(long, value_name = "DIR", conflicts_with = "output")]
    pub out_dir: Option<PathBuf>,

    /// List references in one flat list instead of grouping by domain
    #[arg(long, env = "REF_OPTIMIZE_NO_GROUP_DOMAINS")]
    pub no_group_domains: bool,

    /// Drop domain names from citations
    #[arg(long, env = "REF_OPTIMIZE_NO_KEEP_DOMAINS")]
    pub no_keep_domains: bool,

    /// Ignore #anchors when deduplicating URLs
    #[arg(long)]
    pub strip_anchors: bool,

    /// Report what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl OptimizeArgs {
    pub fn options(&self) -> OptimizeOptions {
        OptimizeOptions {
            group_by_domain: !self.no_group_domains,
            keep_domain: !self.no_keep_domains,
            strip_fragments: self.strip_anchors,
        }
    }

    /// Destination for one input; `-` means stdout
    fn destination(&self, input: &Input) -> PathBuf {
        if let Some(output) = &self.output {
            return output.clone();
        }

        match (input, &self.out_dir) {
            (Input::File(path), Some(dir)) => {
                dir.join(path.file_name().unwrap_or_else(|| path.as_os_str()))
            }
            (Input::Stdin, Some(dir)) => dir.join("stdin.md"),
            (Input::File(path), None) => default_output(path),
            (Input::Stdin, None) => PathBuf::from("-"),
        }
    }

    /// One destination per input; two inputs may not share an output file
    fn destinations(&self, inputs: &[Input]) -> crate::error::Result<Vec<PathBuf>> {
        let mut claimed: HashMap<PathBuf, &Input> = HashMap::new();
        let mut destinations = Vec::with_capacity(inputs.len());

        for input in inputs {
            let destination = self.destination(input);
            if destination != Path::new("-") {
                if let Some(first) = claimed.insert(destination.clone(), input) {
                    return Err(Error::OutputCollision {
                        path: destination,
                        first: first.to_string(),
                        second: input.to_string(),
                    });
                }
            }
            destinations.push(destination);
        }

        Ok(destinations)
    }
}

/// Result for a single document (compact)
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    pub unique_urls: usize,
    pub links: usize,
    pub stats: Reduction,
}

/// Full report (compact)
#[derive(Debug, Serialize)]
pub struct OptimizeOutput {
    pub files: usize,
    pub unique_urls: usize,
    pub results: Vec<FileReport>,
}

/// Run the optimize command
pub async fn run_optimize(args: OptimizeArgs) -> Result<()> {
    let inputs = expand_inputs(&args.inputs).await?;

    if inputs.is_empty() {
        return Err(Error::NoInputs.into());
    }
    if args.output.is_some() && inputs.len() > 1 {
        return Err(Error::OutputWithMultipleInputs(inputs.len()).into());
    }

    let options = args.options();
    let destinations = args.destinations(&inputs)?;
    let mut results = Vec::with_capacity(inputs.len());
    let mut wrote_stdout = false;

    for (input, destination) in inputs.iter().zip(destinations) {
        let content = read_input(input).await?;
        let optimized = optimize_with(&content, &options);
        let to_stdout = destination == Path::new("-");

        if !args.dry_run {
            write_output(&destination, &optimized.text).await?;
            wrote_stdout |= to_stdout;
        }

        eprintln!(
            "Processed {} unique URLs -> {}",
            optimized.references.len(),
            if args.dry_run {
                "(dry run)".to_string()
            } else if to_stdout {
                "stdout".to_string()
            } else {
                destination.display().to_string()
            }
        );

        results.push(FileReport {
            input: input.to_string(),
            output: (!args.dry_run && !to_stdout).then(|| destination.display().to_string()),
            unique_urls: optimized.references.len(),
            links: optimized.occurrences,
            stats: Reduction::between(&content, &optimized.text),
        });
    }

    let output = OptimizeOutput {
        files: results.len(),
        unique_urls: results.iter().map(|r| r.unique_urls).sum(),
        results,
    };
    let json = serde_json::to_string(&output)?;

    // The document owns stdout when it was written there
    if wrote_stdout {
        eprintln!("{}", json);
    } else {
        println!("{}", json);
    }

    Ok(())
}
