//! Errors for reading inputs and writing outputs.
//!
//! The rewrite itself cannot fail; everything here is file plumbing.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no input files found")]
    NoInputs,

    #[error("--output takes a single input, got {0} (use --out-dir)")]
    OutputWithMultipleInputs(usize),

    #[error("{first} and {second} would both be written to {}", path.display())]
    OutputCollision {
        path: PathBuf,
        first: String,
        second: String,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("glob: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
