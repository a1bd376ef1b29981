//! Input expansion and file I/O for the commands

use crate::error::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

const DOCUMENT_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

/// Where a document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Stdin => write!(f, "-"),
            Input::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Expand file paths, glob patterns and directories; `-` is stdin.
///
/// Directories are scanned (not recursively) for markdown and text files.
/// Order follows the arguments, duplicates are dropped.
pub async fn expand_inputs(patterns: &[PathBuf]) -> Result<Vec<Input>> {
    let mut inputs = Vec::new();

    for pattern in patterns {
        let pattern_str = pattern.to_string_lossy();

        if pattern_str == "-" {
            push_unique(&mut inputs, Input::Stdin);
        } else if pattern_str.contains(['*', '?', '[']) {
            for entry in glob::glob(&pattern_str)? {
                let path = entry?;
                if path.is_file() {
                    push_unique(&mut inputs, Input::File(path));
                }
            }
        } else if pattern.is_dir() {
            let mut found = Vec::new();
            let mut entries = tokio::fs::read_dir(pattern)
                .await
                .map_err(|source| Error::Read {
                    path: pattern.clone(),
                    source,
                })?;
            while let Some(entry) = entries.next_entry().await.map_err(|source| Error::Read {
                path: pattern.clone(),
                source,
            })? {
                let path = entry.path();
                if path.is_file() && is_document(&path) {
                    found.push(path);
                }
            }
            found.sort();
            for path in found {
                push_unique(&mut inputs, Input::File(path));
            }
        } else {
            // Missing files surface as read errors later
            push_unique(&mut inputs, Input::File(pattern.clone()));
        }
    }

    Ok(inputs)
}

fn push_unique(inputs: &mut Vec<Input>, input: Input) {
    if !inputs.contains(&input) {
        inputs.push(input);
    }
}

fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| DOCUMENT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

pub async fn read_input(input: &Input) -> Result<String> {
    match input {
        Input::Stdin => {
            let mut content = String::new();
            tokio::io::stdin()
                .read_to_string(&mut content)
                .await
                .map_err(|source| Error::Read {
                    path: PathBuf::from("-"),
                    source,
                })?;
            Ok(content)
        }
        Input::File(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|source| Error::Read {
                path: path.clone(),
                source,
            }),
    }
}

/// `notes.md` -> `notes.optimized.md`, next to the input
pub fn default_output(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());

    let name = match path.extension() {
        Some(ext) => format!("{}.optimized.{}", stem, ext.to_string_lossy()),
        None => format!("{}.optimized", stem),
    };
    path.with_file_name(name)
}

/// Write to `path`, creating parent directories; `-` writes to stdout
pub async fn write_output(path: &Path, content: &str) -> Result<()> {
    let to_write_error = |source: std::io::Error| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    if path == Path::new("-") {
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(content.as_bytes())
            .await
            .map_err(to_write_error)?;
        return stdout.flush().await.map_err(to_write_error);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(to_write_error)?;
    }
    tokio::fs::write(path, content)
        .await
        .map_err(to_write_error)
}
