//! ref-optimize: Link-to-citation rewriting for LLM-bound documents
//!
//! Commands:
//! - optimize: Replace links with `[N]` citations and append references
//! - refs: Export the reference table as references.yaml

pub mod citations;
pub mod error;
pub mod extract;
pub mod files;
pub mod optimize;
pub mod refs;
pub mod rewrite;
pub mod schema;
pub mod stats;

pub use citations::{extract_domain, ReferenceEntry, ReferenceTable};
pub use error::{Error, Result};
pub use extract::{scan_links, LinkKind, LinkOccurrence};
pub use optimize::{optimize, optimize_with, OptimizeOptions, Optimized};
pub use schema::ReferencesFile;
pub use stats::{DocumentStats, Reduction};
