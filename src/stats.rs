//! Before/after size and token estimates
//!
//! Token counts here are an approximation (about 4 characters per token),
//! not a tokenizer run. They are reported as `est_tokens` in the JSON summary
//! and are meant for comparing a document with its optimized form.

use serde::Serialize;

/// Size of one document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DocumentStats {
    pub bytes: usize,
    pub chars: usize,
    /// Approximate, see [`estimate_tokens`]
    pub est_tokens: usize,
}

impl DocumentStats {
    pub fn of(text: &str) -> Self {
        Self {
            bytes: text.len(),
            chars: text.chars().count(),
            est_tokens: estimate_tokens(text),
        }
    }
}

/// Approximate token count (1 token ≈ 4 chars), rounded up.
///
/// Real BPE tokenizers vary by model; this only tracks the trend.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

/// Comparison between an original and an optimized document
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reduction {
    pub before: DocumentStats,
    pub after: DocumentStats,
    /// Estimated tokens saved; negative when the document grew
    pub saved_tokens: i64,
    /// Percentage of estimated tokens saved, one decimal
    pub saved_pct: f64,
}

impl Reduction {
    pub fn between(original: &str, optimized: &str) -> Self {
        let before = DocumentStats::of(original);
        let after = DocumentStats::of(optimized);
        let saved_tokens = before.est_tokens as i64 - after.est_tokens as i64;
        let saved_pct = if before.est_tokens == 0 {
            0.0
        } else {
            (saved_tokens as f64 / before.est_tokens as f64 * 1000.0).round() / 10.0
        };

        Self {
            before,
            after,
            saved_tokens,
            saved_pct,
        }
    }
}
