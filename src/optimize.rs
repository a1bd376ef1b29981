//! Link rewriting: links become `[N]` citations plus a references section

use crate::citations::{extract_domain, ReferenceTable};
use crate::extract::{collapse_domain_citations, scan_links, strip_fragment};
use std::collections::HashSet;

pub const REFERENCES_HEADER: &str = "## References";

/// Rendering and matching options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimizeOptions {
    /// Cluster references under `### domain` sub-headers
    pub group_by_domain: bool,
    /// Keep domain names: shown next to flat references, and existing
    /// `example.com[3]` citations are left as they are. When off, only
    /// markers naming a domain the document links to are collapsed
    pub keep_domain: bool,
    /// Treat `page#a` and `page#b` as the same reference
    pub strip_fragments: bool,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            group_by_domain: true,
            keep_domain: true,
            strip_fragments: false,
        }
    }
}

/// Rewritten document together with the table that backs its citations
#[derive(Debug, Clone)]
pub struct Optimized {
    pub text: String,
    pub references: ReferenceTable,
    /// Number of links replaced, repeats included
    pub occurrences: usize,
}

/// Replace every link in `document` with a numbered citation.
///
/// Returns the input unchanged when it contains no links.
pub fn optimize(document: &str, group_by_domain: bool, keep_domain: bool) -> String {
    let options = OptimizeOptions {
        group_by_domain,
        keep_domain,
        ..OptimizeOptions::default()
    };
    optimize_with(document, &options).text
}

pub fn optimize_with(document: &str, options: &OptimizeOptions) -> Optimized {
    let mut links = scan_links(document);
    if links.is_empty() {
        return Optimized {
            text: document.to_string(),
            references: ReferenceTable::new(),
            occurrences: 0,
        };
    }

    // Only `domain[N]` markers naming a cited domain are collapsed
    let collapsed;
    let source = if options.keep_domain {
        document
    } else {
        let domains: HashSet<String> = links
            .iter()
            .map(|link| extract_domain(cited_url(&link.url, options)))
            .collect();
        collapsed = collapse_domain_citations(document, &domains);
        links = scan_links(&collapsed);
        collapsed.as_str()
    };

    let mut references = ReferenceTable::new();
    let mut text = String::with_capacity(source.len());
    let mut cursor = 0;

    for link in &links {
        text.push_str(&source[cursor..link.position]);

        let number = references.cite(
            cited_url(&link.url, options),
            Some(link.display_text.as_str()),
        );
        text.push_str(&link.display_text);
        text.push_str(&citation_marker(number));
        cursor = link.end();
    }
    text.push_str(&source[cursor..]);

    text.push_str("\n\n");
    text.push_str(&render_references(&references, options));

    Optimized {
        text,
        references,
        occurrences: links.len(),
    }
}

fn cited_url<'a>(url: &'a str, options: &OptimizeOptions) -> &'a str {
    if options.strip_fragments {
        strip_fragment(url)
    } else {
        url
    }
}

fn citation_marker(number: usize) -> String {
    format!("[{}]", number)
}

/// Render the references section; empty string for an empty table
pub fn render_references(references: &ReferenceTable, options: &OptimizeOptions) -> String {
    if references.is_empty() {
        return String::new();
    }

    let mut out = format!("{}\n\n", REFERENCES_HEADER);

    if options.group_by_domain {
        for (domain, entries) in references.by_domain() {
            out.push_str(&format!("### {}\n\n", domain));
            for entry in entries {
                out.push_str(&format!("{} {}\n\n", citation_marker(entry.number), entry.url));
            }
        }
    } else {
        for entry in references.iter() {
            let line = if options.keep_domain {
                format!("{} {} ({})", citation_marker(entry.number), entry.url, entry.domain)
            } else {
                format!("{} {}", citation_marker(entry.number), entry.url)
            };
            out.push_str(&line);
            out.push_str("\n\n");
        }
    }

    out
}
