//! Link extraction from markdown and text content
//!
//! Finds `[label](url)` links and bare `http(s)://` URLs in one left-to-right
//! pass. Markdown links win over bare URLs; images are left alone.

use crate::citations::normalize_host;
use regex::{Captures, Regex};
use std::collections::HashSet;
use std::sync::LazyLock;

/// `[label](target)` or `[label](target "title")`, one level of parens allowed in the target
static MARKDOWN_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\[([^\]]*)\]\(\s*((?:[^()\s]|\([^()\s]*\))+)(?:\s+"[^"]*")?\s*\)"#)
        .expect("markdown link regex")
});

static BARE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>"'`\[\]]+"#).expect("bare url regex"));

/// `example.com[3]` style citations left over from a previous export
static DOMAIN_CITATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([a-zA-Z0-9.-]+\.[a-zA-Z]{2,})\[(\d+)\]").expect("domain citation regex")
});

/// How a link was written in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// `[label](url)`
    Markdown,
    /// `https://...` in running text
    Bare,
}

/// One matched link in the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOccurrence {
    /// Exact substring that will be replaced
    pub matched_text: String,
    /// Label kept inline (empty for bare URLs)
    pub display_text: String,
    pub url: String,
    /// Byte offset of `matched_text` in the source
    pub position: usize,
    pub kind: LinkKind,
}

impl LinkOccurrence {
    /// Byte offset just past the match
    pub fn end(&self) -> usize {
        self.position + self.matched_text.len()
    }
}

/// Scan `content` for links, in order of appearance
pub fn scan_links(content: &str) -> Vec<LinkOccurrence> {
    let mut found = Vec::new();
    let mut cursor = 0;

    for cap in MARKDOWN_LINK.captures_iter(content) {
        let Some(whole) = cap.get(0) else { continue };

        // Bare URLs only live in the gaps between markdown links
        scan_bare_urls(content, cursor, whole.start(), &mut found);
        cursor = whole.end();

        // ![alt](src) is an image, copied through untouched
        if content[..whole.start()].ends_with('!') {
            continue;
        }

        found.push(LinkOccurrence {
            matched_text: whole.as_str().to_string(),
            display_text: cap[1].to_string(),
            url: cap[2].to_string(),
            position: whole.start(),
            kind: LinkKind::Markdown,
        });
    }

    scan_bare_urls(content, cursor, content.len(), &mut found);
    found
}

fn scan_bare_urls(content: &str, start: usize, end: usize, found: &mut Vec<LinkOccurrence>) {
    let gap = &content[start..end];

    for mat in BARE_URL.find_iter(gap) {
        let url = trim_trailing_punctuation(mat.as_str());
        if !has_host_part(url) {
            continue;
        }

        found.push(LinkOccurrence {
            matched_text: url.to_string(),
            display_text: String::new(),
            url: url.to_string(),
            position: start + mat.start(),
            kind: LinkKind::Bare,
        });
    }
}

/// Drop sentence punctuation and unbalanced closing parens from the end of a bare URL
fn trim_trailing_punctuation(url: &str) -> &str {
    let mut url = url;

    loop {
        let Some(last) = url.chars().last() else {
            return url;
        };

        let strip = match last {
            '.' | ',' | ';' | ':' | '!' | '?' | '*' => true,
            ')' => url.matches(')').count() > url.matches('(').count(),
            _ => false,
        };

        if !strip {
            return url;
        }
        url = &url[..url.len() - last.len_utf8()];
    }
}

/// `https://` alone is not a link
fn has_host_part(url: &str) -> bool {
    url.split_once("://")
        .map(|(_, rest)| !rest.is_empty())
        .unwrap_or(false)
}

/// Remove the `#fragment` of a URL, unless that would leave nothing
pub fn strip_fragment(url: &str) -> &str {
    match url.split_once('#') {
        Some((base, _)) if !base.is_empty() => base,
        _ => url,
    }
}

/// Collapse `example.com[3]` into `[3]` when `example.com` is one of `domains`.
///
/// Anything else that looks like `name.ext[N]` (`arr.length[0]`) is kept.
pub fn collapse_domain_citations(content: &str, domains: &HashSet<String>) -> String {
    DOMAIN_CITATION
        .replace_all(content, |caps: &Captures| {
            if domains.contains(&normalize_host(&caps[1])) {
                format!("[{}]", &caps[2])
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(content: &str) -> Vec<String> {
        scan_links(content).into_iter().map(|l| l.url).collect()
    }

    #[test]
    fn test_scan_markdown_and_bare() {
        let content = "See [Example](https://example.com/a) and https://bare.org/path.";
        let found = scan_links(content);

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].kind, LinkKind::Markdown);
        assert_eq!(found[0].display_text, "Example");
        assert_eq!(found[0].url, "https://example.com/a");
        assert_eq!(found[0].matched_text, "[Example](https://example.com/a)");
        assert_eq!(found[0].position, 4);

        assert_eq!(found[1].kind, LinkKind::Bare);
        assert_eq!(found[1].url, "https://bare.org/path");
        assert_eq!(found[1].display_text, "");
        assert_eq!(&content[found[1].position..found[1].end()], "https://bare.org/path");
    }

    #[test]
    fn test_scan_in_textual_order() {
        let content = "https://first.com then [second](https://second.com) then https://third.com";
        assert_eq!(
            urls(content),
            vec![
                "https://first.com",
                "https://second.com",
                "https://third.com"
            ]
        );
    }

    #[test]
    fn test_markdown_target_not_matched_twice() {
        let found = scan_links("[link](https://foo.bar/path?q=1)");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, LinkKind::Markdown);
    }

    #[test]
    fn test_trailing_punctuation() {
        assert_eq!(urls("Visit https://a.com."), vec!["https://a.com"]);
        assert_eq!(urls("Visit https://a.com, then"), vec!["https://a.com"]);
        assert_eq!(urls("(see https://a.com/x)"), vec!["https://a.com/x"]);
        assert_eq!(urls("Really https://a.com/q?!"), vec!["https://a.com/q"]);
    }

    #[test]
    fn test_balanced_parens_kept() {
        assert_eq!(
            urls("https://en.wikipedia.org/wiki/Rust_(language) is nice"),
            vec!["https://en.wikipedia.org/wiki/Rust_(language)"]
        );
        assert_eq!(
            urls("[Rust](https://en.wikipedia.org/wiki/Rust_(language))"),
            vec!["https://en.wikipedia.org/wiki/Rust_(language)"]
        );
    }

    #[test]
    fn test_link_title_dropped() {
        let found = scan_links(r#"[a](https://a.com "The A site")"#);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].url, "https://a.com");
    }

    #[test]
    fn test_images_untouched() {
        let found = scan_links("![diagram](https://img.example.com/d.png) and https://x.org");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].url, "https://x.org");
    }

    #[test]
    fn test_label_across_line_break() {
        let found = scan_links("[two\nlines](https://a.com)");
        assert_eq!(found[0].display_text, "two\nlines");
    }

    #[test]
    fn test_malformed_left_alone() {
        assert!(scan_links("[unterminated](https://a.com").iter().all(|l| l.kind == LinkKind::Bare));
        assert!(scan_links("just [brackets] and (parens)").is_empty());
        assert!(scan_links("https:// nothing here").is_empty());
        assert!(scan_links("").is_empty());
    }

    #[test]
    fn test_unicode_positions() {
        let content = "Über ünïcödé https://example.com/ü done";
        let found = scan_links(content);
        assert_eq!(found.len(), 1);
        assert_eq!(&content[found[0].position..found[0].end()], "https://example.com/ü");
    }

    #[test]
    fn test_strip_fragment() {
        assert_eq!(strip_fragment("https://a.com/p#sec"), "https://a.com/p");
        assert_eq!(strip_fragment("https://a.com/p"), "https://a.com/p");
        assert_eq!(strip_fragment("#intro"), "#intro");
    }

    #[test]
    fn test_collapse_domain_citations() {
        let domains: HashSet<String> = ["example.com", "docs.rs"].map(String::from).into();
        assert_eq!(
            collapse_domain_citations("as reported www.Example.com[3] and docs.rs[12].", &domains),
            "as reported [3] and [12]."
        );
        assert_eq!(collapse_domain_citations("plain [1] text", &domains), "plain [1] text");
    }

    #[test]
    fn test_collapse_skips_unknown_domains() {
        let domains: HashSet<String> = ["example.com".to_string()].into();
        assert_eq!(
            collapse_domain_citations("Use arr.length[0] and example.com[2].", &domains),
            "Use arr.length[0] and [2]."
        );
        assert_eq!(
            collapse_domain_citations("config.yaml[2]", &HashSet::new()),
            "config.yaml[2]"
        );
    }
}
