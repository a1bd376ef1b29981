//! Citation numbering and the reference table
//!
//! Each distinct URL gets one number, minted on first appearance.

use std::collections::HashMap;
use url::Url;

/// A URL that has been assigned a citation number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceEntry {
    pub url: String,
    /// 1-based, in order of first appearance
    pub number: usize,
    /// Lowercased host without `www.`, or the full URL when there is no host
    pub domain: String,
    /// Label of the markdown link that introduced the URL
    pub label: Option<String>,
}

/// Ordered URL -> entry mapping; insertion order is citation order
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    entries: Vec<ReferenceEntry>,
    index: HashMap<String, usize>,
}

impl ReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Citation number for `url`, minting a new entry on first sight
    pub fn cite(&mut self, url: &str, label: Option<&str>) -> usize {
        if let Some(&idx) = self.index.get(url) {
            return self.entries[idx].number;
        }

        let number = self.entries.len() + 1;
        self.index.insert(url.to_string(), self.entries.len());
        self.entries.push(ReferenceEntry {
            url: url.to_string(),
            number,
            domain: extract_domain(url),
            label: label.filter(|l| !l.trim().is_empty()).map(str::to_string),
        });
        number
    }

    pub fn get(&self, url: &str) -> Option<&ReferenceEntry> {
        self.index.get(url).map(|&idx| &self.entries[idx])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in citation order
    pub fn iter(&self) -> impl Iterator<Item = &ReferenceEntry> {
        self.entries.iter()
    }

    /// Entries bucketed by domain.
    ///
    /// Buckets come in order of the domain's first appearance; entries inside a
    /// bucket keep citation order. Numbers are never changed.
    pub fn by_domain(&self) -> Vec<(&str, Vec<&ReferenceEntry>)> {
        let mut buckets: Vec<(&str, Vec<&ReferenceEntry>)> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for entry in &self.entries {
            let domain = entry.domain.as_str();
            match positions.get(domain) {
                Some(&pos) => buckets[pos].1.push(entry),
                None => {
                    positions.insert(domain, buckets.len());
                    buckets.push((domain, vec![entry]));
                }
            }
        }

        buckets
    }
}

/// Host of `url` as written, lowercased and without a leading `www.`.
///
/// The authority text is used rather than the parsed host so international
/// names stay readable (`bücher.de`, not punycode). Userinfo and port are
/// dropped. Falls back to the whole URL when it has no host (relative links,
/// `mailto:`, garbage).
pub fn extract_domain(url: &str) -> String {
    let authority = Url::parse(url)
        .ok()
        .filter(|u| u.has_host())
        .and(url.split_once("://"))
        .map(|(_, rest)| rest.split(['/', '?', '#']).next().unwrap_or(rest));

    let host = authority
        .map(|a| a.rsplit_once('@').map_or(a, |(_, host)| host))
        .map(strip_port)
        .unwrap_or("");

    if host.is_empty() {
        return url.to_string();
    }
    normalize_host(host)
}

/// Lowercase and drop one leading `www.`
pub fn normalize_host(host: &str) -> String {
    let host = host.to_lowercase();
    match host.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => host,
    }
}

fn strip_port(host: &str) -> &str {
    // [::1]:8080
    if host.starts_with('[') {
        return host.find(']').map_or(host, |end| &host[..=end]);
    }
    host.split(':').next().unwrap_or(host)
}
