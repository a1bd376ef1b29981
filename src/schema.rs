//! references.yaml export schema
//!
//! The reference tables of one or more optimized documents. Every document
//! numbers its own citations from 1, so each reference records the `[N]` it
//! carries in each file that cites it.

use crate::citations::ReferenceTable;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Root structure for references.yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferencesFile {
    pub meta: Meta,
    pub references: Vec<Reference>,
}

/// Metadata about the export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    /// ISO date when file was created
    pub created: String,
    /// Tool that wrote the file
    pub tool: String,
    /// Total number of references
    pub total_links: usize,
}

/// A single reference entry, in order of first appearance across documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reference {
    pub url: String,
    pub domain: String,
    /// Link label from the source document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Files that cite this reference
    pub cited_in: Vec<Citation>,
}

/// Where a reference is cited
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub file: String,
    /// `[N]` in that file's optimized text
    pub number: usize,
}

impl ReferencesFile {
    pub fn new(created: String) -> Self {
        Self {
            meta: Meta {
                created,
                tool: "ref-optimize".to_string(),
                total_links: 0,
            },
            references: Vec::new(),
        }
    }

    /// Merge one document's table, keeping that document's citation numbers
    pub fn add_document(&mut self, source: &str, table: &ReferenceTable) {
        for entry in table.iter() {
            let citation = Citation {
                file: source.to_string(),
                number: entry.number,
            };

            if let Some(existing) = self.references.iter_mut().find(|r| r.url == entry.url) {
                if !existing.cited_in.iter().any(|c| c.file == source) {
                    existing.cited_in.push(citation);
                }
                if existing.title.is_none() {
                    existing.title = entry.label.clone();
                }
                continue;
            }

            self.references.push(Reference {
                url: entry.url.clone(),
                domain: entry.domain.clone(),
                title: entry.label.clone(),
                cited_in: vec![citation],
            });
        }

        self.meta.total_links = self.references.len();
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(urls: &[(&str, Option<&str>)]) -> ReferenceTable {
        let mut table = ReferenceTable::new();
        for (url, label) in urls {
            table.cite(url, *label);
        }
        table
    }

    fn cite(file: &str, number: usize) -> Citation {
        Citation {
            file: file.to_string(),
            number,
        }
    }

    #[test]
    fn test_add_documents_merges() {
        let mut file = ReferencesFile::new("2025-12-15".to_string());
        file.add_document("a.md", &table(&[("https://x.com", None), ("https://y.com", Some("Y"))]));
        file.add_document("b.md", &table(&[("https://y.com", None), ("https://x.com", Some("X")), ("https://z.com", None)]));

        assert_eq!(file.meta.total_links, 3);
        let urls: Vec<&str> = file.references.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["https://x.com", "https://y.com", "https://z.com"]);
        assert_eq!(file.references[0].cited_in, vec![cite("a.md", 1), cite("b.md", 2)]);
        assert_eq!(file.references[0].title.as_deref(), Some("X"));
        assert_eq!(file.references[1].title.as_deref(), Some("Y"));
    }

    #[test]
    fn test_numbers_match_each_document() {
        let mut file = ReferencesFile::new("2025-12-15".to_string());
        file.add_document("a.md", &table(&[("https://x.com", None)]));
        file.add_document("b.md", &table(&[("https://y.com", None)]));

        // y.com is [1] in b.md even though it is the second reference overall
        assert_eq!(file.references[1].url, "https://y.com");
        assert_eq!(file.references[1].cited_in, vec![cite("b.md", 1)]);
    }

    #[test]
    fn test_serialize_reference() {
        let reference = Reference {
            url: "https://example.com".to_string(),
            domain: "example.com".to_string(),
            title: None,
            cited_in: vec![cite("README.md", 3)],
        };
        let yaml = serde_yaml::to_string(&reference).unwrap();
        assert!(yaml.contains("url: https://example.com"));
        assert!(yaml.contains("domain: example.com"));
        assert!(yaml.contains("file: README.md"));
        assert!(yaml.contains("number: 3"));
        // Optional fields should not appear when None
        assert!(!yaml.contains("title:"));
    }

    #[test]
    fn test_full_file_roundtrip() {
        let mut file = ReferencesFile::new("2025-12-15".to_string());
        file.add_document("doc.md", &table(&[("https://example.com/a", Some("Example"))]));

        let yaml = file.to_yaml().unwrap();
        let parsed: ReferencesFile = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.meta.total_links, 1);
        assert_eq!(parsed.meta.tool, "ref-optimize");
        assert_eq!(parsed.references[0].title.as_deref(), Some("Example"));
    }
}
