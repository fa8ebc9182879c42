use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::constants::{CITATION_SOURCE_SUFFIX, PLACEHOLDER_SOURCE, PLACEHOLDER_SOURCE_LABEL};

/// A pointer from an answer back to the page/paragraph of a source document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Citation {
    #[serde(rename = "page_num")]
    pub page_number: u32,
    #[serde(rename = "paragraph_num")]
    pub paragraph_number: u32,
    #[serde(rename = "source_pdf")]
    pub source_document: String,
}

impl Citation {
    pub fn new(page_number: u32, paragraph_number: u32, source_document: impl Into<String>) -> Self {
        Self {
            page_number,
            paragraph_number,
            source_document: source_document.into(),
        }
    }

    /// Only citations pointing at a `.pdf` source are shown
    pub fn is_displayable(&self) -> bool {
        self.source_document.ends_with(CITATION_SOURCE_SUFFIX)
    }

    /// Source label for display; the `pdfs` placeholder means "unknown source"
    pub fn display_source(&self) -> &str {
        if self.source_document == PLACEHOLDER_SOURCE {
            PLACEHOLDER_SOURCE_LABEL
        } else {
            &self.source_document
        }
    }
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Page {}, Paragraph {}, Source: {}",
            self.page_number,
            self.paragraph_number,
            self.display_source()
        )
    }
}

/// Filters and deduplicates the citations attached to one answer.
///
/// Non-`.pdf` sources are dropped, then exact duplicates are removed keeping
/// the first occurrence. The raw source value is kept so the result can be
/// fed back in unchanged; the placeholder label is applied by [`Citation::display_source`].
pub struct CitationNormalizer;

impl CitationNormalizer {
    pub fn normalize(raw: &[Citation]) -> Vec<Citation> {
        let mut seen = HashSet::new();
        raw.iter()
            .filter(|c| c.is_displayable())
            .filter(|c| seen.insert(*c))
            .cloned()
            .collect()
    }
}
