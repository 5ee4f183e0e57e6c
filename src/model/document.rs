//! Document-level types.

use super::Page;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A laid-out output document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata written to the PDF info dictionary
    pub metadata: Metadata,

    /// Pages in the document
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document with the given metadata.
    pub fn with_metadata(metadata: Metadata) -> Self {
        Self {
            metadata,
            pages: Vec::new(),
        }
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&Page> {
        if page_num == 0 {
            return None;
        }
        self.pages.get((page_num - 1) as usize)
    }

    /// Append a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total number of drawn lines across all pages.
    pub fn line_count(&self) -> usize {
        self.pages.iter().map(Page::line_count).sum()
    }

    /// Shaped text of every drawn line, pages separated by a blank line.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Output document metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Application that produced the source content
    pub creator: Option<String>,

    /// PDF producer
    pub producer: String,

    /// Creation date. Left unset by default so that output bytes are
    /// reproducible for identical input.
    pub created: Option<DateTime<Utc>>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            title: None,
            subject: None,
            creator: None,
            producer: format!("rtlpdf {}", env!("CARGO_PKG_VERSION")),
            created: None,
        }
    }
}

impl Metadata {
    /// Create metadata with a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Stamp the current time as creation date.
    pub fn created_now(mut self) -> Self {
        self.created = Some(Utc::now());
        self
    }
}

/// Format a timestamp as a PDF date string (`D:YYYYMMDDHHmmSSZ`).
pub(crate) fn format_pdf_date(date: &DateTime<Utc>) -> String {
    date.format("D:%Y%m%d%H%M%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PlacedLine;
    use chrono::TimeZone;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.page_count(), 0);
        assert_eq!(doc.line_count(), 0);
        assert!(doc.get_page(0).is_none());
    }

    #[test]
    fn test_document_line_count() {
        let mut doc = Document::new();
        let mut first = Page::a4(1);
        first.add_line(PlacedLine::new("one", 500.0, 792.0, 45.0));
        first.add_line(PlacedLine::new("two", 500.0, 772.0, 45.0));
        doc.add_page(first);
        doc.add_page(Page::a4(2));

        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.get_page(1).unwrap().line_count(), 2);
        assert_eq!(doc.plain_text(), "one\ntwo\n\n");
    }

    #[test]
    fn test_metadata_defaults() {
        let metadata = Metadata::default();
        assert!(metadata.created.is_none());
        assert!(metadata.producer.starts_with("rtlpdf"));

        let titled = Metadata::titled("Report");
        assert_eq!(titled.title.as_deref(), Some("Report"));
    }

    #[test]
    fn test_format_pdf_date() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 45).unwrap();
        assert_eq!(format_pdf_date(&date), "D:20240115103045Z");
    }
}
