//! Document - the fetched page a request operates on

use serde::{Deserialize, Serialize};

/// A fetched web page with its extracted content region.
///
/// Produced once per request by the fetcher and immutable afterwards;
/// the chunker and summarizer only ever read from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Page title (from `<title>`, falling back to the first heading)
    pub title: String,

    /// Raw HTML as returned by the remote server
    pub raw_html: String,

    /// Plain text of the primary content region
    pub content_text: String,

    /// Absolute URL the page was fetched from
    pub source_url: String,
}

impl Document {
    /// Create a new document
    pub fn new(
        source_url: impl Into<String>,
        title: impl Into<String>,
        raw_html: impl Into<String>,
        content_text: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            raw_html: raw_html.into(),
            content_text: content_text.into(),
            source_url: source_url.into(),
        }
    }

    /// Whether any content text was extracted
    pub fn has_content(&self) -> bool {
        !self.content_text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let doc = Document::new(
            "https://example.com/page",
            "Example",
            "<html><body>hi</body></html>",
            "hi",
        );

        assert_eq!(doc.title, "Example");
        assert_eq!(doc.source_url, "https://example.com/page");
        assert!(doc.has_content());
    }

    #[test]
    fn test_empty_content() {
        let doc = Document::new("https://example.com", "Empty", "<html/>", "   ");
        assert!(!doc.has_content());
    }
}
