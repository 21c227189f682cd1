//! Summary - the write-once record produced for each chunk

use serde::{Deserialize, Serialize};

/// A summary of one chunk of a document.
///
/// Created once per chunk and never mutated; either returned to the
/// caller, persisted to the memory store, or both.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Deterministic identifier: `{title}-{index}`
    pub id: String,

    /// URL of the document this chunk came from
    pub source_url: String,

    /// Title of the source document
    pub title: String,

    /// The chunk text that was summarized
    pub original_text: String,

    /// The model-produced summary
    pub summary_text: String,

    /// Human-readable name of where the content came from (e.g. the host)
    pub external_source_name: String,
}

impl Summary {
    /// Build the summary for chunk `index` of a document.
    ///
    /// The identifier is derived from the title and the zero-based chunk
    /// index, so re-ingesting the same page overwrites rather than
    /// duplicates stored records.
    pub fn from_chunk(
        title: impl Into<String>,
        index: usize,
        source_url: impl Into<String>,
        external_source_name: impl Into<String>,
        original_text: impl Into<String>,
        summary_text: impl Into<String>,
    ) -> Self {
        let title = title.into();
        Self {
            id: format!("{title}-{index}"),
            source_url: source_url.into(),
            title,
            original_text: original_text.into(),
            summary_text: summary_text.into(),
            external_source_name: external_source_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_id() {
        let a = Summary::from_chunk("AKS docs", 0, "https://x", "x", "text", "sum");
        let b = Summary::from_chunk("AKS docs", 0, "https://x", "x", "text", "sum");
        assert_eq!(a.id, "AKS docs-0");
        assert_eq!(a.id, b.id);

        let c = Summary::from_chunk("AKS docs", 1, "https://x", "x", "text", "sum");
        assert_eq!(c.id, "AKS docs-1");
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let summary = Summary::from_chunk("T", 2, "https://x", "docs", "orig", "sum");
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["id"], "T-2");
        assert_eq!(json["sourceUrl"], "https://x");
        assert_eq!(json["originalText"], "orig");
        assert_eq!(json["summaryText"], "sum");
        assert_eq!(json["externalSourceName"], "docs");
    }
}
