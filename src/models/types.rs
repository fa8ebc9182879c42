use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::session::Citation;
use crate::utils::{PrajnaError, Result};

/// A PDF ready to be uploaded
#[derive(Debug, Clone, PartialEq)]
pub struct PdfDocument {
    file_name: String,
    contents: Bytes,
}

impl PdfDocument {
    pub fn new(file_name: impl Into<String>, contents: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            contents: contents.into(),
        }
    }

    /// Read a PDF from disk. Anything without a `.pdf` extension is rejected.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if !is_pdf {
            return Err(PrajnaError::InvalidDocument(format!(
                "{} is not a PDF file",
                path.display()
            )));
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "document.pdf".to_string());
        let contents = tokio::fs::read(path).await?;

        Ok(Self::new(file_name, contents))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn contents(&self) -> &Bytes {
        &self.contents
    }

    pub fn size(&self) -> usize {
        self.contents.len()
    }
}

/// Successful ingest payload: candidate questions, one per line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestResponse {
    pub message: String,
}

/// Body of a query call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub email: Option<String>,
    pub question: String,
    pub session_id: String,
}

/// Successful query payload: the answer and its raw, unfiltered citations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub answer: String,
    #[serde(default)]
    pub citations: Vec<Citation>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_pdf_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Manual.PDF");
        std::fs::write(&path, b"%PDF-1.7 fake").unwrap();

        let doc = PdfDocument::from_path(&path).await.unwrap();
        assert_eq!(doc.file_name(), "Manual.PDF");
        assert_eq!(doc.size(), 13);
    }

    #[tokio::test]
    async fn test_non_pdf_rejected_before_reading() {
        let err = PdfDocument::from_path("/does/not/exist/notes.txt")
            .await
            .unwrap_err();
        assert!(matches!(err, PrajnaError::InvalidDocument(_)));
    }

    #[tokio::test]
    async fn test_missing_pdf_is_io_error() {
        let err = PdfDocument::from_path("/does/not/exist/report.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, PrajnaError::Io(_)));
    }

    #[test]
    fn test_query_wire_format() {
        let request = QueryRequest {
            email: Some("reader@example.com".to_string()),
            question: "Why Y?".to_string(),
            session_id: "u-1".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "email": "reader@example.com",
                "question": "Why Y?",
                "session_id": "u-1"
            })
        );

        let response: QueryResponse = serde_json::from_str(
            r#"{"answer": "Because.", "citations": [{"page_num": 1, "paragraph_num": 2, "source_pdf": "a.pdf"}]}"#,
        )
        .unwrap();
        assert_eq!(response.citations, vec![Citation::new(1, 2, "a.pdf")]);

        let bare: QueryResponse = serde_json::from_str(r#"{"answer": "No sources"}"#).unwrap();
        assert!(bare.citations.is_empty());
    }
}
