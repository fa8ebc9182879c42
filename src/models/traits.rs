use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::types::{IngestResponse, PdfDocument, QueryRequest, QueryResponse};
use crate::utils::Result;

/// The two remote operations the session core depends on
#[cfg_attr(test, automock)]
#[async_trait]
pub trait QaService: Send + Sync {
    /// Upload documents for a session and get back candidate questions
    async fn ingest(&self, session_id: &str, documents: &[PdfDocument]) -> Result<IngestResponse>;

    /// Ask a question against the ingested documents
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse>;

    /// Check that the service is reachable
    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }
}
