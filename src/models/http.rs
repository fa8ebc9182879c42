use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

use super::traits::QaService;
use super::types::{IngestResponse, PdfDocument, QueryRequest, QueryResponse};
use crate::app::ServiceConfig;
use crate::constants::{
    HEALTH_CHECK_TIMEOUT_SECS, PDF_MIME_TYPE, UPLOAD_FILE_FIELD, UPLOAD_SESSION_FIELD,
};
use crate::utils::{log_debug, PrajnaError, Result};

/// reqwest-backed client for the question-answering service
pub struct HttpQaService {
    client: Client,
    base_url: String,
    upload_path: String,
    query_path: String,
}

impl HttpQaService {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            upload_path: config.upload_path.clone(),
            query_path: config.query_path.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Only a 200 counts as success; the body is returned as text
    async fn success_body(url: &str, response: Response) -> Result<String> {
        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK {
            return Err(PrajnaError::Transport(format!(
                "{} returned {}: {}",
                url, status, body
            )));
        }
        Ok(body)
    }
}

#[async_trait]
impl QaService for HttpQaService {
    async fn ingest(&self, session_id: &str, documents: &[PdfDocument]) -> Result<IngestResponse> {
        let mut form = Form::new().text(UPLOAD_SESSION_FIELD, session_id.to_string());
        for doc in documents {
            let part = Part::bytes(doc.contents().to_vec())
                .file_name(doc.file_name().to_string())
                .mime_str(PDF_MIME_TYPE)?;
            form = form.part(UPLOAD_FILE_FIELD, part);
        }

        let url = self.url(&self.upload_path);
        let total_bytes: usize = documents.iter().map(PdfDocument::size).sum();
        log_debug(format!(
            "Uploading {} document(s), {} bytes, to {}",
            documents.len(),
            total_bytes,
            url
        ));

        let response = self.client.post(&url).multipart(form).send().await?;
        let body = Self::success_body(&url, response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse> {
        let url = self.url(&self.query_path);
        log_debug(format!("Querying {}", url));

        let response = self.client.post(&url).json(request).send().await?;
        let body = Self::success_body(&url, response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn health_check(&self) -> Result<bool> {
        let request = self
            .client
            .get(&self.base_url)
            .timeout(Duration::from_secs(HEALTH_CHECK_TIMEOUT_SECS));

        match request.send().await {
            Ok(response) => Ok(!response.status().is_server_error()),
            Err(_) => Ok(false),
        }
    }
}
