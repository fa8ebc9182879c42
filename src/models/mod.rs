// Gateway module for the remote question-answering service
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod http;
mod traits;
mod types;

// Public re-exports - the ONLY way to access service functionality
pub use http::HttpQaService;
pub use traits::QaService;
pub use types::{IngestResponse, PdfDocument, QueryRequest, QueryResponse};

#[cfg(test)]
pub use traits::MockQaService;
