/// Constants module to avoid magic numbers in the codebase

// Service endpoints
pub const DEFAULT_SERVICE_URL: &str = "https://prajna-ai.onrender.com";
pub const DEFAULT_UPLOAD_PATH: &str = "/upload";
pub const DEFAULT_QUERY_PATH: &str = "/handle_query";

// Multipart field names expected by the ingest endpoint
pub const UPLOAD_SESSION_FIELD: &str = "session_id";
pub const UPLOAD_FILE_FIELD: &str = "pdfs";
pub const PDF_MIME_TYPE: &str = "application/pdf";

// Timeouts
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const HEALTH_CHECK_TIMEOUT_SECS: u64 = 5;

// Citations
pub const CITATION_SOURCE_SUFFIX: &str = ".pdf";
pub const PLACEHOLDER_SOURCE: &str = "pdfs";
pub const PLACEHOLDER_SOURCE_LABEL: &str = "PDF File";

// Identity
pub const DEFAULT_USER_FILE: &str = "user.json";

// Logging
pub const LOG_FILE_NAME: &str = "prajna.log";

// UI Configuration
pub const UI_REFRESH_INTERVAL_MS: u64 = 50;
pub const UI_SCROLL_LINES: u16 = 3;
pub const DEFAULT_TYPING_CHARS_PER_TICK: usize = 3;
pub const EMPTY_MESSAGE_WARNING: &str = "Please input a valid Message";
