pub mod app;
pub mod cli;
pub mod constants;
pub mod models;
pub mod runtime;
pub mod session;
pub mod tui;
pub mod utils;

pub use app::{load_config, Config};
pub use models::{HttpQaService, PdfDocument, QaService};
pub use session::{Citation, CitationNormalizer, ConversationLog, Message, QuestionSuggestionList, SessionController};
pub use utils::PrajnaError;
