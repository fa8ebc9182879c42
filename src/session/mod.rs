/// Session core - Gateway

mod citations;
mod controller;
mod conversation;
mod identity;
mod state;
mod suggestions;

pub use citations::{Citation, CitationNormalizer};
pub use controller::SessionController;
pub use conversation::{ConversationLog, Message, Sender};
pub use identity::UserIdentity;
pub use state::{SessionPhase, SessionSnapshot};
pub use suggestions::{QuestionSuggestionList, RecommendedQuestion};
