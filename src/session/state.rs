use serde::Serialize;

use super::conversation::Message;
use super::suggestions::QuestionSuggestionList;

/// Lifecycle phase of a session. There is no way back to `Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SessionPhase {
    #[default]
    Empty,
    DocumentsIngested,
    Conversing,
}

impl SessionPhase {
    /// Phase after a successful ingestion response
    pub fn after_ingest(self) -> Self {
        match self {
            SessionPhase::Empty => SessionPhase::DocumentsIngested,
            other => other,
        }
    }

    /// Phase after a successful turn; a turn alone never leaves `Empty`
    pub fn after_turn(self) -> Self {
        match self {
            SessionPhase::Empty => SessionPhase::Empty,
            SessionPhase::DocumentsIngested | SessionPhase::Conversing => SessionPhase::Conversing,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SessionPhase::Empty => "No documents",
            SessionPhase::DocumentsIngested => "Documents ready",
            SessionPhase::Conversing => "Conversing",
        }
    }
}

/// Owned, read-only view of a session for rendering
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub documents_ingested: bool,
    pub suggestions: QuestionSuggestionList,
    pub messages: Vec<Message>,
    pub input: String,
    pub show_empty_warning: bool,
    pub turn_in_flight: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_transitions() {
        let phase = SessionPhase::default();
        assert_eq!(phase, SessionPhase::Empty);
        assert_eq!(phase.after_turn(), SessionPhase::Empty);

        let phase = phase.after_ingest();
        assert_eq!(phase, SessionPhase::DocumentsIngested);

        let phase = phase.after_turn();
        assert_eq!(phase, SessionPhase::Conversing);
        assert_eq!(phase.after_turn(), SessionPhase::Conversing);
        assert_eq!(phase.after_ingest(), SessionPhase::Conversing);
    }
}
