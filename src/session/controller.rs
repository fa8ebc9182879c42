use parking_lot::Mutex;
use std::sync::Arc;

use super::citations::CitationNormalizer;
use super::conversation::{ConversationLog, Message};
use super::identity::UserIdentity;
use super::state::{SessionPhase, SessionSnapshot};
use super::suggestions::{QuestionSuggestionList, RecommendedQuestion};
use crate::constants::EMPTY_MESSAGE_WARNING;
use crate::models::{PdfDocument, QaService, QueryRequest};
use crate::utils::{log_debug, log_error, log_info, log_warn, PrajnaError, Result};

#[derive(Debug, Default)]
struct SessionInner {
    phase: SessionPhase,
    documents_ingested: bool,
    suggestions: QuestionSuggestionList,
    log: ConversationLog,
    input: String,
    show_empty_warning: bool,
    turns_in_flight: usize,
}

/// Counts a turn as in flight until dropped, including on cancellation
struct InFlight<'a> {
    inner: &'a Mutex<SessionInner>,
}

impl<'a> InFlight<'a> {
    fn enter(inner: &'a Mutex<SessionInner>) -> Self {
        inner.lock().turns_in_flight += 1;
        Self { inner }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut inner = self.inner.lock();
        inner.turns_in_flight = inner.turns_in_flight.saturating_sub(1);
    }
}

/// Drives one session: ingest documents, then converse turn by turn.
///
/// The controller is the only thing that mutates session state. It is meant
/// to be shared behind an `Arc`; all methods take `&self`. Sends are
/// serialized: a turn waits for the previous one to append its answer (or
/// fail) before its own user message is logged.
pub struct SessionController {
    service: Arc<dyn QaService>,
    identity: Option<UserIdentity>,
    inner: Mutex<SessionInner>,
    turn_gate: tokio::sync::Mutex<()>,
}

impl SessionController {
    pub fn new(service: Arc<dyn QaService>, identity: Option<UserIdentity>) -> Self {
        if identity.is_none() {
            log_warn("👤", "No user record found; requests will carry an empty session id");
        }
        Self {
            service,
            identity,
            inner: Mutex::new(SessionInner::default()),
            turn_gate: tokio::sync::Mutex::new(()),
        }
    }

    pub fn identity(&self) -> Option<&UserIdentity> {
        self.identity.as_ref()
    }

    fn session_id(&self) -> &str {
        self.identity.as_ref().map(|i| i.uid.as_str()).unwrap_or("")
    }

    /// Upload documents and replace the recommended questions.
    ///
    /// An empty document list is a no-op. On failure the ingestion flag and
    /// the previous questions are left untouched.
    pub async fn ingest_documents(&self, documents: &[PdfDocument]) -> Result<Vec<RecommendedQuestion>> {
        if documents.is_empty() {
            log_debug("Ingest requested with no documents; ignoring");
            return Ok(Vec::new());
        }

        let response = match self.service.ingest(self.session_id(), documents).await {
            Ok(response) => response,
            Err(e) => {
                log_error("❌", format!("Error uploading files: {}", e));
                return Err(e);
            }
        };

        let suggestions = QuestionSuggestionList::from_message(&response.message);
        let questions = suggestions.as_slice().to_vec();
        {
            let mut inner = self.inner.lock();
            inner.documents_ingested = true;
            inner.phase = inner.phase.after_ingest();
            inner.suggestions = suggestions;
        }
        log_info(
            "📄",
            format!(
                "Ingested {} document(s), {} recommended question(s)",
                documents.len(),
                questions.len()
            ),
        );

        Ok(questions)
    }

    /// Send a message and wait for the answer.
    ///
    /// Blank text raises the inline warning and returns a validation error
    /// without touching the log or the network. Otherwise the pending input
    /// is cleared and one turn runs.
    pub async fn send_message(&self, text: impl Into<String>) -> Result<Message> {
        let text = text.into();
        self.check_submission(&text)?;
        self.clear_input();
        self.run_turn(text).await
    }

    /// Send the pending input buffer
    pub async fn submit_input(&self) -> Result<Message> {
        let text = self.take_submission()?;
        self.run_turn(text).await
    }

    /// Send a recommended question; the question stays in the list
    pub async fn select_question(&self, id: usize) -> Result<Message> {
        let text = self
            .inner
            .lock()
            .suggestions
            .get(id)
            .map(|q| q.text.clone())
            .ok_or(PrajnaError::UnknownQuestion(id))?;
        self.send_message(text).await
    }

    /// Validate the pending input and take it, leaving the buffer empty.
    /// On failure the buffer is kept and the warning is raised.
    pub fn take_submission(&self) -> Result<String> {
        let mut inner = self.inner.lock();
        if inner.input.trim().is_empty() {
            inner.show_empty_warning = true;
            return Err(PrajnaError::Validation(EMPTY_MESSAGE_WARNING.to_string()));
        }
        Ok(std::mem::take(&mut inner.input))
    }

    /// Run one turn for already-taken text, without touching the input buffer
    pub async fn run_turn(&self, text: String) -> Result<Message> {
        self.check_submission(&text)?;

        let _in_flight = InFlight::enter(&self.inner);
        let _turn = self.turn_gate.lock().await;

        self.inner.lock().log.append(Message::user(text.clone()));

        let request = QueryRequest {
            email: self.identity.as_ref().and_then(|i| i.email.clone()),
            question: text,
            session_id: self.session_id().to_string(),
        };

        let response = match self.service.query(&request).await {
            Ok(response) => response,
            Err(e) => {
                log_error("❌", format!("Query failed, question left unanswered: {}", e));
                return Err(e);
            }
        };

        let citations = CitationNormalizer::normalize(&response.citations);
        log_debug(format!(
            "Answer received with {} of {} citation(s) kept",
            citations.len(),
            response.citations.len()
        ));

        let message = Message::bot(response.answer, citations);
        let mut inner = self.inner.lock();
        inner.log.append(message.clone());
        inner.phase = inner.phase.after_turn();

        Ok(message)
    }

    fn check_submission(&self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            self.inner.lock().show_empty_warning = true;
            return Err(PrajnaError::Validation(EMPTY_MESSAGE_WARNING.to_string()));
        }
        Ok(())
    }

    pub fn input(&self) -> String {
        self.inner.lock().input.clone()
    }

    /// Replace the pending input; clears the warning like any edit
    pub fn set_input(&self, text: impl Into<String>) {
        self.edit_input(|buf| *buf = text.into());
    }

    /// Edit the pending input in place; clears the warning
    pub fn edit_input(&self, edit: impl FnOnce(&mut String)) {
        let mut inner = self.inner.lock();
        edit(&mut inner.input);
        inner.show_empty_warning = false;
    }

    pub fn clear_input(&self) {
        self.inner.lock().input.clear();
    }

    pub fn show_empty_warning(&self) -> bool {
        self.inner.lock().show_empty_warning
    }

    pub fn phase(&self) -> SessionPhase {
        self.inner.lock().phase
    }

    pub fn documents_ingested(&self) -> bool {
        self.inner.lock().documents_ingested
    }

    pub fn suggestions(&self) -> QuestionSuggestionList {
        self.inner.lock().suggestions.clone()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.inner.lock().log.all().to_vec()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let inner = self.inner.lock();
        SessionSnapshot {
            phase: inner.phase,
            documents_ingested: inner.documents_ingested,
            suggestions: inner.suggestions.clone(),
            messages: inner.log.all().to_vec(),
            input: inner.input.clone(),
            show_empty_warning: inner.show_empty_warning,
            turn_in_flight: inner.turns_in_flight > 0,
        }
    }
}
