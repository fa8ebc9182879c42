use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    cli::OutputFormat,
    models::PdfDocument,
    session::{Citation, RecommendedQuestion, SessionController},
};

/// What to send once documents are in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Ask(String),
    Pick(usize),
}

/// Result of a non-interactive run
#[derive(Debug, Serialize, Deserialize)]
pub struct NonInteractiveResult {
    /// Uploaded file names
    pub uploaded: Vec<String>,
    /// Recommended questions from the upload
    pub suggestions: Vec<RecommendedQuestion>,
    /// The question that was sent
    pub question: Option<String>,
    /// The answer, if one arrived
    pub answer: Option<String>,
    /// Normalized citations of the answer
    pub citations: Vec<Citation>,
    /// Any errors that occurred
    pub errors: Vec<String>,
    /// Metadata about the execution
    pub metadata: ExecutionMetadata,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExecutionMetadata {
    pub session_id: Option<String>,
    pub documents_ingested: bool,
    /// Execution time in milliseconds
    pub duration_ms: u128,
}

/// Runs one upload + one turn and reports it
pub struct NonInteractiveRunner {
    controller: Arc<SessionController>,
}

impl NonInteractiveRunner {
    pub fn new(controller: Arc<SessionController>) -> Self {
        Self { controller }
    }

    /// Ingest the documents (if any), then send the prompt
    pub async fn execute(&self, documents: Vec<PdfDocument>, prompt: Prompt) -> NonInteractiveResult {
        let start_time = std::time::Instant::now();
        let mut errors = Vec::new();

        let uploaded = documents.iter().map(|d| d.file_name().to_string()).collect();
        let suggestions = match self.controller.ingest_documents(&documents).await {
            Ok(questions) => questions,
            Err(e) => {
                errors.push(format!("Upload failed: {}", e));
                Vec::new()
            }
        };

        let question = match &prompt {
            Prompt::Ask(text) => Some(text.clone()),
            Prompt::Pick(id) => self.controller.suggestions().get(*id).map(|q| q.text.clone()),
        };

        let outcome = match prompt {
            Prompt::Ask(text) => self.controller.send_message(text).await,
            Prompt::Pick(id) => self.controller.select_question(id).await,
        };

        let (answer, citations) = match outcome {
            Ok(message) => (Some(message.text().to_string()), message.citations().to_vec()),
            Err(e) => {
                errors.push(e.to_string());
                (None, Vec::new())
            }
        };

        NonInteractiveResult {
            uploaded,
            suggestions,
            question,
            answer,
            citations,
            errors,
            metadata: ExecutionMetadata {
                session_id: self.controller.identity().map(|i| i.uid.clone()),
                documents_ingested: self.controller.documents_ingested(),
                duration_ms: start_time.elapsed().as_millis(),
            },
        }
    }

    /// Format the result based on output format
    pub fn format_result(&self, result: &NonInteractiveResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(result)
                .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize result: {}\"}}", e)),
            OutputFormat::Text => {
                let mut output = String::new();

                if !result.suggestions.is_empty() {
                    output.push_str(&format!("{}\n", "Recommended questions:".bold()));
                    for q in &result.suggestions {
                        output.push_str(&format!("  {}. {}\n", q.id, q.text));
                    }
                    output.push('\n');
                }

                if let Some(question) = &result.question {
                    output.push_str(&format!("{} {}\n", "You:".cyan().bold(), question));
                }
                if let Some(answer) = &result.answer {
                    output.push_str(&format!("{} {}\n", "Prajna:".green().bold(), answer));
                }
                if !result.citations.is_empty() {
                    output.push_str(&format!("\n{}\n", "Citations:".bold()));
                    for citation in &result.citations {
                        output.push_str(&format!("  • {}\n", citation));
                    }
                }

                if !result.errors.is_empty() {
                    output.push_str(&format!("\n{}\n", "Errors:".red()));
                    for error in &result.errors {
                        output.push_str(&format!("  • {}\n", error));
                    }
                }

                output
            }
            OutputFormat::Markdown => {
                let mut output = String::new();

                if !result.suggestions.is_empty() {
                    output.push_str("## Recommended Questions\n\n");
                    for q in &result.suggestions {
                        output.push_str(&format!("{}. {}\n", q.id + 1, q.text));
                    }
                    output.push('\n');
                }

                if let Some(question) = &result.question {
                    output.push_str(&format!("## Question\n\n{}\n\n", question));
                }
                if let Some(answer) = &result.answer {
                    output.push_str(&format!("## Answer\n\n{}\n\n", answer));
                }
                if !result.citations.is_empty() {
                    output.push_str("### Citations\n\n");
                    for citation in &result.citations {
                        output.push_str(&format!("- {}\n", citation));
                    }
                    output.push('\n');
                }

                if !result.errors.is_empty() {
                    output.push_str("## Errors\n\n");
                    for error in &result.errors {
                        output.push_str(&format!("- {}\n", error));
                    }
                    output.push('\n');
                }

                output
            }
        }
    }
}
