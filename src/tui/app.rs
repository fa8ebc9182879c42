use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

use super::input::InputAction;
use super::typing::TypingAnimation;
use crate::app::UiConfig;
use crate::constants::UI_SCROLL_LINES;
use crate::runtime::load_documents;
use crate::session::{SessionController, SessionSnapshot};

/// Where keystrokes go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Viewing the chat; single-key shortcuts
    Normal,
    /// Typing a message
    Insert,
    /// Navigating the recommended questions
    Questions,
    /// Entering a `:` command
    Command,
}

/// Outcome of background work, reported back to the UI loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Answered,
    TurnFailed(String),
    Ingested(usize),
    IngestFailed(String),
}

/// Terminal application state, layered over a shared session controller
pub struct App {
    pub controller: Arc<SessionController>,
    pub ui_config: UiConfig,
    /// Latest session snapshot, refreshed every frame
    pub view: SessionSnapshot,
    pub state: AppState,
    pub running: bool,
    pub command_input: String,
    pub selected_question: usize,
    /// Lines scrolled up from the bottom of the chat
    pub scroll_offset: u16,
    pub status_message: Option<String>,
    pub typing: Option<TypingAnimation>,
    pub uploading: bool,
    seen_messages: usize,
    events_tx: mpsc::Sender<SessionEvent>,
    events_rx: mpsc::Receiver<SessionEvent>,
}

impl App {
    pub fn new(controller: Arc<SessionController>, ui_config: UiConfig) -> Self {
        let (events_tx, events_rx) = mpsc::channel(100);
        let view = controller.snapshot();
        let seen_messages = view.messages.len();

        Self {
            controller,
            ui_config,
            view,
            state: AppState::Insert,
            running: true,
            command_input: String::new(),
            selected_question: 0,
            scroll_offset: 0,
            status_message: None,
            typing: None,
            uploading: false,
            seen_messages,
            events_tx,
            events_rx,
        }
    }

    /// Pull fresh session state and advance the typing animation
    pub fn sync(&mut self) {
        let snapshot = self.controller.snapshot();

        if snapshot.messages.len() > self.seen_messages {
            let newest_bot = snapshot
                .messages
                .iter()
                .enumerate()
                .skip(self.seen_messages)
                .filter(|(_, m)| m.is_bot())
                .last();
            if let Some((index, message)) = newest_bot {
                self.typing = Some(TypingAnimation::new(
                    index,
                    message.text(),
                    self.ui_config.typing_chars_per_tick,
                ));
            }
            self.seen_messages = snapshot.messages.len();
            self.scroll_offset = 0;
        }

        if let Some(typing) = &mut self.typing {
            typing.tick();
            if typing.is_done() {
                self.typing = None;
            }
        }

        if self.selected_question >= snapshot.suggestions.len() {
            self.selected_question = snapshot.suggestions.len().saturating_sub(1);
        }

        self.view = snapshot;
    }

    /// Apply status updates from finished background work
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Answered => self.clear_status(),
            SessionEvent::TurnFailed(error) => {
                self.set_status(format!("✗ No answer received: {}", error));
            }
            SessionEvent::Ingested(count) => {
                self.uploading = false;
                self.set_status(format!("✓ PDF files uploaded, {} recommended question(s)", count));
            }
            SessionEvent::IngestFailed(error) => {
                self.uploading = false;
                self.set_status(format!("✗ Upload failed: {}", error));
            }
        }
    }

    /// Apply one input action
    pub fn apply(&mut self, action: InputAction) {
        match action {
            InputAction::Submit => self.submit(),
            InputAction::Newline => self.controller.edit_input(|buf| buf.push('\n')),
            InputAction::Insert(c) => match self.state {
                AppState::Command => self.command_input.push(c),
                _ => self.controller.edit_input(|buf| buf.push(c)),
            },
            InputAction::Delete => match self.state {
                AppState::Command => {
                    if self.command_input.pop().is_none() {
                        self.state = AppState::Insert;
                    }
                }
                _ => self.controller.edit_input(|buf| {
                    buf.pop();
                }),
            },
            InputAction::SelectPrev => {
                self.selected_question = self.selected_question.saturating_sub(1);
            }
            InputAction::SelectNext => {
                if self.selected_question + 1 < self.view.suggestions.len() {
                    self.selected_question += 1;
                }
            }
            InputAction::SendSelected => self.send_selected_question(),
            InputAction::RunCommand => {
                let command = std::mem::take(&mut self.command_input);
                self.state = AppState::Normal;
                self.run_command(&command);
            }
            InputAction::ScrollUp => self.scroll_up(UI_SCROLL_LINES),
            InputAction::ScrollDown => self.scroll_down(UI_SCROLL_LINES),
            InputAction::SwitchTo(state) => {
                if state == AppState::Command {
                    self.command_input.clear();
                }
                self.state = state;
            }
            InputAction::Quit => self.quit(),
            InputAction::None => {}
        }
    }

    /// Send the pending input; a blank buffer only raises the inline warning
    pub fn submit(&mut self) {
        if let Ok(text) = self.controller.take_submission() {
            self.spawn_turn(text);
        }
    }

    /// Send the highlighted recommended question
    pub fn send_selected_question(&mut self) {
        let Some(question) = self.view.suggestions.get(self.selected_question) else {
            self.set_status("No recommended questions yet. Upload PDFs with :upload <files>");
            return;
        };
        let text = question.text.clone();
        self.controller.clear_input();
        self.spawn_turn(text);
    }

    fn spawn_turn(&mut self, text: String) {
        // A new question reveals the previous answer in full
        if let Some(typing) = &mut self.typing {
            typing.finish();
        }

        let controller = self.controller.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let event = match controller.run_turn(text).await {
                Ok(_) => SessionEvent::Answered,
                Err(e) => SessionEvent::TurnFailed(e.to_string()),
            };
            let _ = tx.send(event).await;
        });
    }

    /// Upload PDFs in the background
    pub fn upload(&mut self, paths: Vec<PathBuf>) {
        if paths.is_empty() {
            self.set_status("Usage: :upload <file.pdf> [more.pdf ...]");
            return;
        }
        self.uploading = true;
        self.set_status(format!("Uploading {} file(s)...", paths.len()));

        let controller = self.controller.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let event = match load_documents(&paths).await {
                Ok(documents) => match controller.ingest_documents(&documents).await {
                    Ok(questions) => SessionEvent::Ingested(questions.len()),
                    Err(e) => SessionEvent::IngestFailed(e.to_string()),
                },
                Err(e) => SessionEvent::IngestFailed(format!("{:#}", e)),
            };
            let _ = tx.send(event).await;
        });
    }

    pub fn run_command(&mut self, command: &str) {
        let mut parts = command.split_whitespace();

        match parts.next() {
            Some("quit") | Some("q") => self.quit(),
            Some("upload") | Some("u") => {
                let paths = parts.map(PathBuf::from).collect();
                self.upload(paths);
            }
            Some("help") | Some("h") => self.set_status(
                ":upload <files> | :quit | Enter send | Alt+Enter newline | Tab questions | Esc normal",
            ),
            Some(other) => self.set_status(format!("Unknown command: {}", other)),
            None => {}
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn scroll_up(&mut self, amount: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(amount);
    }

    pub fn scroll_down(&mut self, amount: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}
