use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::citations::Citation;

/// Who sent a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Bot => "Prajna",
        }
    }
}

/// One entry of the conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    sender: Sender,
    text: String,
    citations: Vec<Citation>,
    timestamp: DateTime<Local>,
}

impl Message {
    /// A user message; user messages never carry citations
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            citations: Vec::new(),
            timestamp: Local::now(),
        }
    }

    /// A bot answer. Citations are expected to be normalized already.
    pub fn bot(text: impl Into<String>, citations: Vec<Citation>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            citations,
            timestamp: Local::now(),
        }
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn citations(&self) -> &[Citation] {
        &self.citations
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn is_bot(&self) -> bool {
        self.sender == Sender::Bot
    }
}

/// Ordered, append-only message history
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The only mutator
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// All messages in append order
    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut log = ConversationLog::new();
        assert!(log.is_empty());

        log.append(Message::user("Hi"));
        log.append(Message::bot("Hello", vec![Citation::new(1, 1, "a.pdf")]));
        log.append(Message::user("Again"));

        let senders: Vec<Sender> = log.all().iter().map(Message::sender).collect();
        assert_eq!(senders, vec![Sender::User, Sender::Bot, Sender::User]);
        assert_eq!(log.len(), 3);
        assert_eq!(log.all()[2].text(), "Again");
    }

    #[test]
    fn test_user_message_has_no_citations() {
        let msg = Message::user("  raw input  ");
        assert_eq!(msg.text(), "  raw input  ");
        assert!(msg.citations().is_empty());
        assert!(!msg.is_bot());
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sender::Bot).unwrap(), "\"bot\"");
    }
}
