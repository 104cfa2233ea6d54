use chrono::{DateTime, Utc};

/// Seeded as the first message of every conversation.
pub const GREETING: &str = "Hi there! I'm an AI assistant trained on this resume. \
    Ask me anything about my experience or skills.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Message {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Append-only message log. Entries are never mutated or removed; the
/// insertion order is both the display order and the history order
/// replayed on the next request.
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// An accepted submission: the new message plus the prior conversation
/// with timestamps stripped, ready for the dispatch call.
#[derive(Debug, Clone, PartialEq)]
pub struct Outgoing {
    pub message: String,
    pub history: Vec<(Role, String)>,
}

/// The assistant widget's three state cells: conversation, pending
/// flag, and visibility. Pure state transitions; rendering and the
/// actual network call live elsewhere.
#[derive(Debug)]
pub struct ChatWidget {
    pub open: bool,
    pub input: String,
    pub cursor: usize,
    pub conversation: Conversation,
    pub pending: bool,
}

impl ChatWidget {
    pub fn new() -> Self {
        let mut conversation = Conversation::new();
        conversation.append(Message::new(Role::Model, GREETING));
        Self {
            open: false,
            input: String::new(),
            cursor: 0,
            conversation,
            pending: false,
        }
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Gate a submission. Refused silently when the trimmed input is
    /// empty or a request is already in flight; refusal changes
    /// nothing. On accept: clears the input, appends the user message,
    /// sets pending, and returns what the dispatch needs. The history
    /// snapshot is taken before the new message is appended.
    pub fn submit(&mut self) -> Option<Outgoing> {
        if self.pending || self.input.trim().is_empty() {
            return None;
        }

        let message = std::mem::take(&mut self.input);
        self.cursor = 0;

        let history = self
            .conversation
            .messages()
            .iter()
            .map(|m| (m.role, m.text.clone()))
            .collect();

        self.conversation.append(Message::new(Role::User, message.clone()));
        self.pending = true;

        Some(Outgoing { message, history })
    }

    /// Record the reply for the outstanding request. The caller has
    /// already collapsed failures into the apology string, so this is
    /// always a model entry.
    pub fn resolve(&mut self, reply: String) {
        self.conversation.append(Message::new(Role::Model, reply));
        self.pending = false;
    }
}
