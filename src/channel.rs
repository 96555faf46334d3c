use chrono::{DateTime, Utc};

pub const GREETING: &str = "Hi! I'm Estate Scout. Tell me what you're looking for \
and I'll search live listings for you. Try: \"2 bed apartment in Austin under $2000\".";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    fn now(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            sent_at: Utc::now(),
        }
    }
}

/// Lifecycle of the single allowed outstanding chat request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendPhase {
    Idle,
    Sending,
    Done,
}

/// The conversation side of the client: an append-only display log plus the
/// one-outstanding-request guard. Every send either yields a trimmed
/// utterance to dispatch or is rejected up front; every completion resolves
/// to exactly one assistant message, success or failure alike.
#[derive(Debug)]
pub struct ConversationChannel {
    history: Vec<ChatMessage>,
    phase: SendPhase,
}

impl Default for ConversationChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationChannel {
    pub fn new() -> Self {
        Self {
            history: vec![ChatMessage::now(Role::Assistant, GREETING)],
            phase: SendPhase::Idle,
        }
    }

    /// Begin a send. Returns the trimmed utterance to dispatch, or `None`
    /// when the input is blank or a request is already outstanding. The
    /// user message is appended to history only when the send is accepted.
    pub fn begin_send(&mut self, input: &str) -> Option<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        if self.phase == SendPhase::Sending {
            tracing::debug!("Rejecting chat send while a request is outstanding");
            return None;
        }

        self.history.push(ChatMessage::now(Role::User, trimmed));
        self.phase = SendPhase::Sending;
        Some(trimmed.to_string())
    }

    /// Settle the outstanding send with the assistant's reply, or with the
    /// recovered message for a failed request.
    pub fn complete(&mut self, reply: impl Into<String>) {
        self.history.push(ChatMessage::now(Role::Assistant, reply));
        self.phase = SendPhase::Done;
    }

    pub fn is_sending(&self) -> bool {
        self.phase == SendPhase::Sending
    }

    pub fn phase(&self) -> SendPhase {
        self.phase
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }
}
