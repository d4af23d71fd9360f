use std::time::Instant;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Author {
    User,
    Assistant,
}

/// One message of the conversation. Turns can't be edited after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    role: Author,
    content: String,
}

impl ChatTurn {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Author::User,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Author::Assistant,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn role(&self) -> Author {
        self.role
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// How much of the conversation gets resent to the reply model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryWindow {
    /// Number of completed user/assistant pairs to keep, 0 keeps all of them.
    pub max_turns: usize,
}

impl HistoryWindow {
    #[must_use]
    pub fn unbounded() -> Self {
        Self { max_turns: 0 }
    }

    #[must_use]
    pub fn apply<'a>(&self, log: &'a [ChatTurn]) -> &'a [ChatTurn] {
        if self.max_turns == 0 {
            return log;
        }
        let keep = self.max_turns.saturating_mul(2);
        &log[log.len().saturating_sub(keep)..]
    }
}

/// The chat log of one session. Turns only ever get added in user/assistant
/// pairs, so the log always has an even length.
#[derive(Debug, Default)]
pub struct ConversationMemory {
    log: Vec<ChatTurn>,
}

impl ConversationMemory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn turns(&self) -> &[ChatTurn] {
        &self.log
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.log.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    #[must_use]
    pub fn completed_turns(&self) -> usize {
        self.log.len() / 2
    }

    pub fn push_pair(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.log.push(ChatTurn::user(user));
        self.log.push(ChatTurn::assistant(assistant));
    }

    pub fn clear(&mut self) {
        self.log.clear();
    }
}

/// Everything the app remembers about one browser session.
#[derive(Debug)]
pub struct SessionContext {
    id: Uuid,
    memory: ConversationMemory,
    voice_usage: u32,
    last_seen: Instant,
}

impl SessionContext {
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            memory: ConversationMemory::new(),
            voice_usage: 0,
            last_seen: Instant::now(),
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    #[must_use]
    pub fn voice_usage(&self) -> u32 {
        self.voice_usage
    }

    #[must_use]
    pub fn last_seen(&self) -> Instant {
        self.last_seen
    }

    pub fn touch(&mut self) {
        self.last_seen = Instant::now();
    }

    /// Counts a voice submission unless the session already used up `limit`.
    /// Returns whether the submission was accepted.
    pub fn try_accept_voice(&mut self, limit: u32) -> bool {
        if self.voice_usage >= limit {
            return false;
        }
        self.voice_usage += 1;
        true
    }

    /// Appends a finished turn. Only call this once the whole turn succeeded.
    pub fn append_turn(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.memory.push_pair(user, assistant);
    }

    /// Forgets the conversation. Submissions already counted stay counted.
    pub fn reset(&mut self) {
        self.memory.clear();
    }
}
