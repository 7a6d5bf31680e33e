use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A single entry in a conversation transcript.
///
/// Messages are created client-side on send and on receive, and appended to
/// an ordered transcript scoped to one viewer session and one tribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ConversationMessage {
    pub id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: jiff::Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum MessageRole {
    User,
    Assistant,
}

impl ConversationMessage {
    fn new(role: MessageRole, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content,
            timestamp: jiff::Timestamp::now(),
            audio_url: None,
            is_error: false,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content.into())
    }

    pub fn assistant(content: impl Into<String>, audio_url: Option<String>) -> Self {
        let mut message = Self::new(MessageRole::Assistant, content.into());
        message.audio_url = audio_url;
        message
    }

    /// An assistant-side entry recording a failed exchange.
    pub fn error(content: impl Into<String>) -> Self {
        let mut message = Self::new(MessageRole::Assistant, content.into());
        message.is_error = true;
        message
    }

    pub fn is_assistant(&self) -> bool {
        self.role == MessageRole::Assistant
    }
}
