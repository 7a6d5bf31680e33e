use serde::{Deserialize, Serialize};

use memoria_core::models::message::ConversationMessage;

use crate::error::StorageError;

/// On-disk shape of one memorial's transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTranscript {
    pub tribute_id: String,
    pub messages: Vec<ConversationMessage>,
    pub updated_at: jiff::Timestamp,
}

impl StoredTranscript {
    pub fn new(tribute_id: &str, messages: &[ConversationMessage]) -> Self {
        Self {
            tribute_id: tribute_id.to_string(),
            messages: messages.to_vec(),
            updated_at: jiff::Timestamp::now(),
        }
    }

    /// Return the messages if this document belongs to `tribute_id`.
    pub fn into_messages(self, tribute_id: &str) -> Result<Vec<ConversationMessage>, StorageError> {
        if self.tribute_id != tribute_id {
            return Err(StorageError::ScopeMismatch {
                expected: tribute_id.to_string(),
                found: self.tribute_id,
            });
        }
        Ok(self.messages)
    }
}
