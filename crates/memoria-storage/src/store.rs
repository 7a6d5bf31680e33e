use memoria_core::models::message::ConversationMessage;

use crate::error::StorageError;

/// Durable transcript storage for one viewer session.
///
/// Saving an empty transcript is the same as clearing it: afterwards
/// `load` returns no messages and nothing is left behind for the scope.
pub trait TranscriptStore: Send + Sync {
    /// Load the transcript for a tribute. A scope with no entry yields an
    /// empty transcript.
    fn load(&self, tribute_id: &str) -> Result<Vec<ConversationMessage>, StorageError>;

    /// Replace the stored transcript for a tribute.
    fn save(&self, tribute_id: &str, messages: &[ConversationMessage]) -> Result<(), StorageError>;

    /// Remove the stored transcript for a tribute.
    fn clear(&self, tribute_id: &str) -> Result<(), StorageError>;

    /// Move an entry that failed to load out of the way so the next save
    /// does not overwrite it. Returns where it went, if anywhere.
    fn set_aside(&self, _tribute_id: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }
}
