use std::collections::HashMap;
use std::sync::Mutex;

use memoria_core::models::message::ConversationMessage;

use crate::error::StorageError;
use crate::store::TranscriptStore;

/// Process-local store. Lives as long as the viewer session does. Entries
/// are keyed by the raw tribute id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<ConversationMessage>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any entry exists for the tribute.
    pub fn contains(&self, tribute_id: &str) -> Result<bool, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.contains_key(tribute_id))
    }
}

impl TranscriptStore for MemoryStore {
    fn load(&self, tribute_id: &str) -> Result<Vec<ConversationMessage>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(tribute_id).cloned().unwrap_or_default())
    }

    fn save(&self, tribute_id: &str, messages: &[ConversationMessage]) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        if messages.is_empty() {
            entries.remove(tribute_id);
        } else {
            entries.insert(tribute_id.to_string(), messages.to_vec());
        }
        Ok(())
    }

    fn clear(&self, tribute_id: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.remove(tribute_id);
        Ok(())
    }
}
