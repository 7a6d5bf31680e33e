use std::path::{Path, PathBuf};

use memoria_core::models::message::ConversationMessage;
use memoria_core::storage_keys;

use crate::error::StorageError;
use crate::store::TranscriptStore;
use crate::transcript::StoredTranscript;

/// JSON files under a per-session directory, one per tribute.
///
/// Writes go to a temp file that is renamed into place, so a reader never
/// sees a half-written transcript.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, tribute_id: &str) -> Result<PathBuf, StorageError> {
        Ok(self.root.join(storage_keys::transcript(tribute_id)?))
    }
}

impl TranscriptStore for FileStore {
    fn load(&self, tribute_id: &str) -> Result<Vec<ConversationMessage>, StorageError> {
        let path = self.path_for(tribute_id)?;
        if !path.exists() {
            return Ok(Vec::new());
        }
        let json = std::fs::read(&path)?;
        let stored: StoredTranscript = serde_json::from_slice(&json)?;
        tracing::debug!(tribute_id, path = %path.display(), "transcript loaded");
        stored.into_messages(tribute_id)
    }

    fn save(&self, tribute_id: &str, messages: &[ConversationMessage]) -> Result<(), StorageError> {
        if messages.is_empty() {
            return self.clear(tribute_id);
        }

        let path = self.path_for(tribute_id)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_vec_pretty(&StoredTranscript::new(tribute_id, messages))?;
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &json)?;
        std::fs::rename(&tmp_path, &path)?;

        tracing::debug!(tribute_id, count = messages.len(), "transcript saved");
        Ok(())
    }

    fn clear(&self, tribute_id: &str) -> Result<(), StorageError> {
        let path = self.path_for(tribute_id)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(tribute_id, "transcript removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn set_aside(&self, tribute_id: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(tribute_id)?;
        if !path.exists() {
            return Ok(None);
        }
        let aside = path.with_extension(format!(
            "json.unreadable-{}",
            jiff::Timestamp::now().as_millisecond()
        ));
        std::fs::rename(&path, &aside)?;
        tracing::warn!(tribute_id, path = %aside.display(), "unreadable transcript moved aside");
        Ok(Some(aside.display().to_string()))
    }
}
