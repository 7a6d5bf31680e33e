//! Voice sample upload and training data.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use memoria_backend::{SaveMemoriesRequest, VoiceBackend, VoiceCloneRequest};
use memoria_core::models::memorial::{VoiceMemorial, VoiceStatus};
use memoria_core::models::training::{Memory, PersonalityTrait, SavedCounts};

use crate::error::MemorialError;

/// Shortest recording the clone service reliably works with. Shorter
/// samples are still accepted.
pub const MIN_SAMPLE_SECONDS: f64 = 30.0;

/// Non-blocking notes about an accepted sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SampleWarning {
    TooShort { duration_seconds: f64, minimum_seconds: f64 },
}

impl std::fmt::Display for SampleWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooShort {
                duration_seconds,
                minimum_seconds,
            } => write!(
                f,
                "sample is {duration_seconds:.0}s; at least {minimum_seconds:.0}s gives a better voice clone"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadOutcome {
    /// Where the sample stands after submission.
    pub voice_status: VoiceStatus,
    pub warning: Option<SampleWarning>,
}

/// Stories and traits entered in one sitting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainingBatch {
    pub memories: Vec<Memory>,
    pub traits: Vec<PersonalityTrait>,
}

impl TrainingBatch {
    /// Trim every field and drop entries with nothing to say. A memory needs
    /// content and a trait needs a name.
    pub fn cleaned(self) -> Self {
        let memories = self
            .memories
            .into_iter()
            .map(|m| Memory {
                title: m.title.trim().to_string(),
                content: m.content.trim().to_string(),
                year: m.year,
            })
            .filter(|m| !m.content.is_empty())
            .collect();
        let traits = self
            .traits
            .into_iter()
            .map(|t| PersonalityTrait {
                name: t.name.trim().to_string(),
                description: t.description.trim().to_string(),
            })
            .filter(|t| !t.name.is_empty())
            .collect();
        Self { memories, traits }
    }

    pub fn is_empty(&self) -> bool {
        self.memories.is_empty() && self.traits.is_empty()
    }
}

pub struct VoiceSetup {
    backend: Arc<dyn VoiceBackend>,
}

impl VoiceSetup {
    pub fn new(backend: Arc<dyn VoiceBackend>) -> Self {
        Self { backend }
    }

    /// Submit a recorded sample for cloning.
    pub async fn upload_sample(
        &self,
        tribute_id: &str,
        audio: Vec<u8>,
        content_type: &str,
        duration_seconds: f64,
    ) -> Result<UploadOutcome, MemorialError> {
        if audio.is_empty() {
            return Err(MemorialError::Validation("voice sample is empty".to_string()));
        }
        if !duration_seconds.is_finite() || duration_seconds < 0.0 {
            return Err(MemorialError::Validation(format!(
                "invalid sample duration: {duration_seconds}"
            )));
        }

        let warning = (duration_seconds < MIN_SAMPLE_SECONDS).then_some(SampleWarning::TooShort {
            duration_seconds,
            minimum_seconds: MIN_SAMPLE_SECONDS,
        });
        if let Some(w) = &warning {
            warn!(tribute_id = %tribute_id, duration_seconds, "{w}");
        }

        let request = VoiceCloneRequest {
            tribute_id: tribute_id.to_string(),
            audio,
            content_type: content_type.to_string(),
            duration_seconds,
        };
        let receipt = self.backend.voice_clone(&request).await?;
        let voice_status = receipt.voice_status.unwrap_or(VoiceStatus::Uploaded);

        info!(
            tribute_id = %tribute_id,
            bytes = request.audio.len(),
            voice_status = %voice_status,
            "voice sample uploaded"
        );
        Ok(UploadOutcome {
            voice_status,
            warning,
        })
    }

    /// Remove the current sample so a new one can be recorded.
    pub async fn delete_voice(&self, tribute_id: &str) -> Result<(), MemorialError> {
        self.backend.delete_voice(tribute_id).await?;
        info!(tribute_id = %tribute_id, "voice sample deleted");
        Ok(())
    }

    /// Save stories and traits. Blank entries are dropped; a batch with
    /// nothing left is refused without a request.
    pub async fn save_training_data(
        &self,
        tribute_id: &str,
        batch: TrainingBatch,
    ) -> Result<SavedCounts, MemorialError> {
        let batch = batch.cleaned();
        if batch.is_empty() {
            return Err(MemorialError::Validation(
                "add at least one story or personality trait".to_string(),
            ));
        }

        let request = SaveMemoriesRequest {
            tribute_id: tribute_id.to_string(),
            memories: batch.memories,
            traits: batch.traits,
        };
        let counts = self.backend.save_memories(&request).await?;
        info!(
            tribute_id = %tribute_id,
            memories_saved = counts.memories_saved,
            traits_saved = counts.traits_saved,
            "training data saved"
        );
        Ok(counts)
    }
}

/// Raise a memorial's local counts by what the store reported saving.
pub fn apply_counts(memorial: &mut VoiceMemorial, counts: SavedCounts) {
    memorial.memory_count = memorial.memory_count.saturating_add(counts.memories_saved);
    memorial.trait_count = memorial.trait_count.saturating_add(counts.traits_saved);
}
