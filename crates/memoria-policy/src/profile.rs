use serde::{Deserialize, Serialize};
use ts_rs::TS;

use memoria_core::error::ErrorKind;
use memoria_core::models::memorial::{VoiceMemorial, VoiceStatus};
use memoria_core::models::status::VoiceStatusReport;

/// Flags derived from one voice status snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct VoiceProfile {
    pub voice_status: VoiceStatus,
    pub memory_count: u32,
    pub trait_count: u32,
    pub voice_uploaded: bool,
    pub voice_processing: bool,
    pub voice_ready: bool,
    pub voice_failed: bool,
    pub stories_added: bool,
    pub traits_added: bool,
    pub memories_added: bool,
    pub setup_complete: bool,
    pub chat_enabled: bool,
}

impl VoiceProfile {
    pub fn derive(report: &VoiceStatusReport) -> Self {
        let voice_ready = report.voice_status == VoiceStatus::Ready;
        let stories_added = report.memory_count > 0;
        let traits_added = report.trait_count > 0;
        let memories_added = stories_added || traits_added;
        let setup_complete = voice_ready && memories_added;

        Self {
            voice_status: report.voice_status,
            memory_count: report.memory_count,
            trait_count: report.trait_count,
            voice_uploaded: report.voice_status != VoiceStatus::NotUploaded,
            voice_processing: report.voice_status == VoiceStatus::Processing,
            voice_ready,
            voice_failed: report.voice_status == VoiceStatus::Failed,
            stories_added,
            traits_added,
            memories_added,
            setup_complete,
            chat_enabled: setup_complete && report.settings.is_enabled,
        }
    }

    pub fn from_memorial(memorial: &VoiceMemorial) -> Self {
        Self::derive(&VoiceStatusReport::from(memorial))
    }
}

/// Result of fetching a memorial's voice status.
///
/// `Unavailable` is its own state: it is neither "not ready" nor "ready",
/// and every consumer has to handle it explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "state", rename_all = "snake_case")]
#[ts(export)]
pub enum ProfileState {
    Loaded { profile: VoiceProfile },
    Unavailable { reason: String },
}

impl ProfileState {
    pub fn from_fetch<E: std::fmt::Display>(fetched: Result<VoiceStatusReport, E>) -> Self {
        match fetched {
            Ok(report) => Self::Loaded {
                profile: VoiceProfile::derive(&report),
            },
            Err(e) => Self::Unavailable {
                reason: e.to_string(),
            },
        }
    }

    pub fn profile(&self) -> Option<&VoiceProfile> {
        match self {
            Self::Loaded { profile } => Some(profile),
            Self::Unavailable { .. } => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.is_unavailable().then_some(ErrorKind::UpstreamUnavailable)
    }
}
