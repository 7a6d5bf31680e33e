use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The per-tribute record tracking a voice clone and its training data.
///
/// One memorial exists per tribute. Counts are only ever raised by
/// successful saves on the external memory store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct VoiceMemorial {
    pub id: String,
    pub tribute_id: String,
    pub owner_user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tribute_name: Option<String>,
    pub voice_status: VoiceStatus,
    #[serde(default)]
    pub memory_count: u32,
    #[serde(default)]
    pub trait_count: u32,
    #[serde(default)]
    pub settings: MemorialSettings,
    #[serde(default)]
    pub stats: MemorialStats,
}

/// Lifecycle of the voice clone built from an uploaded sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum VoiceStatus {
    NotUploaded,
    Uploaded,
    Processing,
    Ready,
    Failed,
}

impl VoiceStatus {
    pub const ALL: [VoiceStatus; 5] = [
        VoiceStatus::NotUploaded,
        VoiceStatus::Uploaded,
        VoiceStatus::Processing,
        VoiceStatus::Ready,
        VoiceStatus::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotUploaded => "not_uploaded",
            Self::Uploaded => "uploaded",
            Self::Processing => "processing",
            Self::Ready => "ready",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for VoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which viewers may converse with a memorial.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AccessLevel {
    #[default]
    Family,
    Invited,
    AllVisitors,
}

/// Owner-controlled conversation settings. Missing settings decode as
/// disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MemorialSettings {
    #[serde(default)]
    pub is_enabled: bool,
    #[serde(default)]
    pub access_level: AccessLevel,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MemorialStats {
    #[serde(default)]
    pub total_conversations: u64,
}
