use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::memorial::{MemorialSettings, MemorialStats, VoiceMemorial, VoiceStatus};

/// Snapshot returned by the voice status endpoint for one tribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct VoiceStatusReport {
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

impl From<&VoiceMemorial> for VoiceStatusReport {
    fn from(memorial: &VoiceMemorial) -> Self {
        Self {
            voice_status: memorial.voice_status,
            memory_count: memorial.memory_count,
            trait_count: memorial.trait_count,
            settings: memorial.settings,
            stats: memorial.stats,
        }
    }
}

impl VoiceMemorial {
    /// Build a memorial snapshot for a tribute known only through its status
    /// report. The memorial id is not part of the report, so the tribute id
    /// stands in for it.
    pub fn from_report(
        tribute_id: impl Into<String>,
        owner_user_id: impl Into<String>,
        report: &VoiceStatusReport,
    ) -> Self {
        let tribute_id = tribute_id.into();
        Self {
            id: tribute_id.clone(),
            tribute_id,
            owner_user_id: owner_user_id.into(),
            tribute_name: None,
            voice_status: report.voice_status,
            memory_count: report.memory_count,
            trait_count: report.trait_count,
            settings: report.settings,
            stats: report.stats,
        }
    }

    /// Overwrite the status-bearing fields with a freshly fetched report.
    pub fn apply_report(&mut self, report: &VoiceStatusReport) {
        self.voice_status = report.voice_status;
        self.memory_count = report.memory_count;
        self.trait_count = report.trait_count;
        self.settings = report.settings;
        self.stats = report.stats;
    }
}
