//! Setup completion score and checklist.
//!
//! Each checklist step carries equal weight. A complete setup scores 100
//! outright, whatever the individual steps say.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use memoria_core::models::memorial::VoiceStatus;

use crate::profile::VoiceProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SetupStep {
    VoiceSample,
    Stories,
    Traits,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ChecklistItem {
    pub step: SetupStep,
    pub label: String,
    pub status_text: String,
    pub complete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SetupProgress {
    pub percent: u8,
    pub checklist: Vec<ChecklistItem>,
}

pub fn checklist(profile: &VoiceProfile) -> Vec<ChecklistItem> {
    vec![
        ChecklistItem {
            step: SetupStep::VoiceSample,
            label: "Voice sample".to_string(),
            status_text: voice_status_text(profile.voice_status).to_string(),
            complete: profile.voice_ready,
        },
        ChecklistItem {
            step: SetupStep::Stories,
            label: "Stories captured".to_string(),
            status_text: match profile.memory_count {
                0 => "Add at least one story".to_string(),
                1 => "1 story".to_string(),
                n => format!("{n} stories"),
            },
            complete: profile.stories_added,
        },
        ChecklistItem {
            step: SetupStep::Traits,
            label: "Personality traits".to_string(),
            status_text: match profile.trait_count {
                0 => "Add personality traits".to_string(),
                1 => "1 trait".to_string(),
                n => format!("{n} traits"),
            },
            complete: profile.traits_added,
        },
    ]
}

fn voice_status_text(status: VoiceStatus) -> &'static str {
    match status {
        VoiceStatus::NotUploaded => "Not started",
        VoiceStatus::Uploaded => "Uploaded, waiting to process",
        VoiceStatus::Processing => "Processing voice sample",
        VoiceStatus::Ready => "Voice clone ready",
        VoiceStatus::Failed => "Processing failed, upload a new sample",
    }
}

/// Completion percentage, 0..=100.
pub fn percent(profile: &VoiceProfile) -> u8 {
    if profile.setup_complete {
        return 100;
    }
    let steps = checklist(profile);
    let total = steps.len() as u32;
    let done = steps.iter().filter(|s| s.complete).count() as u32;
    // round(100 * done / total), half away from zero
    ((200 * done + total) / (2 * total)) as u8
}

pub fn progress(profile: &VoiceProfile) -> SetupProgress {
    SetupProgress {
        percent: percent(profile),
        checklist: checklist(profile),
    }
}
