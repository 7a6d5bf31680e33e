use memoria_core::models::memorial::{
    AccessLevel, MemorialSettings, MemorialStats, VoiceMemorial, VoiceStatus,
};
use memoria_core::models::status::VoiceStatusReport;
use memoria_core::models::viewer::{Viewer, ViewerRole};
use memoria_policy::lifecycle::{MemorialPhase, MemoryPhase, VoicePhase};
use memoria_policy::profile::{ProfileState, VoiceProfile};
use memoria_policy::{evaluate, progress};

fn memorial(status: VoiceStatus, memories: u32, traits: u32, enabled: bool) -> VoiceMemorial {
    VoiceMemorial {
        id: "m-1".to_string(),
        tribute_id: "t-1".to_string(),
        owner_user_id: "owner".to_string(),
        tribute_name: None,
        voice_status: status,
        memory_count: memories,
        trait_count: traits,
        settings: MemorialSettings {
            is_enabled: enabled,
            access_level: AccessLevel::Family,
        },
        stats: MemorialStats::default(),
    }
}

#[test]
fn flags_follow_status() {
    let p = VoiceProfile::from_memorial(&memorial(VoiceStatus::NotUploaded, 0, 0, true));
    assert!(!p.voice_uploaded && !p.voice_processing && !p.voice_ready);

    let p = VoiceProfile::from_memorial(&memorial(VoiceStatus::Processing, 0, 0, true));
    assert!(p.voice_uploaded && p.voice_processing && !p.voice_ready);

    let p = VoiceProfile::from_memorial(&memorial(VoiceStatus::Failed, 0, 0, true));
    assert!(p.voice_uploaded && p.voice_failed && !p.voice_ready);
}

#[test]
fn traits_alone_count_as_memories() {
    let p = VoiceProfile::from_memorial(&memorial(VoiceStatus::Ready, 0, 2, true));
    assert!(p.memories_added);
    assert!(p.setup_complete);
    assert!(p.chat_enabled);
}

#[test]
fn chat_requires_owner_enablement() {
    let p = VoiceProfile::from_memorial(&memorial(VoiceStatus::Ready, 1, 0, false));
    assert!(p.setup_complete);
    assert!(!p.chat_enabled);
}

#[test]
fn ready_voice_without_training_data_is_incomplete() {
    let p = VoiceProfile::from_memorial(&memorial(VoiceStatus::Ready, 0, 0, true));
    assert!(!p.setup_complete);
    assert!(!p.chat_enabled);

    let report = progress::progress(&p);
    let stories = report
        .checklist
        .iter()
        .find(|i| i.label == "Stories captured")
        .unwrap();
    assert_eq!(stories.status_text, "Add at least one story");
    assert!(!stories.complete);
    assert_eq!(report.percent, 33);
}

#[test]
fn owner_family_member_can_chat_once_setup_is_complete() {
    let m = memorial(VoiceStatus::Ready, 3, 0, true);
    let p = VoiceProfile::from_memorial(&m);
    assert!(p.chat_enabled);

    let owner = Viewer::signed_in("owner", ViewerRole::Family);
    assert!(evaluate(&m.settings, &owner, &m.owner_user_id).allowed);
}

#[test]
fn failed_fetch_is_unavailable_not_a_default() {
    let state = ProfileState::from_fetch::<String>(Err("timeout".to_string()));
    assert!(state.is_unavailable());
    assert!(state.profile().is_none());
    assert_eq!(
        state.error_kind(),
        Some(memoria_core::error::ErrorKind::UpstreamUnavailable)
    );

    let report = VoiceStatusReport {
        voice_status: VoiceStatus::NotUploaded,
        memory_count: 0,
        trait_count: 0,
        settings: MemorialSettings::default(),
        stats: MemorialStats::default(),
    };
    let loaded = ProfileState::from_fetch::<String>(Ok(report));
    assert!(!loaded.is_unavailable());
    assert_ne!(loaded, state);
}

#[test]
fn phase_projection() {
    let phase = MemorialPhase::of(&memorial(VoiceStatus::Uploaded, 0, 0, true));
    assert_eq!(phase.voice, VoicePhase::VoicePending);
    assert_eq!(phase.memories, MemoryPhase::MemoriesEmpty);

    let phase = MemorialPhase::of(&memorial(VoiceStatus::Ready, 1, 1, true));
    assert_eq!(phase.voice, VoicePhase::VoiceReady);
    assert_eq!(phase.memories, MemoryPhase::MemoriesPresent);
    assert!(phase.setup_complete && phase.chat_enabled);
}
