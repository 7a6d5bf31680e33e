mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{OWNER, ScriptedBackend, memorial, tribute};
use memoria_core::error::ErrorKind;
use memoria_core::models::memorial::VoiceStatus;
use memoria_core::models::status::VoiceStatusReport;
use memoria_memorials::{MemorialError, VoiceMemorialRegistry, available_from};

fn ids<T>(items: &[T], id: impl Fn(&T) -> &str) -> Vec<String> {
    items.iter().map(|i| id(i).to_string()).collect()
}

#[test]
fn existing_memorials_are_excluded_by_tribute_id() {
    let tributes = vec![
        tribute("t-1", OWNER),
        tribute("t-2", OWNER),
        tribute("t-3", OWNER),
    ];
    let existing = vec![memorial("t-2", VoiceStatus::Ready)];

    let available = available_from(tributes, &existing, OWNER);
    assert_eq!(ids(&available, |t| t.id.as_str()), ["t-1", "t-3"]);
}

#[test]
fn duplicates_and_foreign_tributes_are_dropped() {
    let tributes = vec![
        tribute("t-1", OWNER),
        tribute("t-9", "someone-else"),
        tribute("t-1", OWNER),
        tribute("t-4", OWNER),
    ];

    let available = available_from(tributes, &[], OWNER);
    assert_eq!(ids(&available, |t| t.id.as_str()), ["t-1", "t-4"]);
}

#[test]
fn result_does_not_depend_on_list_order() {
    let tributes = vec![tribute("t-1", OWNER), tribute("t-2", OWNER), tribute("t-3", OWNER)];
    let existing = vec![
        memorial("t-3", VoiceStatus::Processing),
        memorial("t-1", VoiceStatus::NotUploaded),
    ];
    let mut reversed_existing = existing.clone();
    reversed_existing.reverse();

    let forward = available_from(tributes.clone(), &existing, OWNER);
    let backward = available_from(tributes, &reversed_existing, OWNER);
    assert_eq!(forward, backward);
    assert_eq!(ids(&forward, |t| t.id.as_str()), ["t-2"]);
}

#[tokio::test]
async fn overview_joins_lists_fetched_out_of_order() {
    for (memorials_delay, tributes_delay) in [(40, 0), (0, 40)] {
        let backend = ScriptedBackend {
            memorials: Some(vec![memorial("t-1", VoiceStatus::Ready)]),
            memorials_delay: Duration::from_millis(memorials_delay),
            tributes: Some(vec![tribute("t-1", OWNER), tribute("t-2", OWNER)]),
            tributes_delay: Duration::from_millis(tributes_delay),
            ..ScriptedBackend::default()
        };
        let registry = VoiceMemorialRegistry::new(Arc::new(backend));

        let overview = registry.overview(OWNER).await.unwrap();
        assert_eq!(ids(&overview.memorials, |m| m.tribute_id.as_str()), ["t-1"]);
        assert_eq!(ids(&overview.available, |t| t.id.as_str()), ["t-2"]);
    }
}

#[tokio::test]
async fn overview_fails_whole_when_either_list_fails() {
    let backend = ScriptedBackend {
        memorials: None,
        tributes: Some(vec![tribute("t-1", OWNER)]),
        ..ScriptedBackend::default()
    };
    let registry = VoiceMemorialRegistry::new(Arc::new(backend));

    let err = registry.overview(OWNER).await.unwrap_err();
    assert!(matches!(
        err,
        MemorialError::UpstreamUnavailable { what: "memorials", .. }
    ));
    assert_eq!(err.error_kind(), ErrorKind::UpstreamUnavailable);

    let backend = ScriptedBackend {
        memorials: Some(Vec::new()),
        tributes: None,
        ..ScriptedBackend::default()
    };
    let registry = VoiceMemorialRegistry::new(Arc::new(backend));
    assert!(matches!(
        registry.overview(OWNER).await,
        Err(MemorialError::UpstreamUnavailable { what: "tributes", .. })
    ));
}

#[tokio::test]
async fn list_and_available_tributes() {
    let backend = ScriptedBackend {
        memorials: Some(vec![memorial("t-1", VoiceStatus::Uploaded)]),
        tributes: Some(vec![tribute("t-1", OWNER), tribute("t-5", OWNER)]),
        ..ScriptedBackend::default()
    };
    let registry = VoiceMemorialRegistry::new(Arc::new(backend));

    let existing = registry.list(OWNER).await.unwrap();
    let available = registry.available_tributes(OWNER, &existing).await.unwrap();
    assert_eq!(ids(&available, |t| t.id.as_str()), ["t-5"]);
}

#[tokio::test]
async fn resolve_finds_the_viewers_own_memorial() {
    let mut stored = memorial("t-1", VoiceStatus::Processing);
    stored.tribute_name = Some("Grandma".to_string());
    let mut current = stored.clone();
    current.voice_status = VoiceStatus::Ready;
    current.memory_count = 4;

    let backend = ScriptedBackend {
        status: Some(VoiceStatusReport::from(&current)),
        memorials: Some(vec![stored]),
        ..ScriptedBackend::default()
    };
    let registry = VoiceMemorialRegistry::new(Arc::new(backend));

    let resolved = registry.resolve("t-1", Some(OWNER), None).await.unwrap();
    assert_eq!(resolved.owner_user_id, OWNER);
    assert_eq!(resolved.tribute_name.as_deref(), Some("Grandma"));
    assert_eq!(resolved.voice_status, VoiceStatus::Ready);
    assert_eq!(resolved.memory_count, 4);
}

#[tokio::test]
async fn resolve_fails_when_own_memorials_cannot_be_listed() {
    let backend = ScriptedBackend {
        status: Some(VoiceStatusReport::from(&memorial("t-1", VoiceStatus::Ready))),
        memorials: None,
        ..ScriptedBackend::default()
    };
    let registry = VoiceMemorialRegistry::new(Arc::new(backend));

    let err = registry.resolve("t-1", Some(OWNER), None).await.unwrap_err();
    assert!(matches!(
        err,
        MemorialError::UpstreamUnavailable { what: "memorials", .. }
    ));
    assert_eq!(err.error_kind(), ErrorKind::UpstreamUnavailable);
}

#[tokio::test]
async fn resolve_fails_when_status_is_unavailable() {
    let registry = VoiceMemorialRegistry::new(Arc::new(ScriptedBackend::default()));

    let err = registry
        .resolve("t-1", None, Some(OWNER.to_string()))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        MemorialError::UpstreamUnavailable { what: "voice status", .. }
    ));
}

#[tokio::test]
async fn resolve_uses_owner_hint_without_listing() {
    let backend = ScriptedBackend {
        status: Some(VoiceStatusReport::from(&memorial("t-1", VoiceStatus::Ready))),
        memorials: None,
        ..ScriptedBackend::default()
    };
    let registry = VoiceMemorialRegistry::new(Arc::new(backend));

    let resolved = registry
        .resolve("t-1", Some("guest-7"), Some(OWNER.to_string()))
        .await
        .unwrap();
    assert_eq!(resolved.owner_user_id, OWNER);

    let anonymous = registry.resolve("t-1", None, None).await.unwrap();
    assert_eq!(anonymous.owner_user_id, "");
}
