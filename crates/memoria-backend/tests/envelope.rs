use memoria_backend::BackendError;
use memoria_backend::envelope::{decode, decode_field, error_message};
use memoria_core::models::memorial::{VoiceMemorial, VoiceStatus};
use memoria_core::models::status::VoiceStatusReport;
use memoria_core::models::tribute::Tribute;

const STATUS: &str = r#"{"voiceStatus":"ready","memoryCount":3,"traitCount":1,
    "settings":{"isEnabled":true,"accessLevel":"invited"},"stats":{"totalConversations":4}}"#;

#[test]
fn bare_and_wrapped_payloads_decode_the_same() {
    let bare: VoiceStatusReport = decode(STATUS.as_bytes()).unwrap();
    let wrapped: VoiceStatusReport =
        decode(format!(r#"{{"success":true,"data":{STATUS}}}"#).as_bytes()).unwrap();
    assert_eq!(bare, wrapped);
    assert_eq!(bare.voice_status, VoiceStatus::Ready);
    assert_eq!(bare.memory_count, 3);
}

#[test]
fn success_false_is_rejected_with_message() {
    let err = decode::<VoiceStatusReport>(br#"{"success":false,"error":"memorial not found"}"#)
        .unwrap_err();
    match err {
        BackendError::Rejected(msg) => assert_eq!(msg, "memorial not found"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn nested_error_objects_are_read() {
    assert_eq!(
        error_message(br#"{"error":{"message":"quota exceeded"}}"#).as_deref(),
        Some("quota exceeded")
    );
    assert_eq!(error_message(b"<html>oops</html>"), None);
}

#[test]
fn named_lists_are_found_in_every_wrapping() {
    let item = r#"{"id":"t-1","ownerUserId":"u-1","name":"Grandma Rose"}"#;
    let shapes = [
        format!(r#"{{"data":{{"tributes":[{item}]}}}}"#),
        format!(r#"{{"tributes":[{item}]}}"#),
        format!(r#"{{"data":[{item}]}}"#),
        format!(r#"[{item}]"#),
    ];
    for shape in &shapes {
        let tributes: Vec<Tribute> = decode_field(shape.as_bytes(), "tributes").unwrap();
        assert_eq!(tributes.len(), 1, "shape {shape}");
        assert_eq!(tributes[0].name, "Grandma Rose");
    }
}

#[test]
fn missing_list_is_an_error_not_an_empty_list() {
    let err = decode_field::<Vec<VoiceMemorial>>(br#"{"ok":true}"#, "memorials").unwrap_err();
    assert!(matches!(err, BackendError::Decode(_)));
}

#[test]
fn invalid_json_is_a_decode_error() {
    assert!(matches!(
        decode::<VoiceStatusReport>(b"not json"),
        Err(BackendError::Decode(_))
    ));
}
