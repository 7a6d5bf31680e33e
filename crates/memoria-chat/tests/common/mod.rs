#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;
use uuid::Uuid;

use memoria_backend::{
    ApiResult, BackendError, BoxFuture, CloneReceipt, ConverseReply, ConverseRequest,
    SaveMemoriesRequest, VoiceBackend, VoiceCloneRequest,
};
use memoria_chat::{AudioSink, PlaybackError};
use memoria_core::models::memorial::{
    AccessLevel, MemorialSettings, MemorialStats, VoiceMemorial, VoiceStatus,
};
use memoria_core::models::message::ConversationMessage;
use memoria_core::models::status::VoiceStatusReport;
use memoria_core::models::training::SavedCounts;
use memoria_core::models::tribute::Tribute;
use memoria_storage::TranscriptStore;

pub const OWNER: &str = "owner-1";
pub const TRIBUTE: &str = "tribute-1";

pub fn ready_memorial(access_level: AccessLevel) -> VoiceMemorial {
    VoiceMemorial {
        id: "memorial-1".to_string(),
        tribute_id: TRIBUTE.to_string(),
        owner_user_id: OWNER.to_string(),
        tribute_name: Some("Rose".to_string()),
        voice_status: VoiceStatus::Ready,
        memory_count: 3,
        trait_count: 1,
        settings: MemorialSettings {
            is_enabled: true,
            access_level,
        },
        stats: MemorialStats::default(),
    }
}

/// Scripted conversation backend.
///
/// With a gate installed, `converse` parks until the gate is notified, which
/// lets a test hold a send in flight.
#[derive(Default)]
pub struct FakeBackend {
    pub calls: AtomicUsize,
    pub requests: Mutex<Vec<ConverseRequest>>,
    pub fail: AtomicBool,
    pub gate: Option<Arc<Notify>>,
    pub audio_url: Option<String>,
    /// When set, captures what the store held at the moment of the call.
    pub store: Option<Arc<dyn TranscriptStore>>,
    pub stored_at_call: Mutex<Vec<Vec<ConversationMessage>>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn unused<T>() -> ApiResult<T> {
    Err(BackendError::Rejected("not scripted".to_string()))
}

impl VoiceBackend for FakeBackend {
    fn voice_status<'a>(&'a self, _: &'a str) -> BoxFuture<'a, ApiResult<VoiceStatusReport>> {
        Box::pin(async { unused() })
    }

    fn voice_clone<'a>(&'a self, _: &'a VoiceCloneRequest) -> BoxFuture<'a, ApiResult<CloneReceipt>> {
        Box::pin(async { unused() })
    }

    fn delete_voice<'a>(&'a self, _: &'a str) -> BoxFuture<'a, ApiResult<()>> {
        Box::pin(async { unused() })
    }

    fn save_memories<'a>(&'a self, _: &'a SaveMemoriesRequest) -> BoxFuture<'a, ApiResult<SavedCounts>> {
        Box::pin(async { unused() })
    }

    fn converse<'a>(&'a self, request: &'a ConverseRequest) -> BoxFuture<'a, ApiResult<ConverseReply>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request.clone());
            if let Some(store) = &self.store {
                let snapshot = store.load(&request.tribute_id).unwrap();
                self.stored_at_call.lock().unwrap().push(snapshot);
            }
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if self.fail.load(Ordering::SeqCst) {
                return Err(BackendError::Status {
                    status: 500,
                    message: "model offline".to_string(),
                });
            }
            Ok(ConverseReply {
                reply: format!("You said: {}", request.message),
                audio_url: self.audio_url.clone(),
            })
        })
    }

    fn list_memorials<'a>(&'a self, _: &'a str) -> BoxFuture<'a, ApiResult<Vec<VoiceMemorial>>> {
        Box::pin(async { unused() })
    }

    fn list_tributes<'a>(&'a self, _: &'a str) -> BoxFuture<'a, ApiResult<Vec<Tribute>>> {
        Box::pin(async { unused() })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    PlayUrl(Uuid, String),
    Speak(Uuid, String),
    Stop,
}

/// Records every call and tracks how many sources are active at once.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<SinkEvent>>,
    pub active: AtomicUsize,
    pub max_active: AtomicUsize,
    pub fail_next: AtomicBool,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().unwrap().clone()
    }

    fn start(&self, event: SinkEvent) -> Result<(), PlaybackError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(PlaybackError::Audio("device busy".to_string()));
        }
        self.events.lock().unwrap().push(event);
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now, Ordering::SeqCst);
        Ok(())
    }
}

impl AudioSink for RecordingSink {
    fn play_url(&self, message_id: Uuid, url: &str) -> Result<(), PlaybackError> {
        self.start(SinkEvent::PlayUrl(message_id, url.to_string()))
    }

    fn speak(&self, message_id: Uuid, text: &str) -> Result<(), PlaybackError> {
        self.start(SinkEvent::Speak(message_id, text.to_string()))
    }

    fn stop(&self) {
        self.events.lock().unwrap().push(SinkEvent::Stop);
        self.active.store(0, Ordering::SeqCst);
    }
}
