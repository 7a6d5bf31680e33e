#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use memoria_backend::{
    ApiResult, BackendError, BoxFuture, CloneReceipt, ConverseReply, ConverseRequest,
    SaveMemoriesRequest, VoiceBackend, VoiceCloneRequest,
};
use memoria_core::models::memorial::{
    AccessLevel, MemorialSettings, MemorialStats, VoiceMemorial, VoiceStatus,
};
use memoria_core::models::status::VoiceStatusReport;
use memoria_core::models::training::SavedCounts;
use memoria_core::models::tribute::Tribute;

pub const OWNER: &str = "owner-1";

pub fn tribute(id: &str, owner: &str) -> Tribute {
    Tribute {
        id: id.to_string(),
        owner_user_id: owner.to_string(),
        name: format!("Tribute {id}"),
    }
}

pub fn memorial(tribute_id: &str, voice_status: VoiceStatus) -> VoiceMemorial {
    VoiceMemorial {
        id: format!("vm-{tribute_id}"),
        tribute_id: tribute_id.to_string(),
        owner_user_id: OWNER.to_string(),
        tribute_name: None,
        voice_status,
        memory_count: 0,
        trait_count: 0,
        settings: MemorialSettings {
            is_enabled: true,
            access_level: AccessLevel::Family,
        },
        stats: MemorialStats::default(),
    }
}

fn upstream_down<T>() -> ApiResult<T> {
    Err(BackendError::Status {
        status: 503,
        message: "service unavailable".to_string(),
    })
}

/// Scripted backend. `None` for a response means the call fails with 503.
/// Delays let a test control which list arrives first.
#[derive(Default)]
pub struct ScriptedBackend {
    pub status: Option<VoiceStatusReport>,
    pub memorials: Option<Vec<VoiceMemorial>>,
    pub memorials_delay: Duration,
    pub tributes: Option<Vec<Tribute>>,
    pub tributes_delay: Duration,
    pub clone_receipt: Option<CloneReceipt>,
    pub clone_requests: Mutex<Vec<VoiceCloneRequest>>,
    pub saved: Option<SavedCounts>,
    pub save_requests: Mutex<Vec<SaveMemoriesRequest>>,
    pub deleted: Mutex<Vec<String>>,
}

impl VoiceBackend for ScriptedBackend {
    fn voice_status<'a>(&'a self, _: &'a str) -> BoxFuture<'a, ApiResult<VoiceStatusReport>> {
        Box::pin(async move { self.status.clone().map_or_else(upstream_down, Ok) })
    }

    fn voice_clone<'a>(
        &'a self,
        request: &'a VoiceCloneRequest,
    ) -> BoxFuture<'a, ApiResult<CloneReceipt>> {
        Box::pin(async move {
            self.clone_requests.lock().unwrap().push(request.clone());
            self.clone_receipt.clone().map_or_else(upstream_down, Ok)
        })
    }

    fn delete_voice<'a>(&'a self, tribute_id: &'a str) -> BoxFuture<'a, ApiResult<()>> {
        Box::pin(async move {
            self.deleted.lock().unwrap().push(tribute_id.to_string());
            Ok(())
        })
    }

    fn save_memories<'a>(
        &'a self,
        request: &'a SaveMemoriesRequest,
    ) -> BoxFuture<'a, ApiResult<SavedCounts>> {
        Box::pin(async move {
            self.save_requests.lock().unwrap().push(request.clone());
            self.saved.map_or_else(upstream_down, Ok)
        })
    }

    fn converse<'a>(&'a self, _: &'a ConverseRequest) -> BoxFuture<'a, ApiResult<ConverseReply>> {
        Box::pin(async { upstream_down() })
    }

    fn list_memorials<'a>(
        &'a self,
        _: &'a str,
    ) -> BoxFuture<'a, ApiResult<Vec<VoiceMemorial>>> {
        Box::pin(async move {
            tokio::time::sleep(self.memorials_delay).await;
            self.memorials.clone().map_or_else(upstream_down, Ok)
        })
    }

    fn list_tributes<'a>(&'a self, _: &'a str) -> BoxFuture<'a, ApiResult<Vec<Tribute>>> {
        Box::pin(async move {
            tokio::time::sleep(self.tributes_delay).await;
            self.tributes.clone().map_or_else(upstream_down, Ok)
        })
    }
}
