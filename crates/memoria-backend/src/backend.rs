use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use memoria_core::models::memorial::{VoiceMemorial, VoiceStatus};
use memoria_core::models::status::VoiceStatusReport;
use memoria_core::models::training::{Memory, PersonalityTrait, SavedCounts};
use memoria_core::models::tribute::Tribute;

use crate::error::ApiResult;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A voice sample submitted for cloning.
#[derive(Debug, Clone)]
pub struct VoiceCloneRequest {
    pub tribute_id: String,
    pub audio: Vec<u8>,
    pub content_type: String,
    pub duration_seconds: f64,
}

/// Acknowledgement of a clone request. The status, when present, is where
/// the clone service says the sample now stands.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneReceipt {
    #[serde(default)]
    pub voice_status: Option<VoiceStatus>,
}

#[derive(Debug, Clone)]
pub struct SaveMemoriesRequest {
    pub tribute_id: String,
    pub memories: Vec<Memory>,
    pub traits: Vec<PersonalityTrait>,
}

#[derive(Debug, Clone)]
pub struct ConverseRequest {
    pub tribute_id: String,
    pub viewer_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConverseReply {
    #[serde(alias = "response")]
    pub reply: String,
    #[serde(default)]
    pub audio_url: Option<String>,
}

/// The external voice memorial service.
///
/// Voice cloning, speech synthesis and reply generation all happen behind
/// this boundary. Methods return boxed futures for dyn compatibility.
pub trait VoiceBackend: Send + Sync {
    /// Current voice status, training-data counts and settings for a tribute.
    fn voice_status<'a>(
        &'a self,
        tribute_id: &'a str,
    ) -> BoxFuture<'a, ApiResult<VoiceStatusReport>>;

    /// Submit a sample. Drives `not_uploaded -> uploaded -> processing ->
    /// ready | failed` on the service side.
    fn voice_clone<'a>(
        &'a self,
        request: &'a VoiceCloneRequest,
    ) -> BoxFuture<'a, ApiResult<CloneReceipt>>;

    /// Delete the current sample ahead of a re-upload.
    fn delete_voice<'a>(&'a self, tribute_id: &'a str) -> BoxFuture<'a, ApiResult<()>>;

    fn save_memories<'a>(
        &'a self,
        request: &'a SaveMemoriesRequest,
    ) -> BoxFuture<'a, ApiResult<SavedCounts>>;

    fn converse<'a>(
        &'a self,
        request: &'a ConverseRequest,
    ) -> BoxFuture<'a, ApiResult<ConverseReply>>;

    /// Memorials already created by a user.
    fn list_memorials<'a>(
        &'a self,
        user_id: &'a str,
    ) -> BoxFuture<'a, ApiResult<Vec<VoiceMemorial>>>;

    /// Tributes owned by a user.
    fn list_tributes<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, ApiResult<Vec<Tribute>>>;
}
