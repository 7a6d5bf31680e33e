use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use memoria_core::models::memorial::VoiceMemorial;
use memoria_core::models::status::VoiceStatusReport;
use memoria_core::models::training::{Memory, PersonalityTrait, SavedCounts};
use memoria_core::models::tribute::Tribute;

use crate::backend::{
    BoxFuture, CloneReceipt, ConverseReply, ConverseRequest, SaveMemoriesRequest, VoiceBackend,
    VoiceCloneRequest,
};
use crate::envelope;
use crate::error::{ApiResult, BackendError};

#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Root of the API, e.g. `https://example.org/api`.
    pub base_url: String,
    pub auth_token: Option<String>,
    pub timeout: Duration,
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token: None,
            timeout: Duration::from_secs(30),
        }
    }
}

// ── Wire bodies ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceCloneBody<'a> {
    audio_sample: String,
    content_type: &'a str,
    duration_seconds: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveMemoriesBody<'a> {
    memories: &'a [Memory],
    traits: &'a [PersonalityTrait],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConverseBody<'a> {
    viewer_id: Option<&'a str>,
    message: &'a str,
}

// ── HttpBackend ──────────────────────────────────────────────────────────────

/// `VoiceBackend` over the JSON HTTP API.
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: Url,
    auth_token: Option<String>,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BackendError::Config(e.to_string()))?;

        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(BackendError::Config(format!(
                "{} cannot be used as a base URL",
                config.base_url
            )));
        }

        Ok(Self {
            http,
            base_url,
            auth_token: config.auth_token,
        })
    }

    /// Build an endpoint URL; every segment is percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| BackendError::Config("base URL has no path".to_string()))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        let req = self.http.request(method, url);
        match &self.auth_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Send, check the status, and hand the body to the envelope decoder.
    async fn send_raw(&self, req: reqwest::RequestBuilder) -> ApiResult<Vec<u8>> {
        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.bytes().await?.to_vec();

        if !status.is_success() {
            let message = envelope::error_message(&body)
                .unwrap_or_else(|| String::from_utf8_lossy(&body).into_owned());
            return Err(BackendError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> ApiResult<T> {
        let body = self.send_raw(req).await?;
        envelope::decode(&body)
    }

    async fn send_field<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
        field: &str,
    ) -> ApiResult<T> {
        let body = self.send_raw(req).await?;
        envelope::decode_field(&body, field)
    }
}

impl VoiceBackend for HttpBackend {
    /// `GET /voice-memorials/:tribute_id/status`
    fn voice_status<'a>(
        &'a self,
        tribute_id: &'a str,
    ) -> BoxFuture<'a, ApiResult<VoiceStatusReport>> {
        Box::pin(async move {
            let url = self.endpoint(&["voice-memorials", tribute_id, "status"])?;
            debug!(tribute_id, "fetching voice status");
            self.send_json(self.request(reqwest::Method::GET, url)).await
        })
    }

    /// `POST /voice-memorials/:tribute_id/voice-clone`
    fn voice_clone<'a>(
        &'a self,
        request: &'a VoiceCloneRequest,
    ) -> BoxFuture<'a, ApiResult<CloneReceipt>> {
        Box::pin(async move {
            let url = self.endpoint(&["voice-memorials", &request.tribute_id, "voice-clone"])?;
            let body = VoiceCloneBody {
                audio_sample: STANDARD.encode(&request.audio),
                content_type: &request.content_type,
                duration_seconds: request.duration_seconds,
            };
            debug!(
                tribute_id = %request.tribute_id,
                bytes = request.audio.len(),
                "submitting voice sample"
            );
            self.send_json(self.request(reqwest::Method::POST, url).json(&body))
                .await
        })
    }

    /// `DELETE /voice-memorials/:tribute_id/voice`
    fn delete_voice<'a>(&'a self, tribute_id: &'a str) -> BoxFuture<'a, ApiResult<()>> {
        Box::pin(async move {
            let url = self.endpoint(&["voice-memorials", tribute_id, "voice"])?;
            let body = self
                .send_raw(self.request(reqwest::Method::DELETE, url))
                .await?;
            if body.is_empty() {
                return Ok(());
            }
            // Only the success flag matters here.
            envelope::decode::<serde_json::Value>(&body).map(|_| ())
        })
    }

    /// `POST /voice-memorials/:tribute_id/memories`
    fn save_memories<'a>(
        &'a self,
        request: &'a SaveMemoriesRequest,
    ) -> BoxFuture<'a, ApiResult<SavedCounts>> {
        Box::pin(async move {
            let url = self.endpoint(&["voice-memorials", &request.tribute_id, "memories"])?;
            let body = SaveMemoriesBody {
                memories: &request.memories,
                traits: &request.traits,
            };
            self.send_json(self.request(reqwest::Method::POST, url).json(&body))
                .await
        })
    }

    /// `POST /voice-memorials/:tribute_id/converse`
    fn converse<'a>(
        &'a self,
        request: &'a ConverseRequest,
    ) -> BoxFuture<'a, ApiResult<ConverseReply>> {
        Box::pin(async move {
            let url = self.endpoint(&["voice-memorials", &request.tribute_id, "converse"])?;
            let body = ConverseBody {
                viewer_id: request.viewer_id.as_deref(),
                message: &request.message,
            };
            self.send_json(self.request(reqwest::Method::POST, url).json(&body))
                .await
        })
    }

    /// `GET /users/:user_id/voice-memorials`
    fn list_memorials<'a>(
        &'a self,
        user_id: &'a str,
    ) -> BoxFuture<'a, ApiResult<Vec<VoiceMemorial>>> {
        Box::pin(async move {
            let url = self.endpoint(&["users", user_id, "voice-memorials"])?;
            self.send_field(self.request(reqwest::Method::GET, url), "memorials")
                .await
        })
    }

    /// `GET /users/:user_id/tributes`
    fn list_tributes<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, ApiResult<Vec<Tribute>>> {
        Box::pin(async move {
            let url = self.endpoint(&["users", user_id, "tributes"])?;
            self.send_field(self.request(reqwest::Method::GET, url), "tributes")
                .await
        })
    }
}
