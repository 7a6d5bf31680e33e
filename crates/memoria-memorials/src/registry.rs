use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};

use memoria_backend::VoiceBackend;
use memoria_core::models::memorial::VoiceMemorial;
use memoria_core::models::tribute::Tribute;

use crate::error::MemorialError;

/// Everything the "your memorials" screen needs, fetched together.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryOverview {
    pub memorials: Vec<VoiceMemorial>,
    pub available: Vec<Tribute>,
}

pub struct VoiceMemorialRegistry {
    backend: Arc<dyn VoiceBackend>,
}

impl VoiceMemorialRegistry {
    pub fn new(backend: Arc<dyn VoiceBackend>) -> Self {
        Self { backend }
    }

    /// Memorials the user has already created.
    pub async fn list(&self, user_id: &str) -> Result<Vec<VoiceMemorial>, MemorialError> {
        self.backend
            .list_memorials(user_id)
            .await
            .map_err(|source| {
                warn!(user_id = %user_id, error = %source, "memorial list unavailable");
                MemorialError::UpstreamUnavailable {
                    what: "memorials",
                    source,
                }
            })
    }

    /// The memorial behind `tribute_id`, as a viewer of it should see it.
    ///
    /// With an owner hint the status report alone is enough. Otherwise a
    /// signed-in viewer's own memorials are searched; failing to list them is
    /// an error, since guessing the owner would change the access decision.
    pub async fn resolve(
        &self,
        tribute_id: &str,
        viewer_user_id: Option<&str>,
        owner_hint: Option<String>,
    ) -> Result<VoiceMemorial, MemorialError> {
        let report = self.backend.voice_status(tribute_id).await.map_err(|source| {
            warn!(tribute_id = %tribute_id, error = %source, "voice status unavailable");
            MemorialError::UpstreamUnavailable {
                what: "voice status",
                source,
            }
        })?;

        if let Some(owner) = owner_hint {
            return Ok(VoiceMemorial::from_report(tribute_id, owner, &report));
        }

        if let Some(user_id) = viewer_user_id {
            let own = self.list(user_id).await?;
            if let Some(mut memorial) = own.into_iter().find(|m| m.tribute_id == tribute_id) {
                memorial.apply_report(&report);
                return Ok(memorial);
            }
        }

        Ok(VoiceMemorial::from_report(tribute_id, String::new(), &report))
    }

    /// Tributes owned by the user that do not have a memorial yet.
    pub async fn available_tributes(
        &self,
        user_id: &str,
        existing: &[VoiceMemorial],
    ) -> Result<Vec<Tribute>, MemorialError> {
        let tributes = self.backend.list_tributes(user_id).await.map_err(|source| {
            warn!(user_id = %user_id, error = %source, "tribute list unavailable");
            MemorialError::UpstreamUnavailable {
                what: "tributes",
                source,
            }
        })?;
        Ok(available_from(tributes, existing, user_id))
    }

    /// Fetch both lists concurrently and join them by tribute id.
    ///
    /// If either fetch fails the whole overview is unavailable; a partial
    /// list would offer tributes that already have a memorial.
    pub async fn overview(&self, user_id: &str) -> Result<RegistryOverview, MemorialError> {
        let (memorials, tributes) = tokio::join!(
            self.backend.list_memorials(user_id),
            self.backend.list_tributes(user_id),
        );

        let memorials = memorials.map_err(|source| {
            warn!(user_id = %user_id, error = %source, "memorial list unavailable");
            MemorialError::UpstreamUnavailable {
                what: "memorials",
                source,
            }
        })?;
        let tributes = tributes.map_err(|source| {
            warn!(user_id = %user_id, error = %source, "tribute list unavailable");
            MemorialError::UpstreamUnavailable {
                what: "tributes",
                source,
            }
        })?;

        let available = available_from(tributes, &memorials, user_id);
        info!(
            user_id = %user_id,
            memorials = memorials.len(),
            available = available.len(),
            "memorial overview loaded"
        );
        Ok(RegistryOverview {
            memorials,
            available,
        })
    }
}

/// Tributes owned by `user_id`, minus those already present in `existing`.
///
/// Joined by id, so the result does not depend on which list arrived first.
/// A tribute listed twice is offered once, in first-seen order.
pub fn available_from(
    tributes: Vec<Tribute>,
    existing: &[VoiceMemorial],
    user_id: &str,
) -> Vec<Tribute> {
    let taken: HashSet<&str> = existing.iter().map(|m| m.tribute_id.as_str()).collect();
    let mut seen = HashSet::new();

    tributes
        .into_iter()
        .filter(|t| t.owner_user_id == user_id)
        .filter(|t| !taken.contains(t.id.as_str()))
        .filter(|t| seen.insert(t.id.clone()))
        .collect()
}
