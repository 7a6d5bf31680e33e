use tracing::{debug, warn};

use memoria_backend::VoiceBackend;
use memoria_policy::ProfileState;

/// Fetch a memorial's status and derive its profile.
///
/// A failed fetch becomes `ProfileState::Unavailable`; no flag is guessed.
pub async fn load_profile(backend: &dyn VoiceBackend, tribute_id: &str) -> ProfileState {
    let fetched = backend.voice_status(tribute_id).await;
    if let Err(e) = &fetched {
        warn!(tribute_id = %tribute_id, error = %e, "voice status unavailable");
    }
    let state = ProfileState::from_fetch(fetched);
    if let Some(profile) = state.profile() {
        debug!(
            tribute_id = %tribute_id,
            voice_status = %profile.voice_status,
            chat_enabled = profile.chat_enabled,
            "voice profile loaded"
        );
    }
    state
}
