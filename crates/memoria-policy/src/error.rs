use thiserror::Error;

use memoria_core::models::memorial::VoiceStatus;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("illegal voice status transition: {from} -> {to}")]
    IllegalTransition { from: VoiceStatus, to: VoiceStatus },

    #[error("voice status {to} reported without an uploaded sample (was {from})")]
    SkippedUpload { from: VoiceStatus, to: VoiceStatus },
}
