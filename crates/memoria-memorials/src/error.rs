use thiserror::Error;

use memoria_backend::BackendError;
use memoria_core::error::ErrorKind;

#[derive(Debug, Error)]
pub enum MemorialError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("unable to load {what}: {source}")]
    UpstreamUnavailable {
        what: &'static str,
        #[source]
        source: BackendError,
    },

    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}

impl MemorialError {
    pub fn error_kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::UpstreamUnavailable { .. } | Self::Backend(_) => ErrorKind::UpstreamUnavailable,
        }
    }
}
