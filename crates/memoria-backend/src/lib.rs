//! memoria-backend
//!
//! The voice memorial backend as seen from the client: a `VoiceBackend`
//! trait, the HTTP implementation, and the single place where response
//! bodies are decoded into domain types.

pub mod backend;
pub mod envelope;
pub mod error;
pub mod http;

pub use crate::backend::{
    BoxFuture, CloneReceipt, ConverseReply, ConverseRequest, SaveMemoriesRequest, VoiceBackend,
    VoiceCloneRequest,
};
pub use crate::error::{ApiResult, BackendError};
pub use crate::http::{BackendConfig, HttpBackend};
