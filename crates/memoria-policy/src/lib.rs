//! memoria-policy
//!
//! Pure derivations over a memorial snapshot. No I/O; every function here
//! is deterministic for identical inputs:
//!
//! - `access::evaluate()`: may this viewer converse with the memorial?
//! - `profile::VoiceProfile`: boolean flags derived from voice status and counts
//! - `progress::progress()`: setup completion score and checklist
//! - `lifecycle`: legal voice status transitions and the memorial phase

pub mod access;
pub mod error;
pub mod lifecycle;
pub mod profile;
pub mod progress;

pub use crate::access::{AccessDecision, AccessReason, evaluate};
pub use crate::error::LifecycleError;
pub use crate::lifecycle::{MemorialPhase, VoiceLifecycle};
pub use crate::profile::{ProfileState, VoiceProfile};
pub use crate::progress::{ChecklistItem, SetupProgress, SetupStep};
