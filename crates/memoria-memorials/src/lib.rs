//! memoria-memorials
//!
//! Owner-facing memorial management: listing memorials and the tributes
//! that could still get one, loading a memorial's voice profile, uploading
//! voice samples and saving training data.

pub mod error;
pub mod profile;
pub mod registry;
pub mod setup;

pub use crate::error::MemorialError;
pub use crate::profile::load_profile;
pub use crate::registry::{RegistryOverview, VoiceMemorialRegistry, available_from};
pub use crate::setup::{
    MIN_SAMPLE_SECONDS, SampleWarning, TrainingBatch, UploadOutcome, VoiceSetup, apply_counts,
};
