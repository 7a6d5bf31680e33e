//! Voice clone lifecycle.
//!
//! ```text
//! not_uploaded ──► uploaded ──► processing ──► ready
//!       ▲            │  ▲           │
//!       │            ▼  │           ▼
//!       └──────────  failed ◄───────┘
//! ```
//!
//! `uploaded`, `processing` and `failed` fall back to `not_uploaded` only when
//! the sample is deleted for a re-upload. A fresh upload after `failed` goes
//! straight to `uploaded`. `ready` is terminal.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use memoria_core::models::memorial::{VoiceMemorial, VoiceStatus};

use crate::error::LifecycleError;
use crate::profile::VoiceProfile;

/// Whether `from -> to` is a single legal step. Same-state is not a step.
pub fn can_transition(from: VoiceStatus, to: VoiceStatus) -> bool {
    use VoiceStatus::*;
    matches!(
        (from, to),
        (NotUploaded, Uploaded)
            | (Uploaded, Processing)
            | (Processing, Ready)
            | (Uploaded, Failed)
            | (Processing, Failed)
            | (Uploaded, NotUploaded)
            | (Processing, NotUploaded)
            | (Failed, NotUploaded)
            | (Failed, Uploaded)
    )
}

/// Tracks the observed voice status of one memorial and refuses moves the
/// lifecycle does not allow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceLifecycle {
    status: VoiceStatus,
    history: Vec<VoiceStatus>,
}

impl Default for VoiceLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl VoiceLifecycle {
    pub fn new() -> Self {
        Self::from_status(VoiceStatus::NotUploaded)
    }

    /// Start tracking from a snapshot the backend reported. The backend is
    /// trusted about everything that happened before the first observation.
    pub fn from_status(status: VoiceStatus) -> Self {
        Self {
            status,
            history: vec![status],
        }
    }

    pub fn status(&self) -> VoiceStatus {
        self.status
    }

    /// Every status this lifecycle has been in, oldest first.
    pub fn history(&self) -> &[VoiceStatus] {
        &self.history
    }

    /// Apply a single legal step.
    pub fn transition(&mut self, to: VoiceStatus) -> Result<(), LifecycleError> {
        if to == self.status {
            return Ok(());
        }
        if !can_transition(self.status, to) {
            return Err(LifecycleError::IllegalTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        self.history.push(to);
        Ok(())
    }

    /// Apply a polled status. A poll can miss the short-lived `processing`
    /// state, so `uploaded -> ready` and similar are accepted by filling it
    /// in. Nothing else is filled in: a sample that was never seen as
    /// `uploaded` cannot become `processing` or `ready`.
    ///
    /// Returns the statuses entered, in order.
    pub fn observe(&mut self, to: VoiceStatus) -> Result<Vec<VoiceStatus>, LifecycleError> {
        if to == self.status {
            return Ok(Vec::new());
        }
        if can_transition(self.status, to) {
            self.transition(to)?;
            return Ok(vec![to]);
        }
        if can_transition(self.status, VoiceStatus::Processing)
            && can_transition(VoiceStatus::Processing, to)
        {
            self.transition(VoiceStatus::Processing)?;
            self.transition(to)?;
            return Ok(vec![VoiceStatus::Processing, to]);
        }
        if matches!(to, VoiceStatus::Processing | VoiceStatus::Ready)
            && matches!(self.status, VoiceStatus::NotUploaded | VoiceStatus::Failed)
        {
            return Err(LifecycleError::SkippedUpload {
                from: self.status,
                to,
            });
        }
        Err(LifecycleError::IllegalTransition {
            from: self.status,
            to,
        })
    }

    /// A new sample was accepted by the clone service.
    pub fn start_upload(&mut self) -> Result<(), LifecycleError> {
        self.transition(VoiceStatus::Uploaded)
    }

    /// The current sample was deleted ahead of a re-upload.
    pub fn discard_sample(&mut self) -> Result<(), LifecycleError> {
        self.transition(VoiceStatus::NotUploaded)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum VoicePhase {
    New,
    VoicePending,
    VoiceProcessing,
    VoiceReady,
    VoiceFailed,
}

impl From<VoiceStatus> for VoicePhase {
    fn from(status: VoiceStatus) -> Self {
        match status {
            VoiceStatus::NotUploaded => Self::New,
            VoiceStatus::Uploaded => Self::VoicePending,
            VoiceStatus::Processing => Self::VoiceProcessing,
            VoiceStatus::Ready => Self::VoiceReady,
            VoiceStatus::Failed => Self::VoiceFailed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum MemoryPhase {
    MemoriesEmpty,
    MemoriesPresent,
}

/// A memorial projected onto the combined voice × memories state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MemorialPhase {
    pub voice: VoicePhase,
    pub memories: MemoryPhase,
    pub setup_complete: bool,
    pub chat_enabled: bool,
}

impl MemorialPhase {
    pub fn of(memorial: &VoiceMemorial) -> Self {
        Self::from_profile(&VoiceProfile::from_memorial(memorial))
    }

    pub fn from_profile(profile: &VoiceProfile) -> Self {
        Self {
            voice: profile.voice_status.into(),
            memories: if profile.memories_added {
                MemoryPhase::MemoriesPresent
            } else {
                MemoryPhase::MemoriesEmpty
            },
            setup_complete: profile.setup_complete,
            chat_enabled: profile.chat_enabled,
        }
    }
}
