//! Audio playback exclusivity.
//!
//! A session has one playback slot. Whatever holds it (a provided audio URL
//! or synthesized speech) is stopped before anything else starts.

use memoria_core::error::ErrorKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PlaybackSource {
    /// Pre-rendered audio returned with the reply.
    AudioUrl(String),
    /// Text handed to the speech synthesizer.
    Speech(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("audio playback failed: {0}")]
    Audio(String),

    #[error("speech synthesis failed: {0}")]
    Speech(String),
}

/// Where audio actually comes out. Starting returns once playback has begun;
/// completion and errors after that are reported back to the session.
pub trait AudioSink: Send + Sync {
    fn play_url(&self, message_id: Uuid, url: &str) -> Result<(), PlaybackError>;

    fn speak(&self, message_id: Uuid, text: &str) -> Result<(), PlaybackError>;

    /// Cancel whatever is playing. Must be safe to call when idle.
    fn stop(&self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackOutcome {
    Started { message_id: Uuid, source: PlaybackSource },
    Stopped { message_id: Uuid },
    /// Unknown id, a user message, or an error entry.
    NotPlayable,
    Failed { message_id: Uuid, error: PlaybackError },
}

impl PlaybackOutcome {
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Failed { .. } => Some(ErrorKind::PlaybackFailure),
            Self::Started { .. } | Self::Stopped { .. } | Self::NotPlayable => None,
        }
    }
}

/// The single "currently playing" marker of a session.
#[derive(Debug, Default)]
pub struct PlaybackSlot {
    current: Option<Uuid>,
}

impl PlaybackSlot {
    pub fn current(&self) -> Option<Uuid> {
        self.current
    }

    /// Stop the current holder, then start `source` for `message_id`. The
    /// slot is only marked once the sink has started.
    pub fn acquire(
        &mut self,
        message_id: Uuid,
        source: &PlaybackSource,
        sink: &dyn AudioSink,
    ) -> Result<(), PlaybackError> {
        self.release(sink);
        match source {
            PlaybackSource::AudioUrl(url) => sink.play_url(message_id, url)?,
            PlaybackSource::Speech(text) => sink.speak(message_id, text)?,
        }
        self.current = Some(message_id);
        Ok(())
    }

    /// Stop and clear the current holder, if any.
    pub fn release(&mut self, sink: &dyn AudioSink) -> Option<Uuid> {
        let released = self.current.take();
        if released.is_some() {
            sink.stop();
        }
        released
    }

    /// Clear the marker after playback ended on its own. Only the current
    /// holder can clear it; a late callback from an earlier message is ignored.
    pub fn finished(&mut self, message_id: Uuid) -> bool {
        if self.current == Some(message_id) {
            self.current = None;
            true
        } else {
            false
        }
    }
}
