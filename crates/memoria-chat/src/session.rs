//! One viewer's conversation with one memorial.
//!
//! The session owns the transcript and the playback slot. Sends are
//! single-flight: while a request is outstanding every other send is
//! rejected. `clear()` bumps a generation counter so a reply that lands
//! after the transcript was cleared is dropped instead of appended.
//!
//! The transcript is written to the store after every mutation and before
//! the next request goes out, so reopening a session restores it exactly.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use memoria_backend::{ConverseRequest, VoiceBackend};
use memoria_core::error::ErrorKind;
use memoria_core::models::memorial::VoiceMemorial;
use memoria_core::models::message::ConversationMessage;
use memoria_core::models::viewer::Viewer;
use memoria_policy::access::{self, AccessDecision};
use memoria_policy::profile::VoiceProfile;
use memoria_storage::TranscriptStore;

use crate::playback::{AudioSink, PlaybackError, PlaybackOutcome, PlaybackSlot, PlaybackSource};

/// Recorded in the transcript when a reply could not be obtained.
pub const FALLBACK_REPLY: &str =
    "I'm sorry, I'm having trouble responding right now. Please try again in a moment.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendRejection {
    EmptyMessage,
    AlreadySending,
    ChatDisabled,
    AccessDenied(AccessDecision),
}

impl SendRejection {
    pub fn error_kind(&self) -> ErrorKind {
        match self {
            Self::EmptyMessage | Self::AlreadySending => ErrorKind::Validation,
            Self::ChatDisabled | Self::AccessDenied(_) => ErrorKind::AccessDenied,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Nothing was appended and no request was issued.
    Rejected(SendRejection),
    /// The assistant reply that was appended.
    Replied(ConversationMessage),
    /// The error entry that was appended in place of a reply.
    Failed(ConversationMessage),
    /// The reply arrived after the transcript was cleared and was dropped.
    Discarded,
}

impl SendOutcome {
    /// The failure category, if the send did not produce a reply.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Rejected(rejection) => Some(rejection.error_kind()),
            Self::Failed(_) => Some(ErrorKind::ConversationFailure),
            Self::Replied(_) | Self::Discarded => None,
        }
    }
}

/// Whether the session would accept a send right now, and why not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatGate {
    pub chat_enabled: bool,
    pub access: AccessDecision,
}

impl ChatGate {
    pub fn is_open(&self) -> bool {
        self.chat_enabled && self.access.allowed
    }
}

struct SessionState {
    memorial: VoiceMemorial,
    viewer: Viewer,
    messages: Vec<ConversationMessage>,
    in_flight: bool,
    generation: u64,
    playback: PlaybackSlot,
}

impl SessionState {
    fn gate(&self) -> ChatGate {
        ChatGate {
            chat_enabled: VoiceProfile::from_memorial(&self.memorial).chat_enabled,
            access: access::evaluate(
                &self.memorial.settings,
                &self.viewer,
                &self.memorial.owner_user_id,
            ),
        }
    }
}

pub struct ConversationSession {
    tribute_id: String,
    backend: Arc<dyn VoiceBackend>,
    store: Arc<dyn TranscriptStore>,
    sink: Arc<dyn AudioSink>,
    /// False when an unreadable stored transcript could not be moved aside.
    durable: bool,
    state: Mutex<SessionState>,
}

impl ConversationSession {
    /// Open a session, restoring any transcript already stored for the
    /// memorial's tribute.
    pub fn open(
        memorial: VoiceMemorial,
        viewer: Viewer,
        backend: Arc<dyn VoiceBackend>,
        store: Arc<dyn TranscriptStore>,
        sink: Arc<dyn AudioSink>,
    ) -> Self {
        let tribute_id = memorial.tribute_id.clone();
        let (messages, durable) = match store.load(&tribute_id) {
            Ok(messages) => (messages, true),
            Err(e) => {
                warn!(tribute_id = %tribute_id, error = %e, "failed to restore transcript, starting empty");
                // Never overwrite what could not be read.
                match store.set_aside(&tribute_id) {
                    Ok(_) => (Vec::new(), true),
                    Err(e) => {
                        warn!(tribute_id = %tribute_id, error = %e, "could not move unreadable transcript aside, not persisting");
                        (Vec::new(), false)
                    }
                }
            }
        };
        debug!(tribute_id = %tribute_id, restored = messages.len(), "conversation session opened");

        Self {
            tribute_id,
            backend,
            store,
            sink,
            durable,
            state: Mutex::new(SessionState {
                memorial,
                viewer,
                messages,
                in_flight: false,
                generation: 0,
                playback: PlaybackSlot::default(),
            }),
        }
    }

    pub fn tribute_id(&self) -> &str {
        &self.tribute_id
    }

    pub async fn messages(&self) -> Vec<ConversationMessage> {
        self.state.lock().await.messages.clone()
    }

    pub async fn is_sending(&self) -> bool {
        self.state.lock().await.in_flight
    }

    pub async fn gate(&self) -> ChatGate {
        self.state.lock().await.gate()
    }

    /// Replace the memorial snapshot, e.g. after a status refresh.
    pub async fn update_memorial(&self, memorial: VoiceMemorial) {
        self.state.lock().await.memorial = memorial;
    }

    /// Send a message to the memorial.
    ///
    /// The user message is appended and persisted before the request goes
    /// out. A failed request is recorded as an error entry; it never
    /// surfaces as an `Err`.
    pub async fn send(&self, text: &str) -> SendOutcome {
        let text = text.trim();

        let (request, generation) = {
            let mut state = self.state.lock().await;

            if text.is_empty() {
                return SendOutcome::Rejected(SendRejection::EmptyMessage);
            }
            if state.in_flight {
                debug!(tribute_id = %self.tribute_id, "send rejected, another send is in flight");
                return SendOutcome::Rejected(SendRejection::AlreadySending);
            }
            let gate = state.gate();
            if !gate.chat_enabled {
                return SendOutcome::Rejected(SendRejection::ChatDisabled);
            }
            if !gate.access.allowed {
                return SendOutcome::Rejected(SendRejection::AccessDenied(gate.access));
            }

            state.messages.push(ConversationMessage::user(text));
            self.persist(&state.messages);
            state.in_flight = true;

            let request = ConverseRequest {
                tribute_id: self.tribute_id.clone(),
                viewer_id: state.viewer.user_id.clone(),
                message: text.to_string(),
            };
            (request, state.generation)
        };

        let result = self.backend.converse(&request).await;

        let mut state = self.state.lock().await;
        state.in_flight = false;

        if state.generation != generation {
            info!(tribute_id = %self.tribute_id, "discarding reply that arrived after clear");
            return SendOutcome::Discarded;
        }

        let outcome = match result {
            Ok(reply) => {
                let message = ConversationMessage::assistant(reply.reply, reply.audio_url);
                state.messages.push(message.clone());
                SendOutcome::Replied(message)
            }
            Err(e) => {
                warn!(tribute_id = %self.tribute_id, error = %e, "conversation request failed");
                let message = ConversationMessage::error(FALLBACK_REPLY);
                state.messages.push(message.clone());
                SendOutcome::Failed(message)
            }
        };
        self.persist(&state.messages);
        outcome
    }

    /// Empty the transcript, stop playback and remove the stored entry.
    /// An outstanding send is not cancelled, but its reply will be dropped.
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.playback.release(self.sink.as_ref());
        state.messages.clear();
        state.generation += 1;
        if self.durable {
            if let Err(e) = self.store.clear(&self.tribute_id) {
                warn!(tribute_id = %self.tribute_id, error = %e, "failed to clear stored transcript");
            }
        }
        info!(tribute_id = %self.tribute_id, "conversation cleared");
    }

    pub async fn now_playing(&self) -> Option<Uuid> {
        self.state.lock().await.playback.current()
    }

    /// Play a reply, or stop it if it is the one playing.
    ///
    /// A reply with an audio URL plays that; otherwise its text goes to the
    /// speech synthesizer. Whatever was playing before is stopped first.
    pub async fn toggle_playback(&self, message_id: Uuid) -> PlaybackOutcome {
        let mut state = self.state.lock().await;

        if state.playback.current() == Some(message_id) {
            state.playback.release(self.sink.as_ref());
            return PlaybackOutcome::Stopped { message_id };
        }

        let source = match state
            .messages
            .iter()
            .find(|m| m.id == message_id && m.is_assistant() && !m.is_error)
        {
            Some(message) => match &message.audio_url {
                Some(url) => PlaybackSource::AudioUrl(url.clone()),
                None => PlaybackSource::Speech(message.content.clone()),
            },
            None => return PlaybackOutcome::NotPlayable,
        };

        match state
            .playback
            .acquire(message_id, &source, self.sink.as_ref())
        {
            Ok(()) => PlaybackOutcome::Started { message_id, source },
            Err(error) => {
                warn!(message_id = %message_id, error = %error, "playback failed to start");
                PlaybackOutcome::Failed { message_id, error }
            }
        }
    }

    /// Called by the sink when playback of `message_id` ends normally.
    pub async fn playback_finished(&self, message_id: Uuid) {
        self.state.lock().await.playback.finished(message_id);
    }

    /// Called by the sink when playback of `message_id` errors midway. The
    /// transcript is left alone.
    pub async fn playback_failed(&self, message_id: Uuid, error: PlaybackError) {
        if self.state.lock().await.playback.finished(message_id) {
            warn!(message_id = %message_id, error = %error, "playback failed");
        }
    }

    fn persist(&self, messages: &[ConversationMessage]) {
        if !self.durable {
            return;
        }
        if let Err(e) = self.store.save(&self.tribute_id, messages) {
            warn!(tribute_id = %self.tribute_id, error = %e, "failed to persist transcript");
        }
    }
}
