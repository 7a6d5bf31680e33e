//! memoria-chat
//!
//! Conversation sessions with a voice memorial: the transcript, outbound
//! sends and audio playback for one memorial and one viewer.

pub mod playback;
pub mod session;

pub use crate::playback::{AudioSink, PlaybackError, PlaybackOutcome, PlaybackSlot, PlaybackSource};
pub use crate::session::{ChatGate, ConversationSession, FALLBACK_REPLY, SendOutcome, SendRejection};
