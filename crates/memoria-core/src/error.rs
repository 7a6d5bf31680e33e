use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid scope: {0}")]
    InvalidScope(String),
}

/// The user-visible failure categories of the voice memorial flow.
///
/// Every failure is caught at the component that started the operation and
/// classified into one of these; none reach the caller as a panic or raw
/// transport error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ErrorKind {
    /// Empty message, short recording, blank training data.
    Validation,
    /// The access policy rejected the viewer.
    AccessDenied,
    /// A status or list fetch failed.
    UpstreamUnavailable,
    /// A conversation request failed; recorded in the transcript.
    ConversationFailure,
    /// Audio or speech playback failed; clears the playing marker only.
    PlaybackFailure,
}

/// What the UI offers the viewer after a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RecoveryAction {
    SignIn,
    Retry,
    GoBack,
    None,
}

impl ErrorKind {
    /// Whether this failure blocks the surrounding UI region.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::AccessDenied | Self::UpstreamUnavailable)
    }

    pub fn recovery(&self) -> RecoveryAction {
        match self {
            Self::Validation => RecoveryAction::None,
            Self::AccessDenied => RecoveryAction::GoBack,
            Self::UpstreamUnavailable => RecoveryAction::Retry,
            Self::ConversationFailure => RecoveryAction::Retry,
            Self::PlaybackFailure => RecoveryAction::None,
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Validation => "Please check your input and try again.",
            Self::AccessDenied => "You don't have permission to talk with this memorial.",
            Self::UpstreamUnavailable => "We were unable to load this memorial. Please try again.",
            Self::ConversationFailure => "The conversation could not be continued just now.",
            Self::PlaybackFailure => "Audio could not be played.",
        }
    }
}
