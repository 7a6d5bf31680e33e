//! Conversation access policy.
//!
//! The single place where role and ownership checks live. Rules are
//! evaluated top to bottom and the first match wins:
//!
//! | # | Condition                                         | Allowed | Login |
//! |---|---------------------------------------------------|---------|-------|
//! | 1 | `settings.is_enabled == false`                    | no      | no    |
//! | 2 | `family`, no user id                              | no      | yes   |
//! | 2 | `family`, role is not family and viewer not owner | no      | no    |
//! | 2 | `family`, otherwise                               | yes     | no    |
//! | 3 | `invited`, no user id                             | no      | yes   |
//! | 3 | `invited`, otherwise                              | yes     | no    |
//! | 4 | `all_visitors`                                    | yes     | no    |

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use memoria_core::error::{ErrorKind, RecoveryAction};
use memoria_core::models::memorial::{AccessLevel, MemorialSettings};
use memoria_core::models::viewer::{Viewer, ViewerRole};

/// Outcome of evaluating the access policy for one viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AccessDecision {
    pub allowed: bool,
    pub reason: AccessReason,
    pub requires_login: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AccessReason {
    Allowed,
    DisabledByOwner,
    LoginRequired,
    FamilyOnly,
}

impl AccessReason {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Allowed => "Conversation is available",
            Self::DisabledByOwner => "Voice conversations have been disabled by the memorial owner",
            Self::LoginRequired => "Please sign in to talk with this memorial",
            Self::FamilyOnly => "Only family members can talk with this memorial",
        }
    }
}

impl std::fmt::Display for AccessReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl AccessDecision {
    const fn allow() -> Self {
        Self {
            allowed: true,
            reason: AccessReason::Allowed,
            requires_login: false,
        }
    }

    const fn deny(reason: AccessReason, requires_login: bool) -> Self {
        Self {
            allowed: false,
            reason,
            requires_login,
        }
    }

    /// `None` when allowed; otherwise the banner category.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        (!self.allowed).then_some(ErrorKind::AccessDenied)
    }

    /// A denied viewer who could sign in is offered the login action.
    pub fn recovery(&self) -> RecoveryAction {
        if self.allowed {
            RecoveryAction::None
        } else if self.requires_login {
            RecoveryAction::SignIn
        } else {
            RecoveryAction::GoBack
        }
    }
}

/// Decide whether `viewer` may converse with a memorial owned by
/// `owner_user_id` under `settings`.
pub fn evaluate(settings: &MemorialSettings, viewer: &Viewer, owner_user_id: &str) -> AccessDecision {
    if !settings.is_enabled {
        return AccessDecision::deny(AccessReason::DisabledByOwner, false);
    }

    match settings.access_level {
        AccessLevel::Family => {
            if !viewer.is_signed_in() {
                AccessDecision::deny(AccessReason::LoginRequired, true)
            } else if viewer.role != ViewerRole::Family && !viewer.is_owner(owner_user_id) {
                AccessDecision::deny(AccessReason::FamilyOnly, false)
            } else {
                AccessDecision::allow()
            }
        }
        AccessLevel::Invited => {
            if viewer.is_signed_in() {
                AccessDecision::allow()
            } else {
                AccessDecision::deny(AccessReason::LoginRequired, true)
            }
        }
        AccessLevel::AllVisitors => AccessDecision::allow(),
    }
}
