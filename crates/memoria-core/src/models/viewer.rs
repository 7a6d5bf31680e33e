use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Identity of whoever is looking at a memorial, as supplied by auth.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Viewer {
    pub user_id: Option<String>,
    #[serde(default)]
    pub role: ViewerRole,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ViewerRole {
    Family,
    Attendee,
    Provider,
    Admin,
    #[default]
    Guest,
}

impl Viewer {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(user_id: impl Into<String>, role: ViewerRole) -> Self {
        Self {
            user_id: Some(user_id.into()),
            role,
        }
    }

    /// An empty user id is an anonymous visitor.
    pub fn is_signed_in(&self) -> bool {
        self.user_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    pub fn is_owner(&self, owner_user_id: &str) -> bool {
        self.is_signed_in() && self.user_id.as_deref() == Some(owner_user_id)
    }
}
