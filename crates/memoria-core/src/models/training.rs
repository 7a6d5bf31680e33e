use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A story about the person, used to condition conversational replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Memory {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

/// A personality trait with an optional example of how it showed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PersonalityTrait {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Counts the memory store reports as persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SavedCounts {
    pub memories_saved: u32,
    pub traits_saved: u32,
}
