use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A tribute page. Owned by the tribute collaborator; only the fields the
/// memorial flow reads are modelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Tribute {
    pub id: String,
    pub owner_user_id: String,
    pub name: String,
}
