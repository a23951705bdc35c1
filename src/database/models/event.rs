use serde::{Deserialize, Serialize};

pub const NOT_MODIFIED: &str = "none";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub event_name: String,
    pub created_date: String, // yyyy/mm/dd
    pub modified_date: String, // yyyy/mm/dd or "none"
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEventInput {
    #[serde(default)]
    pub event_name: String,
    #[serde(default, alias = "created")]
    pub created_date: Option<String>,
    #[serde(default, alias = "modified")]
    pub modified_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsertEventRequest {
    pub id: String,
    #[serde(rename = "newEvent")]
    pub new_event: NewEventInput,
}
