use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A team ("조") of an event together with its per-activity scores.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub team_name: String,
    pub total_score: i64,
    pub participate_num: i64,
    pub activities: BTreeMap<String, i64>,
    pub snack: Vec<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamNameInput {
    #[serde(default)]
    pub team_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSnackInput {
    pub snack: Vec<bool>,
    pub team_name: String,
    /// Defaults to the signed-in admin
    pub id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScoreInput {
    pub activity_id: String,
    pub team_name: String,
    /// Number or numeric string, as sent by the score form
    pub new_score: serde_json::Value,
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreAndParticipation {
    pub score: i64,
    pub participate_num: i64,
    pub snack: Vec<bool>,
}
