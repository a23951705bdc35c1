use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityNameInput {
    #[serde(default)]
    pub activity_name: String,
}
