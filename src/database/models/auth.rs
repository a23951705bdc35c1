use serde::{Deserialize, Serialize};

use super::event::Event;

/// Body of `/auth/create` and `/auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsInput {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleAuthInput {
    /// Identity token issued by Google to the client
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(rename = "eventList")]
    pub event_list: Vec<Event>,
    pub id: String,
    pub access_token: String,
}
