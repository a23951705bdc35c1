use serde::{Deserialize, Serialize};

use crate::database::models::{Event, Team};
use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub code: Option<String>,
}

impl<T> ApiResponse<T> {
    // Success with data
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            code: None,
        }
    }

    // Success with message
    pub fn success_with_message(data: Option<T>, message: &str) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.to_string()),
            code: None,
        }
    }
}

impl ApiResponse<()> {
    // Error response (no data)
    pub fn error(message: &str, code: &str) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.to_string()),
            code: Some(code.to_string()),
        }
    }
}

pub const EVENT_NAME_REQUIRED: &str = "행사 이름이 필요합니다.";

/// Query string shared by the event-scoped endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventQuery {
    pub event_name: Option<String>,
    pub id: Option<String>,
}

pub fn required_param<'a>(value: &'a Option<String>, message: &str) -> Result<&'a str, AppError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::Validation(message.to_string()))
}

impl EventQuery {
    pub fn event_name(&self) -> Result<&str, AppError> {
        required_param(&self.event_name, EVENT_NAME_REQUIRED)
    }

    pub fn admin_id(&self) -> Result<&str, AppError> {
        required_param(&self.id, "아이디가 필요합니다.")
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventListResponse {
    pub event_list: Vec<Event>,
    pub id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoresResponse {
    pub event_name: String,
    pub scores: Vec<Team>,
    pub id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityScoresResponse {
    pub event_name: String,
    pub activity_list: Vec<String>,
    pub scores: Vec<Team>,
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_query_values_are_missing() {
        let query = EventQuery {
            event_name: Some("  ".to_string()),
            id: Some("admin1234".to_string()),
        };

        assert!(matches!(query.event_name(), Err(AppError::Validation(_))));
        assert_eq!(query.admin_id().unwrap(), "admin1234");
    }
}
