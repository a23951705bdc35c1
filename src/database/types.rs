use chrono::NaiveDateTime;

use super::models::{Admin, AuthProvider};

// Database row types that match the exact SQLite schema
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AdminRow {
    pub id: String,
    pub password_hash: Option<String>,
    pub auth_provider: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TeamRow {
    pub team_name: String,
    pub total_score: i64,
    pub participate_num: i64,
    pub snack: String, // JSON array of booleans
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TeamScoreRow {
    pub team_name: String,
    pub activity_name: String,
    pub score: i64,
}

// Conversion functions
impl From<AdminRow> for Admin {
    fn from(row: AdminRow) -> Self {
        Self {
            id: row.id,
            password_hash: row.password_hash,
            auth_provider: row.auth_provider.parse().unwrap_or(AuthProvider::Local),
            created_at: row.created_at,
        }
    }
}

impl TeamRow {
    pub fn snack_flags(&self) -> Vec<bool> {
        serde_json::from_str(&self.snack).unwrap_or_else(|err| {
            log::warn!("Unreadable snack flags for team {}: {}", self.team_name, err);
            Vec::new()
        })
    }
}
