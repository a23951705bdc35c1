use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    #[default]
    Local,
    Google,
}

impl std::fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthProvider::Local => write!(f, "local"),
            AuthProvider::Google => write!(f, "google"),
        }
    }
}

impl std::str::FromStr for AuthProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(AuthProvider::Local),
            "google" => Ok(AuthProvider::Google),
            _ => Err(format!("Invalid AuthProvider: {}", s)),
        }
    }
}

/// Account owning a list of events. Session tokens live in `admin_tokens`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    pub id: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub auth_provider: AuthProvider,
    pub created_at: NaiveDateTime,
}

impl Admin {
    pub fn new_local(id: String, password_hash: String) -> Self {
        Self {
            id,
            password_hash: Some(password_hash),
            auth_provider: AuthProvider::Local,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    pub fn new_google(email: String) -> Self {
        Self {
            id: email,
            password_hash: None,
            auth_provider: AuthProvider::Google,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    pub fn is_google(&self) -> bool {
        self.auth_provider == AuthProvider::Google
    }
}
