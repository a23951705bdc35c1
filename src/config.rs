use anyhow::{Result, bail};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub client_base_url: String,
    pub score_min: i64,
    pub score_max: i64,
    pub snack_count: usize,
    pub session_max_age_secs: i64,
    pub cookie_secure: bool,
    pub bcrypt_cost: u32,
    pub delete_retry_attempts: u32,
    pub delete_retry_backoff_ms: u64,
    pub auth_rate_limit_max: u32,
    pub auth_rate_limit_window_secs: i64,
    pub google_audience: String,
    pub google_issuers: Vec<String>,
    pub google_jwks_url: String,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_env_only()
    }

    /// Load configuration from environment variables only (without loading .env files)
    /// This is useful for testing where you want to control the environment directly
    pub fn from_env_only() -> Result<Self> {
        let environment = var_or("ENVIRONMENT", "development");
        let cookie_secure = parsed_or("COOKIE_SECURE", environment == "production");

        let config = Config {
            database_url: var_or("DATABASE_URL", "sqlite:sportsday.db"),
            host: var_or("HOST", "127.0.0.1"),
            port: parsed_or("PORT", 3000),
            environment,
            client_base_url: var_or("BASE_URL", "http://localhost:3000"),
            score_min: parsed_or("SCORE_MIN", 0),
            score_max: parsed_or("SCORE_MAX", 100),
            snack_count: parsed_or("SNACK_COUNT", 5),
            session_max_age_secs: parsed_or("SESSION_MAX_AGE_SECS", 3600),
            cookie_secure,
            bcrypt_cost: parsed_or("BCRYPT_COST", bcrypt::DEFAULT_COST),
            delete_retry_attempts: parsed_or("DELETE_RETRY_ATTEMPTS", 2),
            delete_retry_backoff_ms: parsed_or("DELETE_RETRY_BACKOFF_MS", 250),
            auth_rate_limit_max: parsed_or("AUTH_RATE_LIMIT_MAX", 20),
            auth_rate_limit_window_secs: parsed_or("AUTH_RATE_LIMIT_WINDOW_SECS", 60),
            google_audience: var_or("GOOGLE_AUDIENCE", ""),
            google_issuers: var_or(
                "GOOGLE_ISSUERS",
                "https://accounts.google.com,accounts.google.com",
            )
            .split(',')
            .map(|issuer| issuer.trim().to_string())
            .filter(|issuer| !issuer.is_empty())
            .collect(),
            google_jwks_url: var_or(
                "GOOGLE_JWKS_URL",
                "https://www.googleapis.com/oauth2/v3/certs",
            ),
        };

        config.validate()?;
        Ok(config)
    }

    /// Configuration used by the test suites: in-memory database, cheap hashing
    /// and no retry backoff.
    pub fn test_config() -> Self {
        Config {
            database_url: "sqlite::memory:".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            client_base_url: "http://localhost:3000".to_string(),
            score_min: 0,
            score_max: 100,
            snack_count: 5,
            session_max_age_secs: 3600,
            cookie_secure: false,
            bcrypt_cost: 4,
            delete_retry_attempts: 2,
            delete_retry_backoff_ms: 0,
            auth_rate_limit_max: 1000,
            auth_rate_limit_window_secs: 60,
            google_audience: "sportsday-test".to_string(),
            google_issuers: vec!["https://accounts.google.com".to_string()],
            google_jwks_url: "http://127.0.0.1:0/certs".to_string(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.score_min > self.score_max {
            bail!(
                "SCORE_MIN ({}) must not exceed SCORE_MAX ({})",
                self.score_min,
                self.score_max
            );
        }
        if self.delete_retry_attempts == 0 {
            bail!("DELETE_RETRY_ATTEMPTS must be at least 1");
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn delete_retry_backoff(&self) -> Duration {
        Duration::from_millis(self.delete_retry_backoff_ms)
    }

    pub fn google_login_enabled(&self) -> bool {
        !self.google_audience.is_empty()
    }
}
