#![allow(dead_code, unused_macros)]

use actix_web::cookie::Cookie;
use actix_web::test::TestRequest;
use actix_web::web;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use fake::Fake;
use sqlx::SqlitePool;
use std::env;
use std::sync::Arc;
use tempfile::TempDir;

use sportsday::auth::SESSION_COOKIE;
use sportsday::config::Config;
use sportsday::database::init_database;
use sportsday::database::models::{AuthResponse, CredentialsInput, Event};
use sportsday::middleware::{RateLimitConfig, RateLimitStore};
use sportsday::services::{IdentityVerifier, VerifiedIdentity};
use sportsday::AppState;

pub const PASSWORD: &str = "Password1234";

/// Accepts identity tokens of the form `google:<email>`.
pub struct StubVerifier;

#[async_trait]
impl IdentityVerifier for StubVerifier {
    async fn verify(&self, id_token: &str) -> Result<VerifiedIdentity> {
        id_token
            .strip_prefix("google:")
            .map(|email| VerifiedIdentity {
                email: email.to_string(),
            })
            .ok_or_else(|| anyhow!("invalid identity token"))
    }
}

pub struct TestContext {
    pub pool: SqlitePool,
    pub config: Config,
    pub state: web::Data<AppState>,
    pub auth_limit: RateLimitConfig,
    pub rate_limit_store: RateLimitStore,
    _temp_dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Result<Self> {
        Self::with_config(Config::test_config()).await
    }

    pub async fn with_config(mut config: Config) -> Result<Self> {
        let temp_dir = TempDir::new()?;
        config.database_url = format!("sqlite:{}/test.db", temp_dir.path().display());

        let pool = init_database(&config.database_url).await?;
        let state = web::Data::new(AppState::new(
            pool.clone(),
            config.clone(),
            Arc::new(StubVerifier),
        ));

        Ok(TestContext {
            pool,
            auth_limit: RateLimitConfig::for_auth(&config),
            rate_limit_store: RateLimitStore::new(),
            config,
            state,
            _temp_dir: temp_dir,
        })
    }

    /// Registers a fresh admin and returns its session.
    pub async fn register_admin(&self) -> AuthResponse {
        self.state
            .auth_service
            .register(CredentialsInput {
                id: random_admin_id(),
                password: PASSWORD.to_string(),
            })
            .await
            .expect("Failed to register test admin")
    }

    pub async fn create_event(&self, admin_id: &str, event_name: &str) {
        let event = Event {
            event_name: event_name.to_string(),
            created_date: "2024/05/28".to_string(),
            modified_date: "none".to_string(),
        };
        self.state
            .event_repository
            .create_event(admin_id, &event)
            .await
            .expect("Failed to create test event");
    }

    pub async fn add_team(&self, admin_id: &str, event_name: &str, team_name: &str) {
        self.state
            .team_repository
            .insert_team(admin_id, event_name, team_name, self.config.snack_count)
            .await
            .expect("Failed to add test team");
    }

    pub async fn add_activity(&self, admin_id: &str, event_name: &str, activity_name: &str) {
        self.state
            .activity_repository
            .insert_activity(admin_id, event_name, activity_name)
            .await
            .expect("Failed to add test activity");
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count records")
    }
}

/// Builds the full application around a test context.
macro_rules! test_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($ctx.state.clone())
                .wrap(sportsday::middleware::RequestIdMiddleware)
                .configure(|cfg| {
                    sportsday::routes::configure(cfg, &$ctx.auth_limit, &$ctx.rate_limit_store)
                }),
        )
        .await
    };
}

pub fn random_admin_id() -> String {
    let suffix: u32 = (10_000_000..99_999_999).fake();
    format!("admin{}", suffix)
}

pub fn with_session(request: TestRequest, token: &str) -> TestRequest {
    request.cookie(Cookie::new(SESSION_COOKIE, token.to_string()))
}

pub fn setup_test_env() {
    unsafe {
        env::set_var("RUST_LOG", "debug");
    }
    let _ = env_logger::builder().is_test(true).try_init();
}
