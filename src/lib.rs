use sqlx::SqlitePool;
use std::sync::Arc;

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;

pub use config::Config;
pub use database::repositories::{
    ActivityRepository, AdminRepository, EventRepository, ScoreRepository, TeamRepository,
};
pub use error::AppError;
pub use services::{AuthService, IdentityVerifier};

use database::retry::RetryPolicy;

/// Shared by every worker through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub auth_service: AuthService,
    pub event_repository: EventRepository,
    pub team_repository: TeamRepository,
    pub activity_repository: ActivityRepository,
    pub score_repository: ScoreRepository,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Config, verifier: Arc<dyn IdentityVerifier>) -> Self {
        let retry = RetryPolicy::from_config(&config);
        let event_repository = EventRepository::new(pool.clone());

        let auth_service = AuthService::new(
            AdminRepository::new(pool.clone()),
            event_repository.clone(),
            verifier,
            config.clone(),
        );

        Self {
            auth_service,
            event_repository,
            team_repository: TeamRepository::new(pool.clone(), retry),
            activity_repository: ActivityRepository::new(pool.clone(), retry),
            score_repository: ScoreRepository::new(pool),
            config,
        }
    }
}
