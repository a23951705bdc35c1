use actix_web::{HttpRequest, error, web};

use crate::error::AppError;
use crate::handlers::health;
use crate::middleware::{RateLimitConfig, RateLimitStore};

pub mod activities;
pub mod auth;
pub mod events;
pub mod scores;
pub mod teams;

fn json_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected JSON body for {}: {}", req.path(), err);
    AppError::Validation("요청 형식이 올바르지 않습니다.".to_string()).into()
}

fn query_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected query string for {}: {}", req.path(), err);
    AppError::Validation("요청 형식이 올바르지 않습니다.".to_string()).into()
}

/// Registers every endpoint. Sign-up and login share one rate-limit store.
pub fn configure(cfg: &mut web::ServiceConfig, auth_limit: &RateLimitConfig, store: &RateLimitStore) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .route("/health", web::get().to(health::health))
        .service(
            web::scope("/api")
                .configure(|cfg| auth::configure(cfg, auth_limit, store))
                .configure(events::configure)
                .configure(teams::configure)
                .configure(activities::configure)
                .configure(scores::configure),
        );
}
