use actix_web::web;

use crate::handlers::auth;
use crate::middleware::{RateLimitConfig, RateLimitMiddleware, RateLimitStore};

pub fn configure(cfg: &mut web::ServiceConfig, limit: &RateLimitConfig, store: &RateLimitStore) {
    cfg.service(
        web::scope("/auth")
            .wrap(RateLimitMiddleware::with_store(limit.clone(), store.clone()))
            .route("/create", web::post().to(auth::create))
            .route("/login", web::post().to(auth::login))
            .route("/logout/{id}", web::delete().to(auth::logout)),
    )
    .service(
        web::resource("/google-auth")
            .wrap(RateLimitMiddleware::with_store(limit.clone(), store.clone()))
            .route(web::post().to(auth::google_auth)),
    );
}
