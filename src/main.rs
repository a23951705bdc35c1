use actix_cors::Cors;
use actix_web::{App, HttpServer, http::header, middleware::Logger, web};
use anyhow::Result;
use std::sync::Arc;

use sportsday::database::init_database;
use sportsday::middleware::{RateLimitConfig, RateLimitStore, RequestIdMiddleware, cleanup_rate_limits};
use sportsday::services::GoogleIdTokenVerifier;
use sportsday::{AppState, Config, routes};

#[actix_web::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    log::info!("Configuration loaded (environment: {})", config.environment);

    let pool = init_database(&config.database_url).await?;
    log::info!("Database initialized at {}", config.database_url);

    if !config.google_login_enabled() {
        log::warn!("GOOGLE_AUDIENCE is not set; google login is disabled");
    }

    let verifier = Arc::new(GoogleIdTokenVerifier::new(&config));
    let app_state = web::Data::new(AppState::new(pool, config.clone(), verifier));

    let auth_limit = RateLimitConfig::for_auth(&config);
    let rate_limit_store = RateLimitStore::new();
    actix_web::rt::spawn(cleanup_rate_limits(
        rate_limit_store.clone(),
        config.auth_rate_limit_window_secs,
        300,
    ));

    let server_address = config.server_address();
    log::info!("Server starting on http://{}", server_address);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(
                Cors::default()
                    .allowed_origin(&config.client_base_url)
                    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                    .allowed_headers(vec![
                        header::AUTHORIZATION,
                        header::CONTENT_TYPE,
                        header::ACCEPT,
                        header::HeaderName::from_static("x-correlation-id"),
                    ])
                    .supports_credentials()
                    .max_age(3600),
            )
            .wrap(RequestIdMiddleware)
            .wrap(Logger::new(
                r#"%a "%r" %s %b "%{Referer}i" "%{User-Agent}i" %T correlation_id=%{x-correlation-id}o"#,
            ))
            .configure(|cfg| routes::configure(cfg, &auth_limit, &rate_limit_store))
    })
    .bind(&server_address)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
