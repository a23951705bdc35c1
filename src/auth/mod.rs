use actix_web::{
    FromRequest, HttpRequest,
    cookie::{Cookie, SameSite, time::Duration},
    dev::Payload,
    http::header,
    web::Data,
};
use futures_util::future::LocalBoxFuture;

use crate::AppState;
use crate::config::Config;
use crate::database::models::Admin;
use crate::error::AppError;
use crate::middleware::RequestIdExt;

pub const SESSION_COOKIE: &str = "token";

/// The admin owning the session token of the current request.
///
/// The token is read from the `token` cookie, or from an
/// `Authorization: Bearer` header when no cookie is sent.
#[derive(Debug, Clone)]
pub struct AuthenticatedAdmin {
    pub admin: Admin,
    pub token: String,
}

impl AuthenticatedAdmin {
    pub fn id(&self) -> &str {
        &self.admin.id
    }

    /// Admins may only touch their own events.
    pub fn require_owner(&self, id: &str) -> Result<(), AppError> {
        if self.admin.id == id {
            Ok(())
        } else {
            log::warn!("Admin {} tried to access data of {}", self.admin.id, id);
            Err(AppError::Forbidden("접근 권한이 없습니다.".to_string()))
        }
    }
}

fn extract_token(req: &HttpRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

impl FromRequest for AuthenticatedAdmin {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = extract_token(req);
        let state = req.app_data::<Data<AppState>>().cloned();
        let correlation_id = req.correlation_id().unwrap_or_default();

        Box::pin(async move {
            let state = state.ok_or_else(|| {
                log::error!("Application state is not registered");
                AppError::internal_server_error()
            })?;

            let Some(token) = token else {
                log::debug!("[{}] Request without session token", correlation_id);
                return Err(AppError::Unauthorized("로그인이 필요합니다.".to_string()));
            };

            let admin = state.auth_service.authenticate(&token).await?;
            Ok(AuthenticatedAdmin { admin, token })
        })
    }
}

pub fn session_cookie(token: &str, config: &Config) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(config.cookie_secure)
        .max_age(Duration::seconds(config.session_max_age_secs))
        .finish()
}

pub fn expired_session_cookie(config: &Config) -> Cookie<'static> {
    let mut cookie = session_cookie("", config);
    cookie.make_removal();
    cookie
}
