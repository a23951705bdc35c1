use actix_web::{HttpResponse, Result, web};

use crate::AppState;
use crate::auth::{AuthenticatedAdmin, expired_session_cookie, session_cookie};
use crate::database::models::{AuthResponse, CredentialsInput, GoogleAuthInput};
use crate::handlers::shared::ApiResponse;

fn session_response(state: &AppState, response: AuthResponse) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(session_cookie(&response.access_token, &state.config))
        .json(ApiResponse::success(response))
}

pub async fn create(
    state: web::Data<AppState>,
    input: web::Json<CredentialsInput>,
) -> Result<HttpResponse> {
    let response = state.auth_service.register(input.into_inner()).await?;
    Ok(session_response(&state, response))
}

pub async fn login(
    state: web::Data<AppState>,
    input: web::Json<CredentialsInput>,
) -> Result<HttpResponse> {
    let response = state.auth_service.login(input.into_inner()).await?;
    Ok(session_response(&state, response))
}

pub async fn logout(
    state: web::Data<AppState>,
    session: AuthenticatedAdmin,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    session.require_owner(&id)?;

    state.auth_service.logout(&id, &session.token).await?;

    Ok(HttpResponse::NoContent()
        .cookie(expired_session_cookie(&state.config))
        .finish())
}

pub async fn google_auth(
    state: web::Data<AppState>,
    input: web::Json<GoogleAuthInput>,
) -> Result<HttpResponse> {
    let response = state
        .auth_service
        .google_login(&input.access_token)
        .await?;
    Ok(session_response(&state, response))
}
