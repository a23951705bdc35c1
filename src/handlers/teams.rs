use actix_web::{HttpResponse, Result, web};

use crate::AppState;
use crate::auth::AuthenticatedAdmin;
use crate::database::models::{TeamNameInput, UpdateSnackInput};
use crate::error::AppError;
use crate::handlers::shared::{ApiResponse, EventQuery, ScoresResponse};
use crate::services::validation::{NameKind, validate_name, validate_names};

async fn scores_response(state: &AppState, id: String, event_name: &str) -> Result<HttpResponse, AppError> {
    let scores = state.team_repository.list_teams(&id, event_name).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(ScoresResponse {
        event_name: event_name.to_string(),
        scores,
        id,
    })))
}

pub async fn insert_team(
    state: web::Data<AppState>,
    session: AuthenticatedAdmin,
    path: web::Path<String>,
    query: web::Query<EventQuery>,
    input: web::Json<TeamNameInput>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    session.require_owner(&id)?;
    let event_name = query.event_name()?;

    let team_name = input.team_name.trim();
    validate_name(NameKind::Team, team_name)?;

    state
        .team_repository
        .insert_team(&id, event_name, team_name, state.config.snack_count)
        .await?;

    Ok(scores_response(&state, id, event_name).await?)
}

pub async fn delete_team(
    state: web::Data<AppState>,
    session: AuthenticatedAdmin,
    path: web::Path<String>,
    query: web::Query<EventQuery>,
) -> Result<HttpResponse> {
    let team_name = path.into_inner();
    let id = query.admin_id()?.to_string();
    session.require_owner(&id)?;
    let event_name = query.event_name()?;

    state
        .team_repository
        .delete_team(&id, event_name, &team_name)
        .await?;

    Ok(scores_response(&state, id, event_name).await?)
}

pub async fn delete_multiple_teams(
    state: web::Data<AppState>,
    session: AuthenticatedAdmin,
    path: web::Path<String>,
    query: web::Query<EventQuery>,
    input: web::Json<Vec<String>>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    session.require_owner(&id)?;
    let event_name = query.event_name()?;

    validate_names(NameKind::Team, &input)?;
    state
        .team_repository
        .delete_teams(&id, event_name, &input)
        .await?;

    Ok(scores_response(&state, id, event_name).await?)
}

pub async fn team_names(
    state: web::Data<AppState>,
    session: AuthenticatedAdmin,
    path: web::Path<String>,
    query: web::Query<EventQuery>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    session.require_owner(&id)?;

    let names = state
        .team_repository
        .team_names(&id, query.event_name()?)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(names)))
}

pub async fn update_snack(
    state: web::Data<AppState>,
    session: AuthenticatedAdmin,
    query: web::Query<EventQuery>,
    input: web::Json<UpdateSnackInput>,
) -> Result<HttpResponse> {
    let UpdateSnackInput { snack, team_name, id } = input.into_inner();
    let id = id.unwrap_or_else(|| session.id().to_string());
    session.require_owner(&id)?;

    state
        .team_repository
        .update_snack(&id, query.event_name()?, &team_name, &snack)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        "간식 정보가 저장되었습니다.",
    )))
}
