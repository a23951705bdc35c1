use actix_web::{HttpResponse, Result, web};

use crate::AppState;
use crate::auth::AuthenticatedAdmin;
use crate::database::models::ActivityNameInput;
use crate::error::AppError;
use crate::handlers::shared::{ActivityScoresResponse, ApiResponse, EventQuery};
use crate::services::validation::{NameKind, validate_name, validate_names};

async fn activity_scores(state: &AppState, id: String, event_name: &str) -> Result<HttpResponse, AppError> {
    let activity_list = state
        .activity_repository
        .list_activities(&id, event_name)
        .await?;
    let scores = state.team_repository.list_teams(&id, event_name).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(ActivityScoresResponse {
        event_name: event_name.to_string(),
        activity_list,
        scores,
        id,
    })))
}

pub async fn get_activity_list(
    state: web::Data<AppState>,
    session: AuthenticatedAdmin,
    path: web::Path<String>,
    query: web::Query<EventQuery>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    session.require_owner(&id)?;

    let activities = state
        .activity_repository
        .list_activities(&id, query.event_name()?)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(activities)))
}

pub async fn insert_activity(
    state: web::Data<AppState>,
    session: AuthenticatedAdmin,
    path: web::Path<String>,
    query: web::Query<EventQuery>,
    input: web::Json<ActivityNameInput>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    session.require_owner(&id)?;
    let event_name = query.event_name()?;

    let activity_name = input.activity_name.trim();
    validate_name(NameKind::Activity, activity_name)?;

    state
        .activity_repository
        .insert_activity(&id, event_name, activity_name)
        .await?;

    Ok(activity_scores(&state, id, event_name).await?)
}

pub async fn delete_activity(
    state: web::Data<AppState>,
    session: AuthenticatedAdmin,
    path: web::Path<String>,
    query: web::Query<EventQuery>,
) -> Result<HttpResponse> {
    let activity_name = path.into_inner();
    let id = query.admin_id()?.to_string();
    session.require_owner(&id)?;
    let event_name = query.event_name()?;

    state
        .activity_repository
        .delete_activity(&id, event_name, &activity_name)
        .await?;

    Ok(activity_scores(&state, id, event_name).await?)
}

pub async fn delete_multiple_activities(
    state: web::Data<AppState>,
    session: AuthenticatedAdmin,
    path: web::Path<String>,
    query: web::Query<EventQuery>,
    input: web::Json<Vec<String>>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    session.require_owner(&id)?;
    let event_name = query.event_name()?;

    validate_names(NameKind::Activity, &input)?;
    state
        .activity_repository
        .delete_activities(&id, event_name, &input)
        .await?;

    Ok(activity_scores(&state, id, event_name).await?)
}
