use actix_web::{HttpResponse, Result, web};

use crate::AppState;
use crate::auth::AuthenticatedAdmin;
use crate::database::models::{Event, InsertEventRequest};
use crate::error::AppError;
use crate::handlers::shared::{ApiResponse, EventListResponse, EventQuery, ScoresResponse};
use crate::services::validation::{
    NameKind, created_date_or_today, normalize_modified_date, validate_name,
};

async fn event_list(state: &AppState, id: String) -> Result<HttpResponse, AppError> {
    let event_list = state.event_repository.list_events(&id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(EventListResponse { event_list, id })))
}

async fn event_scores(state: &AppState, id: String, event_name: &str) -> Result<HttpResponse, AppError> {
    let scores = state.team_repository.list_teams(&id, event_name).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(ScoresResponse {
        event_name: event_name.to_string(),
        scores,
        id,
    })))
}

pub async fn get_event_list(
    state: web::Data<AppState>,
    session: AuthenticatedAdmin,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    session.require_owner(&id)?;

    Ok(event_list(&state, id).await?)
}

pub async fn insert_event(
    state: web::Data<AppState>,
    session: AuthenticatedAdmin,
    input: web::Json<InsertEventRequest>,
) -> Result<HttpResponse> {
    let InsertEventRequest { id, new_event } = input.into_inner();
    session.require_owner(&id)?;

    let event_name = new_event.event_name.trim().to_string();
    validate_name(NameKind::Event, &event_name)?;

    let event = Event {
        event_name,
        created_date: created_date_or_today(new_event.created_date)?,
        modified_date: normalize_modified_date(new_event.modified_date)?,
    };
    state.event_repository.create_event(&id, &event).await?;
    log::info!("Admin {} created event {}", id, event.event_name);

    Ok(event_list(&state, id).await?)
}

pub async fn delete_event(
    state: web::Data<AppState>,
    session: AuthenticatedAdmin,
    path: web::Path<String>,
    query: web::Query<EventQuery>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    session.require_owner(&id)?;

    state
        .event_repository
        .delete_event(&id, query.event_name()?)
        .await?;

    Ok(event_list(&state, id).await?)
}

/// Scores of one event for its owner.
pub async fn get_scores(
    state: web::Data<AppState>,
    session: AuthenticatedAdmin,
    path: web::Path<String>,
    query: web::Query<EventQuery>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    session.require_owner(&id)?;

    Ok(event_scores(&state, id, query.event_name()?).await?)
}

/// Read-only ranking reached through the event's QR code; no session needed.
pub async fn get_public_data(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<EventQuery>,
) -> Result<HttpResponse> {
    Ok(event_scores(&state, path.into_inner(), query.event_name()?).await?)
}
