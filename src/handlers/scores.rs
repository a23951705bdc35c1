use actix_web::{HttpResponse, Result, web};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::auth::AuthenticatedAdmin;
use crate::database::models::UpdateScoreInput;
use crate::handlers::shared::{ApiResponse, EVENT_NAME_REQUIRED, EventQuery, required_param};
use crate::services::validation::parse_score;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedScores {
    pub team_name: String,
    pub activity_id: String,
    pub new_score: i64,
    pub total_score: i64,
    pub participate_num: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScoreResponse {
    pub updated_scores: UpdatedScores,
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreQuery {
    pub event_name: Option<String>,
    pub team_name: Option<String>,
    pub activity_id: Option<String>,
}

pub async fn update_score_by_activity(
    state: web::Data<AppState>,
    session: AuthenticatedAdmin,
    query: web::Query<EventQuery>,
    input: web::Json<UpdateScoreInput>,
) -> Result<HttpResponse> {
    let UpdateScoreInput {
        activity_id,
        team_name,
        new_score,
        id,
    } = input.into_inner();
    session.require_owner(&id)?;
    let event_name = query.event_name()?;

    let score = parse_score(&new_score, state.config.score_min, state.config.score_max)?;
    let summary = state
        .score_repository
        .update_score(&id, event_name, &team_name, &activity_id, score)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(UpdateScoreResponse {
        updated_scores: UpdatedScores {
            team_name,
            activity_id,
            new_score: score,
            total_score: summary.total_score,
            participate_num: summary.participate_num,
        },
        id,
    })))
}

pub async fn get_score_and_participation(
    state: web::Data<AppState>,
    session: AuthenticatedAdmin,
    path: web::Path<String>,
    query: web::Query<ScoreQuery>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    session.require_owner(&id)?;

    let event_name = required_param(&query.event_name, EVENT_NAME_REQUIRED)?;
    let team_name = required_param(&query.team_name, "팀 이름을 입력해주세요.")?;
    let activity_id = query.activity_id.as_deref().filter(|name| !name.is_empty());

    let result = state
        .score_repository
        .score_and_participation(&id, event_name, team_name, activity_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(result)))
}
