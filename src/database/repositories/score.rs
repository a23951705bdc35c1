use sqlx::{SqliteConnection, SqlitePool};
use std::collections::BTreeMap;

use crate::database::models::ScoreAndParticipation;
use crate::database::types::TeamRow;
use crate::error::AppError;
use crate::services::aggregation::{ScoreSummary, aggregate};

pub(crate) fn team_not_found(team_name: &str) -> AppError {
    AppError::NotFound(format!("해당 팀을 찾을 수 없습니다: {}", team_name))
}

pub(crate) async fn load_activity_scores(
    conn: &mut SqliteConnection,
    admin_id: &str,
    event_name: &str,
    team_name: &str,
) -> Result<BTreeMap<String, i64>, sqlx::Error> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        r#"
        SELECT
            activity_name,
            score
        FROM
            team_scores
        WHERE
            admin_id = ?
            AND event_name = ?
            AND team_name = ?
        "#,
    )
    .bind(admin_id)
    .bind(event_name)
    .bind(team_name)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.into_iter().collect())
}

/// Re-derives and stores a team's totals from its current score rows.
pub(crate) async fn refresh_team_summary(
    conn: &mut SqliteConnection,
    admin_id: &str,
    event_name: &str,
    team_name: &str,
) -> Result<ScoreSummary, sqlx::Error> {
    let scores = load_activity_scores(conn, admin_id, event_name, team_name).await?;
    let summary = aggregate(&scores);

    sqlx::query(
        r#"
        UPDATE teams
        SET
            total_score = ?,
            participate_num = ?
        WHERE
            admin_id = ?
            AND event_name = ?
            AND team_name = ?
        "#,
    )
    .bind(summary.total_score)
    .bind(summary.participate_num)
    .bind(admin_id)
    .bind(event_name)
    .bind(team_name)
    .execute(&mut *conn)
    .await?;

    Ok(summary)
}

pub(crate) async fn refresh_event_summaries(
    conn: &mut SqliteConnection,
    admin_id: &str,
    event_name: &str,
) -> Result<(), sqlx::Error> {
    let team_names = sqlx::query_scalar::<_, String>(
        "SELECT team_name FROM teams WHERE admin_id = ? AND event_name = ? ORDER BY rowid",
    )
    .bind(admin_id)
    .bind(event_name)
    .fetch_all(&mut *conn)
    .await?;

    for team_name in &team_names {
        refresh_team_summary(conn, admin_id, event_name, team_name).await?;
    }

    Ok(())
}

#[derive(Clone)]
pub struct ScoreRepository {
    pool: SqlitePool,
}

impl ScoreRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Sets one activity score of a team and persists the new totals in the
    /// same transaction.
    ///
    /// The single score row is written before the map is re-read, so a
    /// concurrent update to another activity of the same team cannot be
    /// overwritten.
    pub async fn update_score(
        &self,
        admin_id: &str,
        event_name: &str,
        team_name: &str,
        activity_name: &str,
        score: i64,
    ) -> Result<ScoreSummary, AppError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE team_scores
            SET
                score = ?
            WHERE
                admin_id = ?
                AND event_name = ?
                AND team_name = ?
                AND activity_name = ?
            "#,
        )
        .bind(score)
        .bind(admin_id)
        .bind(event_name)
        .bind(team_name)
        .bind(activity_name)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            let team_exists: bool = sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM teams WHERE admin_id = ? AND event_name = ? AND team_name = ?)",
            )
            .bind(admin_id)
            .bind(event_name)
            .bind(team_name)
            .fetch_one(&mut *tx)
            .await?;

            return Err(if team_exists {
                AppError::NotFound(format!("해당 활동을 찾을 수 없습니다: {}", activity_name))
            } else {
                team_not_found(team_name)
            });
        }

        let summary = refresh_team_summary(&mut tx, admin_id, event_name, team_name).await?;
        tx.commit().await?;

        log::debug!(
            "Score of {}/{}/{} set to {} (total {}, participated {})",
            event_name,
            team_name,
            activity_name,
            score,
            summary.total_score,
            summary.participate_num
        );

        Ok(summary)
    }

    /// Score of one activity plus the team's participation count. A missing
    /// activity reads as 0.
    pub async fn score_and_participation(
        &self,
        admin_id: &str,
        event_name: &str,
        team_name: &str,
        activity_name: Option<&str>,
    ) -> Result<ScoreAndParticipation, AppError> {
        let team = sqlx::query_as::<_, TeamRow>(
            r#"
            SELECT
                team_name,
                total_score,
                participate_num,
                snack
            FROM
                teams
            WHERE
                admin_id = ?
                AND event_name = ?
                AND team_name = ?
            "#,
        )
        .bind(admin_id)
        .bind(event_name)
        .bind(team_name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| team_not_found(team_name))?;

        let score = match activity_name {
            Some(activity_name) => sqlx::query_scalar::<_, i64>(
                r#"
                SELECT score
                FROM team_scores
                WHERE
                    admin_id = ?
                    AND event_name = ?
                    AND team_name = ?
                    AND activity_name = ?
                "#,
            )
            .bind(admin_id)
            .bind(event_name)
            .bind(team_name)
            .bind(activity_name)
            .fetch_optional(&self.pool)
            .await?
            .unwrap_or(0),
            None => 0,
        };

        Ok(ScoreAndParticipation {
            score,
            participate_num: team.participate_num,
            snack: team.snack_flags(),
        })
    }
}
