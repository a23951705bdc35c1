use sqlx::SqlitePool;
use std::collections::{BTreeMap, HashMap};

use super::event::{event_exists, event_not_found};
use super::score::team_not_found;
use crate::database::{
    models::Team,
    retry::RetryPolicy,
    types::{TeamRow, TeamScoreRow},
    utils::{is_foreign_key_violation, is_unique_violation},
};
use crate::error::AppError;

#[derive(Clone)]
pub struct TeamRepository {
    pool: SqlitePool,
    retry: RetryPolicy,
}

/// Drops repeated names while keeping the first occurrence in place.
pub(crate) fn distinct_names(names: &[String]) -> Vec<String> {
    let mut distinct: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !distinct.contains(name) {
            distinct.push(name.clone());
        }
    }
    distinct
}

fn encode_snack(flags: &[bool]) -> Result<String, AppError> {
    serde_json::to_string(flags).map_err(|err| {
        log::error!("Failed to encode snack flags: {}", err);
        AppError::internal_server_error()
    })
}

impl TeamRepository {
    pub fn new(pool: SqlitePool, retry: RetryPolicy) -> Self {
        Self { pool, retry }
    }

    async fn ensure_event(&self, admin_id: &str, event_name: &str) -> Result<(), AppError> {
        if event_exists(&self.pool, admin_id, event_name).await? {
            Ok(())
        } else {
            Err(event_not_found())
        }
    }

    /// Teams of the event in insertion order, each with its activity map.
    pub async fn list_teams(&self, admin_id: &str, event_name: &str) -> Result<Vec<Team>, AppError> {
        self.ensure_event(admin_id, event_name).await?;

        let rows = sqlx::query_as::<_, TeamRow>(
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
            ORDER BY
                rowid
            "#,
        )
        .bind(admin_id)
        .bind(event_name)
        .fetch_all(&self.pool)
        .await?;

        let score_rows = sqlx::query_as::<_, TeamScoreRow>(
            r#"
            SELECT
                team_name,
                activity_name,
                score
            FROM
                team_scores
            WHERE
                admin_id = ?
                AND event_name = ?
            "#,
        )
        .bind(admin_id)
        .bind(event_name)
        .fetch_all(&self.pool)
        .await?;

        let mut activities_by_team: HashMap<String, BTreeMap<String, i64>> = HashMap::new();
        for row in score_rows {
            activities_by_team
                .entry(row.team_name)
                .or_default()
                .insert(row.activity_name, row.score);
        }

        let teams = rows
            .into_iter()
            .map(|row| {
                let snack = row.snack_flags();
                Team {
                    activities: activities_by_team.remove(&row.team_name).unwrap_or_default(),
                    team_name: row.team_name,
                    total_score: row.total_score,
                    participate_num: row.participate_num,
                    snack,
                }
            })
            .collect();

        Ok(teams)
    }

    pub async fn team_names(&self, admin_id: &str, event_name: &str) -> Result<Vec<String>, AppError> {
        self.ensure_event(admin_id, event_name).await?;

        let names = sqlx::query_scalar::<_, String>(
            "SELECT team_name FROM teams WHERE admin_id = ? AND event_name = ? ORDER BY rowid",
        )
        .bind(admin_id)
        .bind(event_name)
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }

    pub async fn find_team(
        &self,
        admin_id: &str,
        event_name: &str,
        team_name: &str,
    ) -> Result<Option<Team>, AppError> {
        let teams = self.list_teams(admin_id, event_name).await?;
        Ok(teams.into_iter().find(|team| team.team_name == team_name))
    }

    /// Adds a team whose activity map holds every current activity of the
    /// event at 0.
    pub async fn insert_team(
        &self,
        admin_id: &str,
        event_name: &str,
        team_name: &str,
        snack_count: usize,
    ) -> Result<(), AppError> {
        let snack = encode_snack(&vec![false; snack_count])?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO
                teams (
                    admin_id,
                    event_name,
                    team_name,
                    total_score,
                    participate_num,
                    snack
                )
            VALUES
                (?, ?, ?, 0, 0, ?)
            "#,
        )
        .bind(admin_id)
        .bind(event_name)
        .bind(team_name)
        .bind(&snack)
        .execute(&mut *tx)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                AppError::Conflict("팀 이름이 이미 존재합니다.".to_string())
            } else if is_foreign_key_violation(&err) {
                event_not_found()
            } else {
                AppError::from(err)
            }
        })?;

        sqlx::query(
            r#"
            INSERT INTO
                team_scores (admin_id, event_name, team_name, activity_name, score)
            SELECT
                admin_id,
                event_name,
                ?,
                activity_name,
                0
            FROM
                activities
            WHERE
                admin_id = ?
                AND event_name = ?
            "#,
        )
        .bind(team_name)
        .bind(admin_id)
        .bind(event_name)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        log::info!("Added team {} to event {} of {}", team_name, event_name, admin_id);
        Ok(())
    }

    pub async fn delete_team(&self, admin_id: &str, event_name: &str, team_name: &str) -> Result<(), AppError> {
        self.delete_teams(admin_id, event_name, &[team_name.to_string()])
            .await
    }

    /// Removes all named teams or none of them.
    pub async fn delete_teams(
        &self,
        admin_id: &str,
        event_name: &str,
        team_names: &[String],
    ) -> Result<(), AppError> {
        self.ensure_event(admin_id, event_name).await?;

        let names = distinct_names(team_names);
        let pool = &self.pool;
        let names_ref = names.as_slice();

        let deleted = self
            .retry
            .run("delete teams", || async move {
                let mut tx = pool.begin().await?;

                for name in names_ref {
                    let removed = sqlx::query(
                        "DELETE FROM teams WHERE admin_id = ? AND event_name = ? AND team_name = ?",
                    )
                    .bind(admin_id)
                    .bind(event_name)
                    .bind(name)
                    .execute(&mut *tx)
                    .await?
                    .rows_affected();

                    if removed == 0 {
                        return Ok(None);
                    }
                }

                tx.commit().await?;
                Ok(Some(()))
            })
            .await?;

        if deleted.is_none() {
            let existing = self.team_names(admin_id, event_name).await?;
            let missing = names
                .iter()
                .find(|name| !existing.contains(name))
                .map(String::as_str)
                .unwrap_or_default();

            log::warn!("Could not delete teams of event {} of {}: {} missing", event_name, admin_id, missing);
            return Err(AppError::NotFound(format!("해당 조를 찾지 못했습니다: {}", missing)));
        }

        log::info!("Deleted {} team(s) from event {} of {}", names.len(), event_name, admin_id);
        Ok(())
    }

    /// Replaces the snack flags of a team verbatim.
    pub async fn update_snack(
        &self,
        admin_id: &str,
        event_name: &str,
        team_name: &str,
        snack: &[bool],
    ) -> Result<(), AppError> {
        let snack = encode_snack(snack)?;

        let updated = sqlx::query(
            r#"
            UPDATE teams
            SET
                snack = ?
            WHERE
                admin_id = ?
                AND event_name = ?
                AND team_name = ?
            "#,
        )
        .bind(&snack)
        .bind(admin_id)
        .bind(event_name)
        .bind(team_name)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            self.ensure_event(admin_id, event_name).await?;
            return Err(team_not_found(team_name));
        }

        Ok(())
    }
}
