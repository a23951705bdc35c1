use sqlx::SqlitePool;

use super::event::{event_exists, event_not_found};
use super::score::refresh_event_summaries;
use super::team::distinct_names;
use crate::database::{
    retry::RetryPolicy,
    utils::{is_foreign_key_violation, is_unique_violation},
};
use crate::error::AppError;

#[derive(Clone)]
pub struct ActivityRepository {
    pool: SqlitePool,
    retry: RetryPolicy,
}

impl ActivityRepository {
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

    pub async fn list_activities(&self, admin_id: &str, event_name: &str) -> Result<Vec<String>, AppError> {
        self.ensure_event(admin_id, event_name).await?;

        let activities = sqlx::query_scalar::<_, String>(
            r#"
            SELECT
                activity_name
            FROM
                activities
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

        Ok(activities)
    }

    /// Appends the activity and adds it at 0 to every team of the event.
    pub async fn insert_activity(
        &self,
        admin_id: &str,
        event_name: &str,
        activity_name: &str,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO activities (admin_id, event_name, activity_name) VALUES (?, ?, ?)")
            .bind(admin_id)
            .bind(event_name)
            .bind(activity_name)
            .execute(&mut *tx)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    AppError::Conflict("같은 이름의 활동이 이미 존재합니다.".to_string())
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
                team_name,
                ?,
                0
            FROM
                teams
            WHERE
                admin_id = ?
                AND event_name = ?
            "#,
        )
        .bind(activity_name)
        .bind(admin_id)
        .bind(event_name)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        log::info!("Added activity {} to event {} of {}", activity_name, event_name, admin_id);
        Ok(())
    }

    pub async fn delete_activity(
        &self,
        admin_id: &str,
        event_name: &str,
        activity_name: &str,
    ) -> Result<(), AppError> {
        self.delete_activities(admin_id, event_name, &[activity_name.to_string()])
            .await
    }

    /// Removes the named activities from the activity list and from every
    /// team's score map, then re-derives every team's totals. All or nothing.
    pub async fn delete_activities(
        &self,
        admin_id: &str,
        event_name: &str,
        activity_names: &[String],
    ) -> Result<(), AppError> {
        self.ensure_event(admin_id, event_name).await?;

        let names = distinct_names(activity_names);
        let pool = &self.pool;
        let names_ref = names.as_slice();

        let deleted = self
            .retry
            .run("delete activities", || async move {
                let mut tx = pool.begin().await?;

                for name in names_ref {
                    sqlx::query(
                        "DELETE FROM team_scores WHERE admin_id = ? AND event_name = ? AND activity_name = ?",
                    )
                    .bind(admin_id)
                    .bind(event_name)
                    .bind(name)
                    .execute(&mut *tx)
                    .await?;

                    let removed = sqlx::query(
                        "DELETE FROM activities WHERE admin_id = ? AND event_name = ? AND activity_name = ?",
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

                refresh_event_summaries(&mut tx, admin_id, event_name).await?;
                tx.commit().await?;
                Ok(Some(()))
            })
            .await?;

        if deleted.is_none() {
            let existing = self.list_activities(admin_id, event_name).await?;
            let missing = names
                .iter()
                .find(|name| !existing.contains(name))
                .map(String::as_str)
                .unwrap_or_default();

            log::warn!(
                "Could not delete activities of event {} of {}: {} missing",
                event_name,
                admin_id,
                missing
            );
            return Err(AppError::NotFound(format!("해당 활동을 찾지 못했습니다: {}", missing)));
        }

        log::info!(
            "Deleted {} activit(y/ies) from event {} of {}",
            names.len(),
            event_name,
            admin_id
        );
        Ok(())
    }
}
