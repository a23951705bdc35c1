use sqlx::{Executor, Sqlite, SqlitePool};

use crate::database::{
    models::Event,
    utils::{is_foreign_key_violation, is_unique_violation},
};
use crate::error::AppError;

#[derive(Clone)]
pub struct EventRepository {
    pool: SqlitePool,
}

pub(crate) fn event_not_found() -> AppError {
    AppError::NotFound("해당 이벤트를 찾을 수 없습니다.".to_string())
}

pub(crate) async fn event_exists<'e, E>(executor: E, admin_id: &str, event_name: &str) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM events WHERE admin_id = ? AND event_name = ?)")
        .bind(admin_id)
        .bind(event_name)
        .fetch_one(executor)
        .await
}

impl EventRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_events(&self, admin_id: &str) -> Result<Vec<Event>, AppError> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT
                event_name,
                created_date,
                modified_date
            FROM
                events
            WHERE
                admin_id = ?
            ORDER BY
                rowid
            "#,
        )
        .bind(admin_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Adds the event with empty team and activity lists.
    pub async fn create_event(&self, admin_id: &str, event: &Event) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO
                events (
                    admin_id,
                    event_name,
                    created_date,
                    modified_date
                )
            VALUES
                (?, ?, ?, ?)
            "#,
        )
        .bind(admin_id)
        .bind(&event.event_name)
        .bind(&event.created_date)
        .bind(&event.modified_date)
        .execute(&self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                AppError::Conflict("같은 이름의 행사가 이미 존재합니다.".to_string())
            } else if is_foreign_key_violation(&err) {
                AppError::NotFound("해당 아이디를 찾을 수 없습니다.".to_string())
            } else {
                AppError::from(err)
            }
        })?;

        Ok(())
    }

    /// Removes the event from the event, score and activity lists in one
    /// transaction.
    pub async fn delete_event(&self, admin_id: &str, event_name: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        for statement in [
            "DELETE FROM team_scores WHERE admin_id = ? AND event_name = ?",
            "DELETE FROM teams WHERE admin_id = ? AND event_name = ?",
            "DELETE FROM activities WHERE admin_id = ? AND event_name = ?",
        ] {
            sqlx::query(statement)
                .bind(admin_id)
                .bind(event_name)
                .execute(&mut *tx)
                .await?;
        }

        let removed_events = sqlx::query("DELETE FROM events WHERE admin_id = ? AND event_name = ?")
            .bind(admin_id)
            .bind(event_name)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if removed_events == 0 {
            log::warn!("Event {} of {} not found for deletion", event_name, admin_id);
            return Err(AppError::NotFound(format!(
                "해당 행사를 삭제하지 못했습니다: {}",
                event_name
            )));
        }

        tx.commit().await?;
        log::info!("Deleted event {} of {}", event_name, admin_id);
        Ok(())
    }
}
