use chrono::Utc;
use sqlx::SqlitePool;

use crate::database::{models::Admin, types::AdminRow, utils::is_unique_violation};
use crate::error::AppError;

#[derive(Clone)]
pub struct AdminRepository {
    pool: SqlitePool,
}

impl AdminRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Registers the admin. Its event, score and activity lists start empty.
    pub async fn create_admin(&self, admin: &Admin) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO admins (id, password_hash, auth_provider, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&admin.id)
        .bind(&admin.password_hash)
        .bind(admin.auth_provider.to_string())
        .bind(admin.created_at)
        .execute(&self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                AppError::Conflict("같은 아이디의 유저가 이미 존재합니다.".to_string())
            } else {
                AppError::from(err)
            }
        })?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Admin>, AppError> {
        let admin = sqlx::query_as::<_, AdminRow>(
            r#"
            SELECT id, password_hash, auth_provider, created_at
            FROM admins
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin.map(Admin::from))
    }

    pub async fn find_by_token(&self, token: &str) -> Result<Option<Admin>, AppError> {
        let admin = sqlx::query_as::<_, AdminRow>(
            r#"
            SELECT a.id, a.password_hash, a.auth_provider, a.created_at
            FROM admins a
                INNER JOIN admin_tokens t ON t.admin_id = a.id
            WHERE t.token = ?
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin.map(Admin::from))
    }

    pub async fn add_token(&self, admin_id: &str, token: &str) -> Result<(), AppError> {
        sqlx::query("INSERT INTO admin_tokens (token, admin_id, created_at) VALUES (?, ?, ?)")
            .bind(token)
            .bind(admin_id)
            .bind(Utc::now().naive_utc())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Removes one token of the admin; `false` when the admin did not hold it.
    pub async fn remove_token(&self, admin_id: &str, token: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM admin_tokens WHERE admin_id = ? AND token = ?")
            .bind(admin_id)
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn list_tokens(&self, admin_id: &str) -> Result<Vec<String>, AppError> {
        let tokens = sqlx::query_scalar::<_, String>(
            "SELECT token FROM admin_tokens WHERE admin_id = ? ORDER BY created_at, rowid",
        )
        .bind(admin_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tokens)
    }
}
