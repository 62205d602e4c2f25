use async_trait::async_trait;

use super::{Database, classify};
use crate::error::TeaError;

/// Username/password-hash pairs. Matching is exact; callers lower-case
/// usernames before they get here.
#[async_trait]
pub trait UserStorer: Send + Sync {
    async fn get_password_hash(&self, username: &str) -> Result<String, TeaError>;
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<(), TeaError>;
    /// Fails with `NotFound` when no row was updated.
    async fn update_password(&self, username: &str, password_hash: &str) -> Result<(), TeaError>;
}

fn not_found(username: &str) -> TeaError {
    TeaError::NotFound(format!("user {username:?} doesn't exist"))
}

#[async_trait]
impl UserStorer for Database {
    async fn get_password_hash(&self, username: &str) -> Result<String, TeaError> {
        let rec: Option<(String,)> = sqlx::query_as("SELECT password FROM user WHERE username = ?")
            .bind(username)
            .fetch_optional(self.pool())
            .await?;
        rec.map(|r| r.0).ok_or_else(|| not_found(username))
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> Result<(), TeaError> {
        sqlx::query("INSERT INTO user (username, password) VALUES (?, ?)")
            .bind(username)
            .bind(password_hash)
            .execute(self.pool())
            .await
            .map_err(|e| classify::on_insert(e, "user already exists", "invalid user"))?;
        Ok(())
    }

    async fn update_password(&self, username: &str, password_hash: &str) -> Result<(), TeaError> {
        let res = sqlx::query("UPDATE user SET password = ? WHERE username = ?")
            .bind(password_hash)
            .bind(username)
            .execute(self.pool())
            .await?;
        if res.rows_affected() == 0 {
            return Err(not_found(username));
        }
        Ok(())
    }
}
