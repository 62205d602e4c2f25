use async_trait::async_trait;

use super::models::DbTea;
use super::{Database, Tea, TeaType, classify};
use crate::error::TeaError;

pub(crate) const SELECT_ALL_TEAS: &str = r#"
    SELECT tea.id AS id, tea.name AS name, types.id AS type_id, types.name AS type_name
    FROM tea INNER JOIN types ON types.id = tea.teaType
    ORDER BY tea.id"#;

pub(crate) const SELECT_TEA_BY_ID: &str = r#"
    SELECT tea.id AS id, tea.name AS name, types.id AS type_id, types.name AS type_name
    FROM tea INNER JOIN types ON types.id = tea.teaType
    WHERE tea.id = ?"#;

pub const MISSING_TEA_TYPE: &str = "tea type does not exist or is missing";

#[async_trait]
pub trait TeaStorer: Send + Sync {
    async fn list_teas(&self) -> Result<Vec<Tea>, TeaError>;
    async fn get_tea(&self, id: i64) -> Result<Tea, TeaError>;
    /// Fails with `InvalidReference` before inserting anything when
    /// `tea_type_id` does not resolve.
    async fn create_tea(&self, name: &str, tea_type_id: i64) -> Result<Tea, TeaError>;
    /// Refused while the tea still has owners.
    async fn delete_tea(&self, id: i64) -> Result<Tea, TeaError>;
}

fn not_found(id: i64) -> String {
    format!("tea {id} does not exist")
}

#[async_trait]
impl TeaStorer for Database {
    async fn list_teas(&self) -> Result<Vec<Tea>, TeaError> {
        let rows = sqlx::query_as::<_, DbTea>(SELECT_ALL_TEAS)
            .fetch_all(self.pool())
            .await?;
        Ok(rows.into_iter().map(Tea::from).collect())
    }

    async fn get_tea(&self, id: i64) -> Result<Tea, TeaError> {
        sqlx::query_as::<_, DbTea>(SELECT_TEA_BY_ID)
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .map(Tea::from)
            .ok_or_else(|| TeaError::NotFound(not_found(id)))
    }

    async fn create_tea(&self, name: &str, tea_type_id: i64) -> Result<Tea, TeaError> {
        let mut tx = self.pool().begin().await?;

        let tea_type = sqlx::query_as::<_, TeaType>("SELECT id, name FROM types WHERE id = ?")
            .bind(tea_type_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| TeaError::InvalidReference(MISSING_TEA_TYPE.to_string()))?;

        let res = sqlx::query("INSERT INTO tea (name, teaType) VALUES (?, ?)")
            .bind(name)
            .bind(tea_type.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| classify::on_insert(e, "tea already exists", MISSING_TEA_TYPE))?;

        tx.commit().await?;
        Ok(Tea {
            id: res.last_insert_rowid(),
            name: name.to_string(),
            tea_type,
        })
    }

    async fn delete_tea(&self, id: i64) -> Result<Tea, TeaError> {
        let row: DbTea = self
            .delete_returning(
                SELECT_TEA_BY_ID,
                "DELETE FROM tea WHERE id = ?",
                id,
                not_found(id),
                "tea still has one or more owners",
            )
            .await?;
        Ok(row.into())
    }
}
