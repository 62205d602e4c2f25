use async_trait::async_trait;

use super::{Database, Tea, TeaType, TypeWithTeas, classify};
use crate::error::TeaError;

#[async_trait]
pub trait TeaTypeStorer: Send + Sync {
    async fn list_tea_types(&self) -> Result<Vec<TeaType>, TeaError>;
    async fn get_tea_type(&self, id: i64) -> Result<TeaType, TeaError>;
    async fn create_tea_type(&self, name: &str) -> Result<TeaType, TeaError>;
    /// Deletion is refused by the store while any tea still has this type.
    async fn delete_tea_type(&self, id: i64) -> Result<TeaType, TeaError>;
    /// Every tea type with its teas; types without teas carry an empty list.
    async fn list_teas_by_type(&self) -> Result<Vec<TypeWithTeas>, TeaError>;
}

fn not_found(id: i64) -> String {
    format!("tea type {id} does not exist")
}

#[async_trait]
impl TeaTypeStorer for Database {
    async fn list_tea_types(&self) -> Result<Vec<TeaType>, TeaError> {
        let rows = sqlx::query_as::<_, TeaType>("SELECT id, name FROM types ORDER BY id")
            .fetch_all(self.pool())
            .await?;
        Ok(rows)
    }

    async fn get_tea_type(&self, id: i64) -> Result<TeaType, TeaError> {
        sqlx::query_as::<_, TeaType>("SELECT id, name FROM types WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| TeaError::NotFound(not_found(id)))
    }

    async fn create_tea_type(&self, name: &str) -> Result<TeaType, TeaError> {
        let res = sqlx::query("INSERT INTO types (name) VALUES (?)")
            .bind(name)
            .execute(self.pool())
            .await
            .map_err(|e| {
                classify::on_insert(e, "tea type already exists", "invalid tea type")
            })?;
        Ok(TeaType {
            id: res.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    async fn delete_tea_type(&self, id: i64) -> Result<TeaType, TeaError> {
        self.delete_returning(
            "SELECT id, name FROM types WHERE id = ?",
            "DELETE FROM types WHERE id = ?",
            id,
            not_found(id),
            "tea type is still used by one or more teas",
        )
        .await
    }

    async fn list_teas_by_type(&self) -> Result<Vec<TypeWithTeas>, TeaError> {
        let mut tx = self.pool().begin().await?;
        let types = sqlx::query_as::<_, TeaType>("SELECT id, name FROM types ORDER BY id")
            .fetch_all(&mut *tx)
            .await?;

        let mut out = Vec::with_capacity(types.len());
        for tea_type in types {
            let teas = sqlx::query_as::<_, (i64, String)>(
                "SELECT id, name FROM tea WHERE teaType = ? ORDER BY id",
            )
            .bind(tea_type.id)
            .fetch_all(&mut *tx)
            .await?
            .into_iter()
            .map(|(id, name)| Tea {
                id,
                name,
                tea_type: tea_type.clone(),
            })
            .collect();
            out.push(TypeWithTeas { tea_type, teas });
        }
        tx.commit().await?;
        Ok(out)
    }
}
