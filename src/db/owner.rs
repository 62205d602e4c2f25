use async_trait::async_trait;

use super::models::DbTea;
use super::{Database, Owner, OwnerWithTeas, Tea, classify};
use crate::error::TeaError;

#[async_trait]
pub trait OwnerStorer: Send + Sync {
    async fn list_owners(&self) -> Result<Vec<Owner>, TeaError>;
    async fn get_owner(&self, id: i64) -> Result<Owner, TeaError>;
    async fn create_owner(&self, name: &str) -> Result<Owner, TeaError>;
    async fn delete_owner(&self, id: i64) -> Result<Owner, TeaError>;
    /// Every owner with the teas they hold, including owners with none.
    async fn list_teas_by_owner(&self) -> Result<Vec<OwnerWithTeas>, TeaError>;
}

fn not_found(id: i64) -> String {
    format!("owner {id} does not exist")
}

#[async_trait]
impl OwnerStorer for Database {
    async fn list_owners(&self) -> Result<Vec<Owner>, TeaError> {
        let rows = sqlx::query_as::<_, Owner>("SELECT id, name FROM owner ORDER BY id")
            .fetch_all(self.pool())
            .await?;
        Ok(rows)
    }

    async fn get_owner(&self, id: i64) -> Result<Owner, TeaError> {
        sqlx::query_as::<_, Owner>("SELECT id, name FROM owner WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| TeaError::NotFound(not_found(id)))
    }

    async fn create_owner(&self, name: &str) -> Result<Owner, TeaError> {
        let res = sqlx::query("INSERT INTO owner (name) VALUES (?)")
            .bind(name)
            .execute(self.pool())
            .await
            .map_err(|e| classify::on_insert(e, "owner already exists", "invalid owner"))?;
        Ok(Owner {
            id: res.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    async fn delete_owner(&self, id: i64) -> Result<Owner, TeaError> {
        self.delete_returning(
            "SELECT id, name FROM owner WHERE id = ?",
            "DELETE FROM owner WHERE id = ?",
            id,
            not_found(id),
            "owner still holds one or more teas",
        )
        .await
    }

    async fn list_teas_by_owner(&self) -> Result<Vec<OwnerWithTeas>, TeaError> {
        let mut tx = self.pool().begin().await?;
        let owners = sqlx::query_as::<_, Owner>("SELECT id, name FROM owner ORDER BY id")
            .fetch_all(&mut *tx)
            .await?;

        let mut out = Vec::with_capacity(owners.len());
        for owner in owners {
            let teas = sqlx::query_as::<_, DbTea>(
                r#"SELECT tea.id AS id, tea.name AS name, types.id AS type_id, types.name AS type_name
                   FROM teaOwners
                   INNER JOIN tea ON teaOwners.teaID = tea.id
                   INNER JOIN types ON types.id = tea.teaType
                   WHERE teaOwners.ownerID = ?
                   ORDER BY tea.id"#,
            )
            .bind(owner.id)
            .fetch_all(&mut *tx)
            .await?
            .into_iter()
            .map(Tea::from)
            .collect();
            out.push(OwnerWithTeas { owner, teas });
        }
        tx.commit().await?;
        Ok(out)
    }
}
