use async_trait::async_trait;
use sqlx::SqliteConnection;

use super::models::DbTea;
use super::tea::{SELECT_ALL_TEAS, SELECT_TEA_BY_ID};
use super::{Database, Owner, Tea, TeaWithOwners, classify};
use crate::error::TeaError;

pub const RELATIONSHIP_EXISTS: &str = "this relationship already exists";
pub const UNKNOWN_TEA_OR_OWNER: &str = "either the tea or owner id do not exist";

#[async_trait]
pub trait TeaOwnerStorer: Send + Sync {
    /// Link an owner to a tea and return the full tea that was linked.
    async fn create_tea_owner(&self, tea_id: i64, owner_id: i64) -> Result<Tea, TeaError>;
    /// Fails with `NotFound` when the pair was never linked.
    async fn delete_tea_owner(&self, tea_id: i64, owner_id: i64) -> Result<(), TeaError>;
    async fn list_owners_of_tea(&self, tea_id: i64) -> Result<Vec<Owner>, TeaError>;
    /// Every tea with its owner set; teas without owners carry an empty list.
    async fn list_teas_with_owners(&self) -> Result<Vec<TeaWithOwners>, TeaError>;
}

pub(crate) async fn owners_of_tea(
    conn: &mut SqliteConnection,
    tea_id: i64,
) -> Result<Vec<Owner>, sqlx::Error> {
    sqlx::query_as::<_, Owner>(
        r#"SELECT owner.id AS id, owner.name AS name
           FROM teaOwners INNER JOIN owner ON teaOwners.ownerID = owner.id
           WHERE teaOwners.teaID = ?
           ORDER BY owner.id"#,
    )
    .bind(tea_id)
    .fetch_all(&mut *conn)
    .await
}

#[async_trait]
impl TeaOwnerStorer for Database {
    async fn create_tea_owner(&self, tea_id: i64, owner_id: i64) -> Result<Tea, TeaError> {
        let mut tx = self.pool().begin().await?;

        sqlx::query("INSERT INTO teaOwners (teaID, ownerID) VALUES (?, ?)")
            .bind(tea_id)
            .bind(owner_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| classify::on_insert(e, RELATIONSHIP_EXISTS, UNKNOWN_TEA_OR_OWNER))?;

        let tea: Tea = sqlx::query_as::<_, DbTea>(SELECT_TEA_BY_ID)
            .bind(tea_id)
            .fetch_one(&mut *tx)
            .await?
            .into();

        tx.commit().await?;
        Ok(tea)
    }

    async fn delete_tea_owner(&self, tea_id: i64, owner_id: i64) -> Result<(), TeaError> {
        let res = sqlx::query("DELETE FROM teaOwners WHERE teaID = ? AND ownerID = ?")
            .bind(tea_id)
            .bind(owner_id)
            .execute(self.pool())
            .await?;
        if res.rows_affected() == 0 {
            return Err(TeaError::NotFound(
                "relationship does not exist".to_string(),
            ));
        }
        Ok(())
    }

    async fn list_owners_of_tea(&self, tea_id: i64) -> Result<Vec<Owner>, TeaError> {
        let mut conn = self.pool().acquire().await?;
        Ok(owners_of_tea(&mut *conn, tea_id).await?)
    }

    async fn list_teas_with_owners(&self) -> Result<Vec<TeaWithOwners>, TeaError> {
        // Owner lookups share the tea query's snapshot.
        let mut tx = self.pool().begin().await?;
        let teas = sqlx::query_as::<_, DbTea>(SELECT_ALL_TEAS)
            .fetch_all(&mut *tx)
            .await?;

        let mut out = Vec::with_capacity(teas.len());
        for tea in teas {
            let owners = owners_of_tea(&mut *tx, tea.id).await?;
            out.push(TeaWithOwners {
                tea: tea.into(),
                owners,
            });
        }
        tx.commit().await?;
        Ok(out)
    }
}
