//! Relational data-access layer backed by a single SQLite file.
//!
//! Layout:
//! - `schema.rs`: DDL run once when the database file is first created
//! - `models.rs`: entities and the joined/aggregated read shapes
//! - `classify.rs`: constraint-failure classification
//! - one file per store capability, each implemented by [`Database`]

pub mod classify;
pub mod models;
pub mod owner;
pub mod schema;
pub mod tea;
pub mod tea_owner;
pub mod tea_type;
pub mod user;

pub use models::{Owner, OwnerWithTeas, Tea, TeaType, TeaWithOwners, TypeWithTeas, UserLogin};
pub use owner::OwnerStorer;
pub use tea::TeaStorer;
pub use tea_owner::TeaOwnerStorer;
pub use tea_type::TeaTypeStorer;
pub use user::UserStorer;

use crate::error::TeaError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{FromRow, Pool, QueryBuilder, Sqlite, SqliteConnection};
use std::path::Path;
use tracing::{info, warn};

pub type SqlitePool = Pool<Sqlite>;

/// Handle to the backing store. Cloning shares the same one-connection pool,
/// so every statement from every store runs through a single connection.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the database at `location`, creating and seeding it first if the
    /// file does not exist yet. An existing file is opened unchanged.
    pub async fn open(
        location: &Path,
        seed_tea_types: &[String],
        seed_owners: &[String],
    ) -> Result<Self, TeaError> {
        let exists = location.exists();

        let connect_opts = SqliteConnectOptions::new()
            .filename(location)
            .create_if_missing(!exists)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(connect_opts)
            .await
            .map_err(|e| {
                TeaError::StoreUnavailable(format!("opening {}: {e}", location.display()))
            })?;
        let db = Self { pool };

        if exists {
            // The driver does not read the file until the first statement.
            if let Err(e) = sqlx::query("SELECT 1 FROM types LIMIT 1")
                .fetch_optional(&db.pool)
                .await
            {
                db.pool.close().await;
                return Err(TeaError::StoreUnavailable(format!(
                    "reading {}: {e}",
                    location.display()
                )));
            }
            info!(path = %location.display(), "opened existing database");
            return Ok(db);
        }

        info!(path = %location.display(), "database doesn't exist; creating");
        if let Err(e) = db.bootstrap(seed_tea_types, seed_owners).await {
            db.pool.close().await;
            if let Err(rm) = std::fs::remove_file(location) {
                warn!(path = %location.display(), error = %rm, "failed to remove half-created database");
            }
            return Err(TeaError::StoreUnavailable(format!(
                "creating schema in {}: {e}",
                location.display()
            )));
        }
        info!(
            tea_types = seed_tea_types.len(),
            owners = seed_owners.len(),
            "database created"
        );
        Ok(db)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn bootstrap(&self, tea_types: &[String], owners: &[String]) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        for stmt in schema::statements() {
            sqlx::query(stmt).execute(&mut *tx).await?;
        }
        insert_seed(&mut *tx, schema::TEA_TYPES_TABLE, tea_types).await?;
        insert_seed(&mut *tx, schema::OWNERS_TABLE, owners).await?;
        tx.commit().await
    }

    /// Read a row and delete it within one transaction, returning what was
    /// removed. A RESTRICT failure surfaces as `Conflict(still_referenced)`.
    async fn delete_returning<T>(
        &self,
        select_sql: &str,
        delete_sql: &str,
        id: i64,
        not_found: String,
        still_referenced: &str,
    ) -> Result<T, TeaError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let mut tx = self.pool.begin().await?;
        let row: T = sqlx::query_as(select_sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(TeaError::NotFound(not_found))?;

        sqlx::query(delete_sql)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| classify::on_delete(e, still_referenced))?;

        tx.commit().await?;
        Ok(row)
    }
}

/// One multi-row INSERT for all seed names; nothing is sent when empty.
/// Names are trimmed and blank entries are skipped.
async fn insert_seed(
    conn: &mut SqliteConnection,
    table: &str,
    names: &[String],
) -> Result<u64, sqlx::Error> {
    let (names, blank): (Vec<&str>, Vec<&str>) =
        names.iter().map(|n| n.trim()).partition(|n| !n.is_empty());
    if !blank.is_empty() {
        warn!(table, skipped = blank.len(), "ignoring blank seed names");
    }
    if names.is_empty() {
        return Ok(0);
    }
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!("INSERT INTO {table} (name) "));
    qb.push_values(names, |mut row, name| {
        row.push_bind(name);
    });
    let res = qb.build().execute(&mut *conn).await?;
    Ok(res.rows_affected())
}
