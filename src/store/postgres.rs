use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{PgPool, Row};
use std::str::FromStr;

use crate::model::{DogBreed, Id};
use crate::store::traits::{BreedStore, StoreError, StoreResult};

const CREATE_DOG_BREEDS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS dog_breeds (
        id TEXT PRIMARY KEY,
        position BIGSERIAL NOT NULL,
        document JSONB NOT NULL
    )
"#;

/// Breed collection stored as JSONB documents keyed by breed id
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect to `database_name` on the server named by `database_url`
    pub async fn new(
        database_url: &str,
        database_name: &str,
        max_connections: u32,
    ) -> StoreResult<Self> {
        let options = PgConnectOptions::from_str(database_url)
            .map_err(|e| unavailable("Invalid PostgreSQL connection string", e))?
            .database(database_name);

        Self::connect_with(options, max_connections).await
    }

    /// Connect to the database named in `database_url` itself
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let options = PgConnectOptions::from_str(database_url)
            .map_err(|e| unavailable("Invalid PostgreSQL connection string", e))?;

        Self::connect_with(options, max_connections).await
    }

    async fn connect_with(options: PgConnectOptions, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| unavailable("Failed to create PostgreSQL connection pool", e))?;

        Ok(Self { pool })
    }

    /// Create the breed table if it is missing
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::query(CREATE_DOG_BREEDS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| unavailable("Failed to create dog_breeds table", e))?;
        Ok(())
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait::async_trait]
impl BreedStore for PostgresStore {
    async fn find_all(&self, limit: usize) -> StoreResult<Vec<DogBreed>> {
        let rows = sqlx::query("SELECT id, document FROM dog_breeds ORDER BY position LIMIT $1")
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| unavailable("Failed to list breeds", e))?;

        rows.iter().map(breed_from_row).collect()
    }

    async fn find_by_id(&self, id: &Id) -> StoreResult<Option<DogBreed>> {
        let row = sqlx::query("SELECT id, document FROM dog_breeds WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| unavailable("Failed to fetch breed", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        breed_from_row(&row).map(Some)
    }

    async fn search(&self, query: &str, limit: usize) -> StoreResult<Vec<DogBreed>> {
        let pattern = format!("%{}%", escape_like(query));
        let rows = sqlx::query(
            r#"
            SELECT id, document FROM dog_breeds
            WHERE document->>'name' ILIKE $1 ESCAPE '\'
               OR document->>'temperament' ILIKE $1 ESCAPE '\'
               OR document->>'breed_group' ILIKE $1 ESCAPE '\'
               OR document->>'size' ILIKE $1 ESCAPE '\'
            ORDER BY position
            LIMIT $2
            "#,
        )
        .bind(pattern)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| unavailable("Failed to search breeds", e))?;

        rows.iter().map(breed_from_row).collect()
    }

    async fn replace_all(&self, breeds: Vec<DogBreed>) -> StoreResult<usize> {
        // Delete and reinsert in one transaction so readers never see a partial collection
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| unavailable("Failed to start repopulation", e))?;

        // Serializes repopulations without blocking readers, so the DELETE sees
        // every row committed by the previous holder
        sqlx::query("LOCK TABLE dog_breeds IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await
            .map_err(|e| unavailable("Failed to lock dog_breeds for repopulation", e))?;

        sqlx::query("DELETE FROM dog_breeds")
            .execute(&mut *tx)
            .await
            .map_err(|e| unavailable("Failed to clear breeds", e))?;

        for breed in &breeds {
            let document = serde_json::to_value(breed).map_err(|e| StoreError::ShapeMismatch {
                id: breed.id.clone(),
                reason: e.to_string(),
            })?;

            sqlx::query("INSERT INTO dog_breeds (id, document) VALUES ($1, $2)")
                .bind(&breed.id)
                .bind(document)
                .execute(&mut *tx)
                .await
                .map_err(|e| unavailable("Failed to insert breed", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| unavailable("Failed to commit repopulation", e))?;

        Ok(breeds.len())
    }
}

fn unavailable(context: &str, err: impl std::fmt::Display) -> StoreError {
    StoreError::Unavailable(format!("{}: {}", context, err))
}

fn breed_from_row(row: &sqlx::postgres::PgRow) -> StoreResult<DogBreed> {
    let id: String = row
        .try_get("id")
        .map_err(|e| unavailable("Failed to read breed id", e))?;
    let document: serde_json::Value = row
        .try_get("document")
        .map_err(|e| unavailable("Failed to read breed document", e))?;

    serde_json::from_value(document).map_err(|e| StoreError::ShapeMismatch {
        id,
        reason: e.to_string(),
    })
}

/// Escape LIKE metacharacters so the query matches as a literal substring
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
