//! PostgreSQL creator aggregate repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::models::CreatorRow;
use crate::repo::{CreateCreator, CreatorRepository};

/// PostgreSQL creator repository
///
/// Counter mutations are server-side `SET x = x + $n` updates; the caller
/// never reads, modifies, and writes a counter value.
#[derive(Clone)]
pub struct PgCreatorRepository {
    pool: PgPool,
}

impl PgCreatorRepository {
    /// Create a new creator repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const CREATOR_COLUMNS: &str = "id, bio, tech_stack, categories, subscriber_count, \
     content_count, earnings, monthly_earnings, is_verified, is_online";

#[async_trait]
impl CreatorRepository for PgCreatorRepository {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<CreatorRow>> {
        let row = sqlx::query_as::<_, CreatorRow>(&format!(
            "SELECT {CREATOR_COLUMNS} FROM creators WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_all(&self) -> StoreResult<Vec<CreatorRow>> {
        let rows = sqlx::query_as::<_, CreatorRow>(&format!(
            "SELECT {CREATOR_COLUMNS} FROM creators ORDER BY subscriber_count DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn create(&self, creator: CreateCreator) -> StoreResult<CreatorRow> {
        let row = sqlx::query_as::<_, CreatorRow>(&format!(
            r#"
            INSERT INTO creators (id, bio, tech_stack, categories)
            VALUES ($1, $2, $3, $4)
            RETURNING {CREATOR_COLUMNS}
            "#
        ))
        .bind(creator.id)
        .bind(&creator.bio)
        .bind(&creator.tech_stack)
        .bind(&creator.categories)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn add_subscribers(&self, id: Uuid, delta: i64) -> StoreResult<()> {
        // GREATEST guards the non-negative invariant against drift from
        // best-effort decrements.
        sqlx::query(
            "UPDATE creators SET subscriber_count = GREATEST(subscriber_count + $1, 0) WHERE id = $2",
        )
        .bind(delta)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn add_earnings(&self, id: Uuid, amount: i64) -> StoreResult<()> {
        sqlx::query(
            r#"
            UPDATE creators
            SET earnings = earnings + $1, monthly_earnings = monthly_earnings + $1
            WHERE id = $2
            "#,
        )
        .bind(amount)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn add_content(&self, id: Uuid, delta: i64) -> StoreResult<()> {
        sqlx::query(
            "UPDATE creators SET content_count = GREATEST(content_count + $1, 0) WHERE id = $2",
        )
        .bind(delta)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
