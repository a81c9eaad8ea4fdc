//! PostgreSQL content metadata repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::models::ContentRow;
use crate::repo::{ContentRepository, CreateContent};

/// PostgreSQL content repository
#[derive(Clone)]
pub struct PgContentRepository {
    pool: PgPool,
}

impl PgContentRepository {
    /// Create a new content repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const CONTENT_COLUMNS: &str = "id, creator_id, title, description, category, thumbnail_url, \
     duration, views, likes, required_tier, created_at";

#[async_trait]
impl ContentRepository for PgContentRepository {
    async fn insert(&self, content: CreateContent) -> StoreResult<ContentRow> {
        let row = sqlx::query_as::<_, ContentRow>(&format!(
            r#"
            INSERT INTO content (id, creator_id, title, description, category,
                                 thumbnail_url, duration, required_tier)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {CONTENT_COLUMNS}
            "#
        ))
        .bind(content.id)
        .bind(content.creator_id)
        .bind(&content.title)
        .bind(&content.description)
        .bind(&content.category)
        .bind(&content.thumbnail_url)
        .bind(&content.duration)
        .bind(&content.required_tier)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_by_creator(&self, creator_id: Uuid) -> StoreResult<Vec<ContentRow>> {
        let rows = sqlx::query_as::<_, ContentRow>(&format!(
            "SELECT {CONTENT_COLUMNS} FROM content WHERE creator_id = $1 ORDER BY created_at DESC"
        ))
        .bind(creator_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
