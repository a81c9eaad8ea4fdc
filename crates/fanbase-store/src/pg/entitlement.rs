//! PostgreSQL entitlement repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use fanbase_types::EntitlementStatus;

use crate::error::{StoreError, StoreResult};
use crate::models::EntitlementRow;
use crate::repo::{CreateEntitlement, EntitlementRepository};

/// PostgreSQL entitlement repository
#[derive(Clone)]
pub struct PgEntitlementRepository {
    pool: PgPool,
}

impl PgEntitlementRepository {
    /// Create a new entitlement repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntitlementRepository for PgEntitlementRepository {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<EntitlementRow>> {
        let row = sqlx::query_as::<_, EntitlementRow>(
            r#"
            SELECT id, subscriber_id, creator_id, tier_name, status,
                   start_date, end_date, amount
            FROM subscriptions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_active(
        &self,
        subscriber_id: Uuid,
        creator_id: Uuid,
    ) -> StoreResult<Option<EntitlementRow>> {
        let row = sqlx::query_as::<_, EntitlementRow>(
            r#"
            SELECT id, subscriber_id, creator_id, tier_name, status,
                   start_date, end_date, amount
            FROM subscriptions
            WHERE subscriber_id = $1 AND creator_id = $2 AND status = 'active'
            "#,
        )
        .bind(subscriber_id)
        .bind(creator_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn insert(&self, ent: CreateEntitlement) -> StoreResult<EntitlementRow> {
        // The partial unique index on (subscriber_id, creator_id) for active
        // rows turns a lost race into StoreError::Conflict here.
        let row = sqlx::query_as::<_, EntitlementRow>(
            r#"
            INSERT INTO subscriptions (id, subscriber_id, creator_id, tier_name,
                                       status, start_date, amount)
            VALUES ($1, $2, $3, $4, 'active', $5, $6)
            RETURNING id, subscriber_id, creator_id, tier_name, status,
                      start_date, end_date, amount
            "#,
        )
        .bind(ent.id)
        .bind(ent.subscriber_id)
        .bind(ent.creator_id)
        .bind(&ent.tier_name)
        .bind(ent.start_date)
        .bind(ent.amount)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_active_by_subscriber(
        &self,
        subscriber_id: Uuid,
    ) -> StoreResult<Vec<EntitlementRow>> {
        let rows = sqlx::query_as::<_, EntitlementRow>(
            r#"
            SELECT id, subscriber_id, creator_id, tier_name, status,
                   start_date, end_date, amount
            FROM subscriptions
            WHERE subscriber_id = $1 AND status = 'active'
            ORDER BY start_date DESC
            "#,
        )
        .bind(subscriber_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn finish(
        &self,
        id: Uuid,
        status: EntitlementStatus,
        ended_at: DateTime<Utc>,
    ) -> StoreResult<EntitlementRow> {
        // The WHERE status = 'active' guard makes the transition atomic: a
        // row that already left the active state is reported as NotFound.
        let row = sqlx::query_as::<_, EntitlementRow>(
            r#"
            UPDATE subscriptions
            SET status = $1, end_date = $2
            WHERE id = $3 AND status = 'active'
            RETURNING id, subscriber_id, creator_id, tier_name, status,
                      start_date, end_date, amount
            "#,
        )
        .bind(status.as_str())
        .bind(ended_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(StoreError::NotFound)
    }
}
