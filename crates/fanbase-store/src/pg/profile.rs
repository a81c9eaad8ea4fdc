//! PostgreSQL profile repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::models::ProfileRow;
use crate::repo::{CreateProfile, ProfileRepository};

/// PostgreSQL profile repository
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    /// Create a new profile repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PROFILE_COLUMNS: &str = "id, username, display_name, is_creator, subscription_tier, \
     subscriptions, total_spent, join_date";

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<ProfileRow>> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<ProfileRow>> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create(&self, profile: CreateProfile) -> StoreResult<ProfileRow> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            r#"
            INSERT INTO profiles (id, username, display_name, is_creator,
                                  subscription_tier, subscriptions, total_spent)
            VALUES ($1, $2, $3, $4, 'Free Tier', '{{}}', 0)
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(profile.id)
        .bind(&profile.username)
        .bind(&profile.display_name)
        .bind(profile.is_creator)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn add_subscription(&self, user_id: Uuid, creator_id: Uuid) -> StoreResult<()> {
        // Idempotent append: the guard makes re-adding a present creator a
        // no-op.
        sqlx::query(
            r#"
            UPDATE profiles
            SET subscriptions = array_append(subscriptions, $1)
            WHERE id = $2 AND NOT ($1 = ANY(subscriptions))
            "#,
        )
        .bind(creator_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove_subscription(&self, user_id: Uuid, creator_id: Uuid) -> StoreResult<()> {
        sqlx::query(
            "UPDATE profiles SET subscriptions = array_remove(subscriptions, $1) WHERE id = $2",
        )
        .bind(creator_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn add_total_spent(&self, user_id: Uuid, amount: i64) -> StoreResult<()> {
        sqlx::query("UPDATE profiles SET total_spent = total_spent + $1 WHERE id = $2")
            .bind(amount)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
