//! Repository traits
//!
//! Define async repository interfaces for the ledger store. The store is
//! trusted for durability and atomicity of individual record operations
//! only; no trait method spans records transactionally. Counter updates are
//! expressed as deltas so implementations can apply them server-side.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use fanbase_types::EntitlementStatus;

use crate::error::StoreResult;
use crate::models::*;

/// Entitlement repository trait
#[async_trait]
pub trait EntitlementRepository: Send + Sync {
    /// Find an entitlement by ID
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<EntitlementRow>>;

    /// Find the active entitlement for a (subscriber, creator) pair
    async fn find_active(
        &self,
        subscriber_id: Uuid,
        creator_id: Uuid,
    ) -> StoreResult<Option<EntitlementRow>>;

    /// Insert a new entitlement with status `active`.
    ///
    /// Fails with [`crate::StoreError::Conflict`] when an active entitlement
    /// for the pair already exists; implementations must back this with a
    /// store-side uniqueness constraint, the caller's pre-check is advisory
    /// only.
    async fn insert(&self, ent: CreateEntitlement) -> StoreResult<EntitlementRow>;

    /// List a subscriber's active entitlements, most recent first
    async fn list_active_by_subscriber(
        &self,
        subscriber_id: Uuid,
    ) -> StoreResult<Vec<EntitlementRow>>;

    /// Move an active entitlement into a terminal status and stamp its end
    /// date. Returns the updated row; fails with `NotFound` if the row does
    /// not exist or is no longer active.
    async fn finish(
        &self,
        id: Uuid,
        status: EntitlementStatus,
        ended_at: DateTime<Utc>,
    ) -> StoreResult<EntitlementRow>;
}

/// Create entitlement input
#[derive(Debug, Clone)]
pub struct CreateEntitlement {
    pub id: Uuid,
    pub subscriber_id: Uuid,
    pub creator_id: Uuid,
    pub tier_name: String,
    pub amount: i64,
    pub start_date: DateTime<Utc>,
}

/// Creator aggregate repository trait
#[async_trait]
pub trait CreatorRepository: Send + Sync {
    /// Find a creator aggregate by ID
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<CreatorRow>>;

    /// List all creators, highest subscriber count first
    async fn list_all(&self) -> StoreResult<Vec<CreatorRow>>;

    /// Create a creator aggregate (zeroed counters)
    async fn create(&self, creator: CreateCreator) -> StoreResult<CreatorRow>;

    /// Atomically adjust the subscriber counter by `delta`
    async fn add_subscribers(&self, id: Uuid, delta: i64) -> StoreResult<()>;

    /// Atomically add `amount` to both earnings accumulators
    async fn add_earnings(&self, id: Uuid, amount: i64) -> StoreResult<()>;

    /// Atomically adjust the content counter by `delta`
    async fn add_content(&self, id: Uuid, delta: i64) -> StoreResult<()>;
}

/// Create creator input
#[derive(Debug, Clone)]
pub struct CreateCreator {
    pub id: Uuid,
    pub bio: String,
    pub tech_stack: Vec<String>,
    pub categories: Vec<String>,
}

/// Subscriber profile repository trait
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find a profile by user ID
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<ProfileRow>>;

    /// Find a profile by username
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<ProfileRow>>;

    /// Create a profile
    async fn create(&self, profile: CreateProfile) -> StoreResult<ProfileRow>;

    /// Atomically append a creator to the subscriptions set; adding an
    /// already-present creator is a no-op
    async fn add_subscription(&self, user_id: Uuid, creator_id: Uuid) -> StoreResult<()>;

    /// Atomically remove a creator from the subscriptions set
    async fn remove_subscription(&self, user_id: Uuid, creator_id: Uuid) -> StoreResult<()>;

    /// Atomically add `amount` to the spend accumulator
    async fn add_total_spent(&self, user_id: Uuid, amount: i64) -> StoreResult<()>;
}

/// Create profile input
#[derive(Debug, Clone)]
pub struct CreateProfile {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub is_creator: bool,
}

/// Content metadata repository trait
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Insert a content item
    async fn insert(&self, content: CreateContent) -> StoreResult<ContentRow>;

    /// List a creator's content, newest first
    async fn list_by_creator(&self, creator_id: Uuid) -> StoreResult<Vec<ContentRow>>;
}

/// Create content input
#[derive(Debug, Clone)]
pub struct CreateContent {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub thumbnail_url: Option<String>,
    pub duration: Option<String>,
    pub required_tier: String,
}

/// Chat message repository trait
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Insert a message
    async fn insert(&self, message: CreateMessage) -> StoreResult<MessageRow>;

    /// List messages between two users in insertion order, capped at `limit`
    async fn list_between(&self, a: Uuid, b: Uuid, limit: i64) -> StoreResult<Vec<MessageRow>>;
}

/// Create message input
#[derive(Debug, Clone)]
pub struct CreateMessage {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub body: String,
}
