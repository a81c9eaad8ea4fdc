//! Mock repositories for testing
//!
//! In-memory stands-ins for the Postgres repositories. The entitlement mock
//! enforces the one-active-per-pair constraint atomically, matching the
//! partial unique index the real store carries, so the concurrency tests
//! exercise the same contract.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use fanbase_store::{
    ContentRepository, ContentRow, CreateContent, CreateCreator, CreateEntitlement, CreateMessage,
    CreateProfile, CreatorRepository, CreatorRow, EntitlementRepository, EntitlementRow,
    MessageRepository, MessageRow, ProfileRepository, ProfileRow, StoreError, StoreResult,
};
use fanbase_types::EntitlementStatus;

/// In-memory entitlement repository with an atomic active-pair constraint
#[derive(Default, Clone)]
pub struct MockEntitlementRepository {
    rows: Arc<DashMap<Uuid, EntitlementRow>>,
    // (subscriber, creator) -> active entitlement id; the entry lock makes
    // check-and-insert atomic like the store's unique index.
    active: Arc<DashMap<(Uuid, Uuid), Uuid>>,
}

impl MockEntitlementRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[async_trait]
impl EntitlementRepository for MockEntitlementRepository {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<EntitlementRow>> {
        Ok(self.rows.get(&id).map(|r| r.value().clone()))
    }

    async fn find_active(
        &self,
        subscriber_id: Uuid,
        creator_id: Uuid,
    ) -> StoreResult<Option<EntitlementRow>> {
        Ok(self
            .active
            .get(&(subscriber_id, creator_id))
            .and_then(|id| self.rows.get(id.value()).map(|r| r.value().clone())))
    }

    async fn insert(&self, ent: CreateEntitlement) -> StoreResult<EntitlementRow> {
        let key = (ent.subscriber_id, ent.creator_id);
        match self.active.entry(key) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(StoreError::Conflict),
            dashmap::mapref::entry::Entry::Vacant(vacant) => {
                let row = EntitlementRow {
                    id: ent.id,
                    subscriber_id: ent.subscriber_id,
                    creator_id: ent.creator_id,
                    tier_name: ent.tier_name,
                    status: "active".to_string(),
                    start_date: ent.start_date,
                    end_date: None,
                    amount: ent.amount,
                };
                vacant.insert(ent.id);
                self.rows.insert(ent.id, row.clone());
                Ok(row)
            }
        }
    }

    async fn list_active_by_subscriber(
        &self,
        subscriber_id: Uuid,
    ) -> StoreResult<Vec<EntitlementRow>> {
        let mut rows: Vec<EntitlementRow> = self
            .rows
            .iter()
            .filter(|r| r.subscriber_id == subscriber_id && r.status == "active")
            .map(|r| r.value().clone())
            .collect();
        rows.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        Ok(rows)
    }

    async fn finish(
        &self,
        id: Uuid,
        status: EntitlementStatus,
        ended_at: DateTime<Utc>,
    ) -> StoreResult<EntitlementRow> {
        let mut row = match self.rows.get_mut(&id) {
            Some(row) => row,
            None => return Err(StoreError::NotFound),
        };
        if row.status != "active" {
            return Err(StoreError::NotFound);
        }
        row.status = status.as_str().to_string();
        row.end_date = Some(ended_at);
        let updated = row.clone();
        drop(row);
        self.active
            .remove(&(updated.subscriber_id, updated.creator_id));
        Ok(updated)
    }
}

/// Entitlement repository whose calls never complete, for timeout tests
#[derive(Default, Clone)]
pub struct HangingEntitlementRepository;

#[async_trait]
impl EntitlementRepository for HangingEntitlementRepository {
    async fn find_by_id(&self, _id: Uuid) -> StoreResult<Option<EntitlementRow>> {
        std::future::pending().await
    }

    async fn find_active(
        &self,
        _subscriber_id: Uuid,
        _creator_id: Uuid,
    ) -> StoreResult<Option<EntitlementRow>> {
        std::future::pending().await
    }

    async fn insert(&self, _ent: CreateEntitlement) -> StoreResult<EntitlementRow> {
        std::future::pending().await
    }

    async fn list_active_by_subscriber(
        &self,
        _subscriber_id: Uuid,
    ) -> StoreResult<Vec<EntitlementRow>> {
        std::future::pending().await
    }

    async fn finish(
        &self,
        _id: Uuid,
        _status: EntitlementStatus,
        _ended_at: DateTime<Utc>,
    ) -> StoreResult<EntitlementRow> {
        std::future::pending().await
    }
}

/// In-memory creator repository with injectable counter failures
#[derive(Default, Clone)]
pub struct MockCreatorRepository {
    creators: Arc<DashMap<Uuid, CreatorRow>>,
    fail_counters: Arc<AtomicBool>,
}

impl MockCreatorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a creator with zeroed counters
    pub fn insert_zeroed(&self, id: Uuid) {
        self.creators.insert(
            id,
            CreatorRow {
                id,
                bio: String::new(),
                tech_stack: Vec::new(),
                categories: Vec::new(),
                subscriber_count: 0,
                content_count: 0,
                earnings: 0,
                monthly_earnings: 0,
                is_verified: false,
                is_online: false,
            },
        );
    }

    /// Make every counter mutation fail until cleared
    pub fn set_fail_counters(&self, fail: bool) {
        self.fail_counters.store(fail, Ordering::SeqCst);
    }

    pub fn snapshot(&self, id: Uuid) -> Option<CreatorRow> {
        self.creators.get(&id).map(|r| r.value().clone())
    }

    fn check_failure(&self) -> StoreResult<()> {
        if self.fail_counters.load(Ordering::SeqCst) {
            Err(StoreError::Malformed("injected counter failure".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CreatorRepository for MockCreatorRepository {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<CreatorRow>> {
        Ok(self.creators.get(&id).map(|r| r.value().clone()))
    }

    async fn list_all(&self) -> StoreResult<Vec<CreatorRow>> {
        let mut rows: Vec<CreatorRow> = self.creators.iter().map(|r| r.value().clone()).collect();
        rows.sort_by(|a, b| b.subscriber_count.cmp(&a.subscriber_count));
        Ok(rows)
    }

    async fn create(&self, creator: CreateCreator) -> StoreResult<CreatorRow> {
        let row = CreatorRow {
            id: creator.id,
            bio: creator.bio,
            tech_stack: creator.tech_stack,
            categories: creator.categories,
            subscriber_count: 0,
            content_count: 0,
            earnings: 0,
            monthly_earnings: 0,
            is_verified: false,
            is_online: false,
        };
        self.creators.insert(creator.id, row.clone());
        Ok(row)
    }

    async fn add_subscribers(&self, id: Uuid, delta: i64) -> StoreResult<()> {
        self.check_failure()?;
        if let Some(mut row) = self.creators.get_mut(&id) {
            row.subscriber_count = (row.subscriber_count + delta).max(0);
        }
        Ok(())
    }

    async fn add_earnings(&self, id: Uuid, amount: i64) -> StoreResult<()> {
        self.check_failure()?;
        if let Some(mut row) = self.creators.get_mut(&id) {
            row.earnings += amount;
            row.monthly_earnings += amount;
        }
        Ok(())
    }

    async fn add_content(&self, id: Uuid, delta: i64) -> StoreResult<()> {
        self.check_failure()?;
        if let Some(mut row) = self.creators.get_mut(&id) {
            row.content_count = (row.content_count + delta).max(0);
        }
        Ok(())
    }
}

/// In-memory profile repository
#[derive(Default, Clone)]
pub struct MockProfileRepository {
    profiles: Arc<DashMap<Uuid, ProfileRow>>,
    by_username: Arc<DashMap<String, Uuid>>,
}

impl MockProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a blank non-creator profile
    pub fn insert_blank(&self, id: Uuid, username: &str) {
        let row = ProfileRow {
            id,
            username: username.to_string(),
            display_name: username.to_string(),
            is_creator: false,
            subscription_tier: "Free Tier".to_string(),
            subscriptions: Vec::new(),
            total_spent: 0,
            join_date: Utc::now(),
        };
        self.by_username.insert(row.username.clone(), id);
        self.profiles.insert(id, row);
    }

    pub fn snapshot(&self, id: Uuid) -> Option<ProfileRow> {
        self.profiles.get(&id).map(|r| r.value().clone())
    }
}

#[async_trait]
impl ProfileRepository for MockProfileRepository {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<ProfileRow>> {
        Ok(self.profiles.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<ProfileRow>> {
        Ok(self
            .by_username
            .get(username)
            .and_then(|id| self.profiles.get(id.value()).map(|r| r.value().clone())))
    }

    async fn create(&self, profile: CreateProfile) -> StoreResult<ProfileRow> {
        match self.by_username.entry(profile.username.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(StoreError::Conflict),
            dashmap::mapref::entry::Entry::Vacant(vacant) => {
                let row = ProfileRow {
                    id: profile.id,
                    username: profile.username,
                    display_name: profile.display_name,
                    is_creator: profile.is_creator,
                    subscription_tier: "Free Tier".to_string(),
                    subscriptions: Vec::new(),
                    total_spent: 0,
                    join_date: Utc::now(),
                };
                vacant.insert(profile.id);
                self.profiles.insert(profile.id, row.clone());
                Ok(row)
            }
        }
    }

    async fn add_subscription(&self, user_id: Uuid, creator_id: Uuid) -> StoreResult<()> {
        if let Some(mut row) = self.profiles.get_mut(&user_id) {
            if !row.subscriptions.contains(&creator_id) {
                row.subscriptions.push(creator_id);
            }
        }
        Ok(())
    }

    async fn remove_subscription(&self, user_id: Uuid, creator_id: Uuid) -> StoreResult<()> {
        if let Some(mut row) = self.profiles.get_mut(&user_id) {
            row.subscriptions.retain(|c| *c != creator_id);
        }
        Ok(())
    }

    async fn add_total_spent(&self, user_id: Uuid, amount: i64) -> StoreResult<()> {
        if let Some(mut row) = self.profiles.get_mut(&user_id) {
            row.total_spent += amount;
        }
        Ok(())
    }
}

/// In-memory content repository preserving insertion order
#[derive(Default, Clone)]
pub struct MockContentRepository {
    rows: Arc<Mutex<Vec<ContentRow>>>,
}

impl MockContentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentRepository for MockContentRepository {
    async fn insert(&self, content: CreateContent) -> StoreResult<ContentRow> {
        let row = ContentRow {
            id: content.id,
            creator_id: content.creator_id,
            title: content.title,
            description: content.description,
            category: content.category,
            thumbnail_url: content.thumbnail_url,
            duration: content.duration,
            views: 0,
            likes: 0,
            required_tier: content.required_tier,
            created_at: Utc::now(),
        };
        self.rows
            .lock()
            .expect("content lock poisoned")
            .push(row.clone());
        Ok(row)
    }

    async fn list_by_creator(&self, creator_id: Uuid) -> StoreResult<Vec<ContentRow>> {
        let rows = self.rows.lock().expect("content lock poisoned");
        Ok(rows
            .iter()
            .rev()
            .filter(|r| r.creator_id == creator_id)
            .cloned()
            .collect())
    }
}

/// In-memory message repository preserving insertion order
#[derive(Default, Clone)]
pub struct MockMessageRepository {
    rows: Arc<Mutex<Vec<MessageRow>>>,
}

impl MockMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageRepository for MockMessageRepository {
    async fn insert(&self, message: CreateMessage) -> StoreResult<MessageRow> {
        let row = MessageRow {
            id: message.id,
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            body: message.body,
            created_at: Utc::now(),
        };
        self.rows
            .lock()
            .expect("message lock poisoned")
            .push(row.clone());
        Ok(row)
    }

    async fn list_between(&self, a: Uuid, b: Uuid, limit: i64) -> StoreResult<Vec<MessageRow>> {
        let rows = self.rows.lock().expect("message lock poisoned");
        Ok(rows
            .iter()
            .filter(|r| {
                (r.sender_id == a && r.receiver_id == b)
                    || (r.sender_id == b && r.receiver_id == a)
            })
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }
}
