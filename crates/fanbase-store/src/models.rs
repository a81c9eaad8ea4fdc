//! Store row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.
//! Tier and status columns are stored as their canonical strings; the
//! `into_domain` conversions parse them and surface corrupt rows as
//! [`StoreError::Malformed`] rather than defaulting.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use fanbase_types::{
    ContentId, ContentItem, CreatorAggregate, CreatorId, Entitlement, EntitlementId,
    EntitlementStatus, Message, MessageId, SubscriberProfile, Tier, UserId,
};

use crate::error::StoreError;

/// Entitlement row from the `subscriptions` table
#[derive(Debug, Clone, FromRow)]
pub struct EntitlementRow {
    pub id: Uuid,
    pub subscriber_id: Uuid,
    pub creator_id: Uuid,
    pub tier_name: String,
    pub status: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub amount: i64,
}

impl EntitlementRow {
    /// Convert to the domain entitlement
    pub fn into_domain(self) -> Result<Entitlement, StoreError> {
        let tier: Tier = self
            .tier_name
            .parse()
            .map_err(|_| StoreError::Malformed(format!("tier_name: {}", self.tier_name)))?;
        let status: EntitlementStatus = self
            .status
            .parse()
            .map_err(|_| StoreError::Malformed(format!("status: {}", self.status)))?;

        Ok(Entitlement {
            id: EntitlementId(self.id),
            subscriber_id: UserId(self.subscriber_id),
            creator_id: CreatorId(self.creator_id),
            tier,
            status,
            start_date: self.start_date,
            end_date: self.end_date,
            amount: self.amount,
        })
    }
}

/// Creator row from the `creators` table
#[derive(Debug, Clone, FromRow)]
pub struct CreatorRow {
    pub id: Uuid,
    pub bio: String,
    pub tech_stack: Vec<String>,
    pub categories: Vec<String>,
    pub subscriber_count: i64,
    pub content_count: i64,
    pub earnings: i64,
    pub monthly_earnings: i64,
    pub is_verified: bool,
    pub is_online: bool,
}

impl CreatorRow {
    /// Convert to the domain aggregate
    pub fn into_domain(self) -> CreatorAggregate {
        CreatorAggregate {
            creator_id: CreatorId(self.id),
            bio: self.bio,
            tech_stack: self.tech_stack,
            categories: self.categories,
            subscriber_count: self.subscriber_count,
            content_count: self.content_count,
            earnings: self.earnings,
            monthly_earnings: self.monthly_earnings,
            is_verified: self.is_verified,
            is_online: self.is_online,
        }
    }
}

/// Profile row from the `profiles` table
#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub is_creator: bool,
    pub subscription_tier: String,
    pub subscriptions: Vec<Uuid>,
    pub total_spent: i64,
    pub join_date: DateTime<Utc>,
}

impl ProfileRow {
    /// Convert to the domain profile
    pub fn into_domain(self) -> Result<SubscriberProfile, StoreError> {
        let tier: Tier = self.subscription_tier.parse().map_err(|_| {
            StoreError::Malformed(format!("subscription_tier: {}", self.subscription_tier))
        })?;

        Ok(SubscriberProfile {
            user_id: UserId(self.id),
            username: self.username,
            display_name: self.display_name,
            is_creator: self.is_creator,
            subscription_tier: tier,
            subscriptions: self.subscriptions.into_iter().map(CreatorId).collect(),
            total_spent: self.total_spent,
            join_date: self.join_date,
        })
    }
}

/// Content row from the `content` table
#[derive(Debug, Clone, FromRow)]
pub struct ContentRow {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub thumbnail_url: Option<String>,
    pub duration: Option<String>,
    pub views: i64,
    pub likes: i64,
    pub required_tier: String,
    pub created_at: DateTime<Utc>,
}

impl ContentRow {
    /// Convert to the domain content item
    pub fn into_domain(self) -> Result<ContentItem, StoreError> {
        let tier: Tier = self
            .required_tier
            .parse()
            .map_err(|_| StoreError::Malformed(format!("required_tier: {}", self.required_tier)))?;

        Ok(ContentItem {
            id: ContentId(self.id),
            creator_id: CreatorId(self.creator_id),
            title: self.title,
            description: self.description,
            category: self.category,
            thumbnail_url: self.thumbnail_url,
            duration: self.duration,
            views: self.views,
            likes: self.likes,
            required_tier: tier,
            created_at: self.created_at,
        })
    }
}

/// Message row from the `messages` table
#[derive(Debug, Clone, FromRow)]
pub struct MessageRow {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl MessageRow {
    /// Convert to the domain message
    pub fn into_domain(self) -> Message {
        Message {
            id: MessageId(self.id),
            sender_id: UserId(self.sender_id),
            receiver_id: UserId(self.receiver_id),
            body: self.body,
            created_at: self.created_at,
        }
    }
}
