//! Subscriber profile types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CreatorId, Tier, UserId};

/// A platform user's profile and spending rollup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriberProfile {
    /// Owning user
    pub user_id: UserId,
    /// Unique handle
    pub username: String,
    /// Display name shown in the UI
    pub display_name: String,
    /// Whether this user also has a creator profile
    pub is_creator: bool,
    /// The user's own platform tier (distinct from per-creator entitlements)
    pub subscription_tier: Tier,
    /// Creators this user has subscribed to; pruned on cancellation
    pub subscriptions: Vec<CreatorId>,
    /// Monotonically non-decreasing spend accumulator
    pub total_spent: i64,
    /// When the account was created
    pub join_date: DateTime<Utc>,
}

impl SubscriberProfile {
    /// Whether the profile lists a subscription to `creator`
    pub fn is_subscribed_to(&self, creator: CreatorId) -> bool {
        self.subscriptions.contains(&creator)
    }
}
