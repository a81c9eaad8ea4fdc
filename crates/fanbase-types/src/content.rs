//! Content item metadata

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ContentId, CreatorId, Tier};

/// Metadata for a piece of creator content
///
/// Only metadata lives here; media storage and streaming are handled
/// elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    /// Content ID
    pub id: ContentId,
    /// Publishing creator
    pub creator_id: CreatorId,
    /// Title
    pub title: String,
    /// Optional long description
    pub description: Option<String>,
    /// Category label
    pub category: String,
    /// Optional thumbnail URL
    pub thumbnail_url: Option<String>,
    /// Optional display duration (e.g. "12:34")
    pub duration: Option<String>,
    /// View counter
    pub views: i64,
    /// Like counter
    pub likes: i64,
    /// Minimum tier required to view this item
    pub required_tier: Tier,
    /// When the item was published
    pub created_at: DateTime<Utc>,
}

impl ContentItem {
    /// Whether a viewer holding `tier` (or no entitlement, passed as
    /// [`Tier::Free`]) may view this item
    pub fn viewable_at(&self, tier: Tier) -> bool {
        tier.unlocks(self.required_tier)
    }
}
