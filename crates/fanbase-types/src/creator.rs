//! Creator aggregate types

use serde::{Deserialize, Serialize};

use crate::CreatorId;

/// Denormalized rollup counters attached to a creator for display
///
/// `subscriber_count` tracks the number of active entitlements for the
/// creator, eventually consistent with the entitlement ledger: counter
/// updates are best-effort follow-ups to entitlement writes, and drift is
/// corrected by an external reconciliation pass, not by this code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatorAggregate {
    /// Creator this rollup belongs to
    pub creator_id: CreatorId,
    /// Short bio shown on the profile page
    pub bio: String,
    /// Technologies the creator works with
    pub tech_stack: Vec<String>,
    /// Content categories the creator publishes in
    pub categories: Vec<String>,
    /// Number of active subscribers (non-negative)
    pub subscriber_count: i64,
    /// Number of published content items
    pub content_count: i64,
    /// Lifetime earnings accumulator; never decremented
    pub earnings: i64,
    /// Current-period earnings accumulator; reset on a period boundary by an
    /// external job
    pub monthly_earnings: i64,
    /// Verified badge
    pub is_verified: bool,
    /// Presence flag
    pub is_online: bool,
}
