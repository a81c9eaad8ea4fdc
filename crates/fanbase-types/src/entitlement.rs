//! Entitlement types and lifecycle states

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CreatorId, EntitlementId, Tier, UserId};

/// Entitlement lifecycle status
///
/// The only legal transitions are `active -> cancelled` and
/// `active -> expired`; both targets are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntitlementStatus {
    /// Entitlement is in force
    Active,
    /// Subscriber ended the entitlement
    Cancelled,
    /// Billing period lapsed without renewal
    Expired,
}

impl EntitlementStatus {
    /// Status string as stored in the ledger
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
        }
    }

    /// Whether the state machine permits moving from `self` to `next`
    pub const fn can_transition_to(&self, next: EntitlementStatus) -> bool {
        matches!(
            (self, next),
            (Self::Active, Self::Cancelled) | (Self::Active, Self::Expired)
        )
    }

    /// Whether this is a terminal state
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Active)
    }
}

impl std::fmt::Display for EntitlementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EntitlementStatus {
    type Err = UnknownStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "cancelled" => Ok(Self::Cancelled),
            "expired" => Ok(Self::Expired),
            _ => Err(UnknownStatusError(s.to_string())),
        }
    }
}

/// Error parsing an entitlement status string
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown entitlement status: {0}")]
pub struct UnknownStatusError(pub String);

/// A record granting a subscriber access to a creator's gated content
///
/// At most one active entitlement may exist per (subscriber, creator) pair;
/// the ledger enforces this with a partial unique index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entitlement {
    /// Entitlement ID
    pub id: EntitlementId,
    /// Paying user; immutable after creation
    pub subscriber_id: UserId,
    /// Creator being subscribed to; immutable after creation
    pub creator_id: CreatorId,
    /// Tier purchased
    pub tier: Tier,
    /// Lifecycle status
    pub status: EntitlementStatus,
    /// When the entitlement was created
    pub start_date: DateTime<Utc>,
    /// Set when status leaves `Active`
    pub end_date: Option<DateTime<Utc>>,
    /// Amount charged at creation, from the tier price table
    pub amount: i64,
}

impl Entitlement {
    /// Whether the entitlement is currently in force
    pub fn is_active(&self) -> bool {
        self.status == EntitlementStatus::Active
    }
}
