//! Subscription tier types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Subscription tier levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Free tier - browsing and public content only
    Free,
    /// Simp tier - $9/mo
    Simp,
    /// Sugar Daddy tier - $25/mo
    SugarDaddy,
    /// Whale tier - $60/mo
    Whale,
}

impl Tier {
    /// All tiers, in ascending order
    pub const ALL: [Tier; 4] = [Self::Free, Self::Simp, Self::SugarDaddy, Self::Whale];

    /// Get the monthly price in base currency units
    pub const fn price(&self) -> i64 {
        match self {
            Self::Free => 0,
            Self::Simp => 9,
            Self::SugarDaddy => 25,
            Self::Whale => 60,
        }
    }

    /// Whether this tier carries a charge and therefore needs an entitlement
    /// record; free-tier content is implicitly accessible to everyone.
    pub const fn is_paid(&self) -> bool {
        self.price() > 0
    }

    /// Get the canonical display name
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Free => "Free Tier",
            Self::Simp => "Simp Tier",
            Self::SugarDaddy => "Sugar Daddy Tier",
            Self::Whale => "Whale Tier",
        }
    }

    /// Numeric level for access comparisons; higher tiers unlock lower-tier
    /// content.
    pub const fn level(&self) -> u8 {
        match self {
            Self::Free => 0,
            Self::Simp => 1,
            Self::SugarDaddy => 2,
            Self::Whale => 3,
        }
    }

    /// Whether a subscriber at this tier may view content gated at `required`
    pub const fn unlocks(&self, required: Tier) -> bool {
        self.level() >= required.level()
    }

    /// Get features available for this tier (presentation only)
    pub const fn features(&self) -> &'static [&'static str] {
        match self {
            Self::Free => &[
                "basic_tutorials",
                "public_repos",
                "community_access",
                "limited_chat",
            ],
            Self::Simp => &[
                "private_discord",
                "code_reviews",
                "exclusive_content",
                "direct_messages",
                "priority_chat",
            ],
            Self::SugarDaddy => &[
                "one_on_one_mentoring",
                "live_coding_sessions",
                "priority_support",
                "custom_requests",
                "screen_sharing",
            ],
            Self::Whale => &[
                "unlimited_access",
                "personal_coding_buddy",
                "career_guidance",
                "exclusive_perks",
                "vip_status",
            ],
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Tier {
    type Err = UnknownTierError;

    /// Parse a tier from its display name or a short slug. Unknown names are
    /// a hard error, never a silent default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "free tier" | "free" => Ok(Self::Free),
            "simp tier" | "simp" => Ok(Self::Simp),
            "sugar daddy tier" | "sugar daddy" | "sugar_daddy" => Ok(Self::SugarDaddy),
            "whale tier" | "whale" => Ok(Self::Whale),
            _ => Err(UnknownTierError(s.to_string())),
        }
    }
}

/// Error parsing a tier name
#[derive(Debug, Clone, Error)]
#[error("unknown tier: {0}")]
pub struct UnknownTierError(pub String);
