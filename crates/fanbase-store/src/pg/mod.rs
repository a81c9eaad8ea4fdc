//! PostgreSQL repository implementations
//!
//! Expected schema (abridged). The partial unique index on active
//! subscriptions is load-bearing: it is the mechanism that keeps concurrent
//! subscribe calls from creating two active entitlements for the same pair.
//!
//! ```sql
//! CREATE TABLE subscriptions (
//!     id            UUID PRIMARY KEY,
//!     subscriber_id UUID NOT NULL,
//!     creator_id    UUID NOT NULL,
//!     tier_name     TEXT NOT NULL,
//!     status        TEXT NOT NULL DEFAULT 'active',
//!     start_date    TIMESTAMPTZ NOT NULL,
//!     end_date      TIMESTAMPTZ,
//!     amount        BIGINT NOT NULL
//! );
//! CREATE UNIQUE INDEX subscriptions_one_active
//!     ON subscriptions (subscriber_id, creator_id)
//!     WHERE status = 'active';
//! ```

mod content;
mod creator;
mod entitlement;
mod message;
mod profile;

pub use content::PgContentRepository;
pub use creator::PgCreatorRepository;
pub use entitlement::PgEntitlementRepository;
pub use message::PgMessageRepository;
pub use profile::PgProfileRepository;

use crate::DbPool;

/// All repositories bundled together
#[derive(Clone)]
pub struct Repositories {
    pub entitlements: PgEntitlementRepository,
    pub creators: PgCreatorRepository,
    pub profiles: PgProfileRepository,
    pub content: PgContentRepository,
    pub messages: PgMessageRepository,
}

impl Repositories {
    /// Create all repositories from a database pool
    pub fn new(pool: DbPool) -> Self {
        Self {
            entitlements: PgEntitlementRepository::new(pool.clone()),
            creators: PgCreatorRepository::new(pool.clone()),
            profiles: PgProfileRepository::new(pool.clone()),
            content: PgContentRepository::new(pool.clone()),
            messages: PgMessageRepository::new(pool),
        }
    }
}
