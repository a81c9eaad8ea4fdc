//! Shared test fixtures
//!
//! Not every test binary exercises every fixture.
#![allow(dead_code)]

pub mod mock_repos;

use std::sync::Arc;

use fanbase_core::EntitlementManager;
use fanbase_types::{CreatorId, UserId};

use mock_repos::{MockCreatorRepository, MockEntitlementRepository, MockProfileRepository};

/// Manager wired to fresh in-memory repositories
pub struct Fixture {
    pub manager: EntitlementManager<
        MockEntitlementRepository,
        MockCreatorRepository,
        MockProfileRepository,
    >,
    pub entitlements: Arc<MockEntitlementRepository>,
    pub creators: Arc<MockCreatorRepository>,
    pub profiles: Arc<MockProfileRepository>,
}

impl Fixture {
    pub fn new() -> Self {
        let entitlements = Arc::new(MockEntitlementRepository::new());
        let creators = Arc::new(MockCreatorRepository::new());
        let profiles = Arc::new(MockProfileRepository::new());
        let manager = EntitlementManager::new(
            Arc::clone(&entitlements),
            Arc::clone(&creators),
            Arc::clone(&profiles),
        );
        Self {
            manager,
            entitlements,
            creators,
            profiles,
        }
    }

    /// Seed a creator aggregate and return its id
    pub fn seed_creator(&self) -> CreatorId {
        let id = CreatorId::new();
        self.creators.insert_zeroed(id.0);
        id
    }

    /// Seed a subscriber profile and return its user id
    pub fn seed_subscriber(&self, username: &str) -> UserId {
        let id = UserId::new();
        self.profiles.insert_blank(id.0, username);
        id
    }
}
