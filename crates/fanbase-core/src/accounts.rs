//! Account service - signup and profile/creator reads

use std::sync::Arc;

use fanbase_store::{CreateCreator, CreateProfile, CreatorRepository, ProfileRepository};
use fanbase_types::{CreatorAggregate, CreatorId, SubscriberProfile, UserId};

use crate::config::ServiceConfig;
use crate::error::{CoreError, CoreResult};
use crate::identity::AuthSession;
use crate::timeout::store_call;

/// Signup input
#[derive(Debug, Clone)]
pub struct SignUpInput {
    /// Unique handle
    pub username: String,
    /// Display name shown in the UI
    pub display_name: String,
    /// Whether to also create a creator profile
    pub is_creator: bool,
}

/// Account service
///
/// Creates the subscriber profile (and, for creators, the zeroed aggregate)
/// exactly once at signup; both are mutated afterwards only as side effects
/// of entitlement lifecycle transitions.
pub struct AccountService<C, P> {
    creators: Arc<C>,
    profiles: Arc<P>,
    config: ServiceConfig,
}

impl<C, P> AccountService<C, P>
where
    C: CreatorRepository,
    P: ProfileRepository,
{
    /// Create a new account service
    pub fn new(creators: Arc<C>, profiles: Arc<P>) -> Self {
        Self::with_config(creators, profiles, ServiceConfig::default())
    }

    /// Create with an explicit config
    pub fn with_config(creators: Arc<C>, profiles: Arc<P>, config: ServiceConfig) -> Self {
        Self {
            creators,
            profiles,
            config,
        }
    }

    /// Create the caller's profile, and a creator aggregate when requested.
    /// The identity itself already exists at the provider; this only seeds
    /// the platform records.
    pub async fn sign_up(
        &self,
        session: &AuthSession,
        input: SignUpInput,
    ) -> CoreResult<SubscriberProfile> {
        let row = tokio::time::timeout(
            self.config.store_timeout,
            self.profiles.create(CreateProfile {
                id: session.user_id.0,
                username: input.username,
                display_name: input.display_name,
                is_creator: input.is_creator,
            }),
        )
        .await
        .map_err(|_| CoreError::StoreUnavailable("profile create timed out".to_string()))?
        .map_err(|err| {
            // A username collision, not an entitlement conflict.
            if err.is_conflict() {
                CoreError::UsernameTaken
            } else {
                err.into()
            }
        })?;
        let profile = row.into_domain().map_err(CoreError::from)?;

        if input.is_creator {
            store_call(
                self.config.store_timeout,
                self.creators.create(CreateCreator {
                    id: session.user_id.0,
                    bio: String::new(),
                    tech_stack: Vec::new(),
                    categories: Vec::new(),
                }),
            )
            .await?;
        }

        Ok(profile)
    }

    /// Fetch a profile by user id
    pub async fn profile(&self, user_id: UserId) -> CoreResult<SubscriberProfile> {
        let row = store_call(self.config.store_timeout, self.profiles.find_by_id(user_id.0))
            .await?
            .ok_or(CoreError::NotFound)?;
        row.into_domain().map_err(CoreError::from)
    }

    /// Fetch a creator aggregate by id
    pub async fn creator(&self, creator_id: CreatorId) -> CoreResult<CreatorAggregate> {
        let row = store_call(
            self.config.store_timeout,
            self.creators.find_by_id(creator_id.0),
        )
        .await?
        .ok_or(CoreError::NotFound)?;
        Ok(row.into_domain())
    }

    /// Fetch a creator's profile and aggregate by username
    pub async fn creator_by_username(
        &self,
        username: &str,
    ) -> CoreResult<(SubscriberProfile, CreatorAggregate)> {
        let row = store_call(
            self.config.store_timeout,
            self.profiles.find_by_username(username),
        )
        .await?
        .ok_or(CoreError::NotFound)?;
        let profile = row.into_domain().map_err(CoreError::from)?;
        if !profile.is_creator {
            return Err(CoreError::NotFound);
        }

        let creator = self.creator(profile.user_id.as_creator()).await?;
        Ok((profile, creator))
    }

    /// List all creators, highest subscriber count first
    pub async fn list_creators(&self) -> CoreResult<Vec<CreatorAggregate>> {
        let rows = store_call(self.config.store_timeout, self.creators.list_all()).await?;
        Ok(rows.into_iter().map(|row| row.into_domain()).collect())
    }
}

impl<C, P> std::fmt::Debug for AccountService<C, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService")
            .field("config", &self.config)
            .finish()
    }
}
