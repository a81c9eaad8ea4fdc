//! Entitlement manager - the subscription lifecycle
//!
//! Owns create/query/cancel of entitlements between subscribers and creators
//! and drives the dependent counter updates. The at-most-one-active-per-pair
//! invariant is enforced by the store's uniqueness constraint; the
//! application-level pre-check only gives a friendlier error on the common
//! path. Counter follow-ups are independent best-effort writes: they are
//! logged on failure and never roll back an already-committed entitlement.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use fanbase_store::{
    CreateEntitlement, CreatorRepository, EntitlementRepository, ProfileRepository,
};
use fanbase_types::{
    CreatorAggregate, CreatorId, Entitlement, EntitlementId, EntitlementStatus, Tier,
    UnknownTierError, UserId,
};

use crate::config::ServiceConfig;
use crate::error::{CoreError, CoreResult};
use crate::identity::AuthSession;
use crate::timeout::store_call;

/// An active entitlement joined with the creator's aggregate, for display
#[derive(Debug, Clone)]
pub struct SubscriptionView {
    /// The entitlement
    pub entitlement: Entitlement,
    /// Rollup counters for the subscribed creator
    pub creator: CreatorAggregate,
}

/// Entitlement manager
pub struct EntitlementManager<E, C, P> {
    entitlements: Arc<E>,
    creators: Arc<C>,
    profiles: Arc<P>,
    config: ServiceConfig,
}

impl<E, C, P> EntitlementManager<E, C, P>
where
    E: EntitlementRepository,
    C: CreatorRepository,
    P: ProfileRepository,
{
    /// Create a new entitlement manager
    pub fn new(entitlements: Arc<E>, creators: Arc<C>, profiles: Arc<P>) -> Self {
        Self::with_config(entitlements, creators, profiles, ServiceConfig::default())
    }

    /// Create with an explicit config
    pub fn with_config(
        entitlements: Arc<E>,
        creators: Arc<C>,
        profiles: Arc<P>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            entitlements,
            creators,
            profiles,
            config,
        }
    }

    /// Subscribe the caller to a creator at the named tier.
    ///
    /// Once the entitlement row is committed it is durable regardless of
    /// whether the three follow-up counter updates succeed; drift between
    /// the entitlement ledger and the rollups is corrected by an external
    /// reconciliation pass.
    pub async fn subscribe(
        &self,
        session: &AuthSession,
        creator_id: CreatorId,
        tier_name: &str,
    ) -> CoreResult<Entitlement> {
        let tier: Tier = tier_name
            .parse()
            .map_err(|UnknownTierError(name)| CoreError::UnknownTier(name))?;
        if !tier.is_paid() {
            return Err(CoreError::FreeTier);
        }

        let subscriber_id = session.user_id;

        // Advisory pre-check for a friendly AlreadySubscribed on the common
        // path; the store constraint is what actually holds the invariant.
        let existing = store_call(
            self.config.store_timeout,
            self.entitlements.find_active(subscriber_id.0, creator_id.0),
        )
        .await?;
        if existing.is_some() {
            return Err(CoreError::AlreadySubscribed);
        }

        let amount = tier.price();
        let row = store_call(
            self.config.store_timeout,
            self.entitlements.insert(CreateEntitlement {
                id: Uuid::new_v4(),
                subscriber_id: subscriber_id.0,
                creator_id: creator_id.0,
                tier_name: tier.display_name().to_string(),
                amount,
                start_date: Utc::now(),
            }),
        )
        .await?;
        let entitlement = row.into_domain().map_err(CoreError::from)?;

        // Three independent best-effort follow-ups (at-least-once on the
        // counters, at-most-once on the entitlement itself).
        if let Err(err) = store_call(
            self.config.store_timeout,
            self.creators.add_subscribers(creator_id.0, 1),
        )
        .await
        {
            tracing::warn!(%creator_id, %err, "failed to bump subscriber count");
        }
        if let Err(err) = store_call(
            self.config.store_timeout,
            self.creators.add_earnings(creator_id.0, amount),
        )
        .await
        {
            tracing::warn!(%creator_id, amount, %err, "failed to record earnings");
        }
        if let Err(err) = self.record_spend(subscriber_id, creator_id, amount).await {
            tracing::warn!(%subscriber_id, %err, "failed to update subscriber profile");
        }

        Ok(entitlement)
    }

    async fn record_spend(
        &self,
        subscriber_id: UserId,
        creator_id: CreatorId,
        amount: i64,
    ) -> CoreResult<()> {
        store_call(
            self.config.store_timeout,
            self.profiles.add_subscription(subscriber_id.0, creator_id.0),
        )
        .await?;
        store_call(
            self.config.store_timeout,
            self.profiles.add_total_spent(subscriber_id.0, amount),
        )
        .await
    }

    /// The tier the subscriber currently holds for this creator, if any
    pub async fn entitled_tier(
        &self,
        subscriber_id: UserId,
        creator_id: CreatorId,
    ) -> CoreResult<Option<Tier>> {
        let row = store_call(
            self.config.store_timeout,
            self.entitlements.find_active(subscriber_id.0, creator_id.0),
        )
        .await?;

        match row {
            Some(row) => Ok(Some(row.into_domain().map_err(CoreError::from)?.tier)),
            None => Ok(None),
        }
    }

    /// Whether an active entitlement exists for the pair. Pure read.
    pub async fn is_entitled(
        &self,
        subscriber_id: UserId,
        creator_id: CreatorId,
    ) -> CoreResult<bool> {
        Ok(self.entitled_tier(subscriber_id, creator_id).await?.is_some())
    }

    /// Whether the subscriber may view content gated at `required`.
    /// Free-gated content is open to everyone.
    pub async fn can_access(
        &self,
        subscriber_id: UserId,
        creator_id: CreatorId,
        required: Tier,
    ) -> CoreResult<bool> {
        if !required.is_paid() {
            return Ok(true);
        }
        let held = self.entitled_tier(subscriber_id, creator_id).await?;
        Ok(held.is_some_and(|tier| tier.unlocks(required)))
    }

    /// All active entitlements for a subscriber joined with the creators'
    /// aggregates, most recent first. Finite snapshot, not a live stream.
    pub async fn list_entitlements(
        &self,
        subscriber_id: UserId,
    ) -> CoreResult<Vec<SubscriptionView>> {
        let rows = store_call(
            self.config.store_timeout,
            self.entitlements.list_active_by_subscriber(subscriber_id.0),
        )
        .await?;

        let mut views = Vec::with_capacity(rows.len());
        for row in rows {
            let entitlement = row.into_domain().map_err(CoreError::from)?;
            let creator = store_call(
                self.config.store_timeout,
                self.creators.find_by_id(entitlement.creator_id.0),
            )
            .await?;
            match creator {
                Some(creator) => views.push(SubscriptionView {
                    entitlement,
                    creator: creator.into_domain(),
                }),
                // Entitlement without a creator aggregate is ledger drift;
                // skip it rather than fail the whole listing.
                None => {
                    tracing::warn!(
                        entitlement_id = %entitlement.id,
                        creator_id = %entitlement.creator_id,
                        "active entitlement references missing creator"
                    );
                }
            }
        }

        Ok(views)
    }

    /// Cancel the caller's entitlement: active -> cancelled, end date
    /// stamped. Subscriber count is decremented and the creator is pruned
    /// from the profile's subscriptions set; earnings and total_spent record
    /// historical revenue and are left untouched.
    pub async fn cancel(
        &self,
        session: &AuthSession,
        entitlement_id: EntitlementId,
    ) -> CoreResult<Entitlement> {
        let row = store_call(
            self.config.store_timeout,
            self.entitlements.find_by_id(entitlement_id.0),
        )
        .await?
        .ok_or(CoreError::NotFound)?;
        let current = row.into_domain().map_err(CoreError::from)?;

        if current.subscriber_id != session.user_id {
            return Err(CoreError::NotOwner);
        }

        self.finish(current, EntitlementStatus::Cancelled).await
    }

    /// Expire an entitlement at the end of its period: active -> expired.
    /// System-driven; no caller session involved.
    pub async fn expire(&self, entitlement_id: EntitlementId) -> CoreResult<Entitlement> {
        let row = store_call(
            self.config.store_timeout,
            self.entitlements.find_by_id(entitlement_id.0),
        )
        .await?
        .ok_or(CoreError::NotFound)?;
        let current = row.into_domain().map_err(CoreError::from)?;

        self.finish(current, EntitlementStatus::Expired).await
    }

    async fn finish(
        &self,
        current: Entitlement,
        next: EntitlementStatus,
    ) -> CoreResult<Entitlement> {
        if !current.status.can_transition_to(next) {
            return Err(CoreError::NotActive);
        }

        let finished = match store_call(
            self.config.store_timeout,
            self.entitlements.finish(current.id.0, next, Utc::now()),
        )
        .await
        {
            Ok(row) => row.into_domain().map_err(CoreError::from)?,
            // The row left the active state between our read and the update.
            Err(CoreError::NotFound) => return Err(CoreError::NotActive),
            Err(err) => return Err(err),
        };

        if let Err(err) = store_call(
            self.config.store_timeout,
            self.creators.add_subscribers(finished.creator_id.0, -1),
        )
        .await
        {
            tracing::warn!(creator_id = %finished.creator_id, %err, "failed to drop subscriber count");
        }
        if let Err(err) = store_call(
            self.config.store_timeout,
            self.profiles
                .remove_subscription(finished.subscriber_id.0, finished.creator_id.0),
        )
        .await
        {
            tracing::warn!(subscriber_id = %finished.subscriber_id, %err, "failed to prune profile subscriptions");
        }

        Ok(finished)
    }
}

impl<E, C, P> std::fmt::Debug for EntitlementManager<E, C, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntitlementManager")
            .field("config", &self.config)
            .finish()
    }
}
