//! Content service - publishing and tier-gated listing

use std::sync::Arc;

use uuid::Uuid;

use fanbase_store::{ContentRepository, CreateContent, CreatorRepository, EntitlementRepository};
use fanbase_types::{ContentItem, CreatorId, Tier, UnknownTierError, UserId};

use crate::config::ServiceConfig;
use crate::error::{CoreError, CoreResult};
use crate::identity::AuthSession;
use crate::timeout::store_call;

/// Content publish input
#[derive(Debug, Clone)]
pub struct PublishInput {
    /// Title
    pub title: String,
    /// Optional long description
    pub description: Option<String>,
    /// Category label
    pub category: String,
    /// Optional thumbnail URL
    pub thumbnail_url: Option<String>,
    /// Optional display duration
    pub duration: Option<String>,
    /// Tier name gating the item
    pub required_tier: String,
}

/// Content service
pub struct ContentService<T, C, E> {
    content: Arc<T>,
    creators: Arc<C>,
    entitlements: Arc<E>,
    config: ServiceConfig,
}

impl<T, C, E> ContentService<T, C, E>
where
    T: ContentRepository,
    C: CreatorRepository,
    E: EntitlementRepository,
{
    /// Create a new content service
    pub fn new(content: Arc<T>, creators: Arc<C>, entitlements: Arc<E>) -> Self {
        Self::with_config(content, creators, entitlements, ServiceConfig::default())
    }

    /// Create with an explicit config
    pub fn with_config(
        content: Arc<T>,
        creators: Arc<C>,
        entitlements: Arc<E>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            content,
            creators,
            entitlements,
            config,
        }
    }

    /// Publish a content item under the caller's creator profile. The
    /// content counter bump is a best-effort follow-up, like the entitlement
    /// counters.
    pub async fn publish(
        &self,
        session: &AuthSession,
        input: PublishInput,
    ) -> CoreResult<ContentItem> {
        let required: Tier = input
            .required_tier
            .parse()
            .map_err(|UnknownTierError(name)| CoreError::UnknownTier(name))?;

        let creator_id = session.user_id.as_creator();
        store_call(
            self.config.store_timeout,
            self.creators.find_by_id(creator_id.0),
        )
        .await?
        .ok_or(CoreError::NotFound)?;

        let row = store_call(
            self.config.store_timeout,
            self.content.insert(CreateContent {
                id: Uuid::new_v4(),
                creator_id: creator_id.0,
                title: input.title,
                description: input.description,
                category: input.category,
                thumbnail_url: input.thumbnail_url,
                duration: input.duration,
                required_tier: required.display_name().to_string(),
            }),
        )
        .await?;
        let item = row.into_domain().map_err(CoreError::from)?;

        if let Err(err) = store_call(
            self.config.store_timeout,
            self.creators.add_content(creator_id.0, 1),
        )
        .await
        {
            tracing::warn!(%creator_id, %err, "failed to bump content count");
        }

        Ok(item)
    }

    /// List a creator's content visible to `viewer`, newest first.
    ///
    /// The creator sees everything they published; other viewers see items
    /// gated at or below the tier of their active entitlement, with
    /// free-gated items open to everyone (including anonymous viewers).
    pub async fn list_for_viewer(
        &self,
        viewer: Option<UserId>,
        creator_id: CreatorId,
    ) -> CoreResult<Vec<ContentItem>> {
        let rows = store_call(
            self.config.store_timeout,
            self.content.list_by_creator(creator_id.0),
        )
        .await?;

        let held = match viewer {
            Some(user) if user.as_creator() == creator_id => {
                return rows
                    .into_iter()
                    .map(|row| row.into_domain().map_err(CoreError::from))
                    .collect();
            }
            Some(user) => {
                let active = store_call(
                    self.config.store_timeout,
                    self.entitlements.find_active(user.0, creator_id.0),
                )
                .await?;
                match active {
                    Some(row) => row.into_domain().map_err(CoreError::from)?.tier,
                    None => Tier::Free,
                }
            }
            None => Tier::Free,
        };

        let mut items = Vec::new();
        for row in rows {
            let item = row.into_domain().map_err(CoreError::from)?;
            if item.viewable_at(held) {
                items.push(item);
            }
        }
        Ok(items)
    }
}

impl<T, C, E> std::fmt::Debug for ContentService<T, C, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentService")
            .field("config", &self.config)
            .finish()
    }
}
