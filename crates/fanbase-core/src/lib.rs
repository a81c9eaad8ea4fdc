//! Fanbase Core - Platform business logic
//!
//! Library-level services invoked by a presentation layer:
//! - [`EntitlementManager`]: the subscription lifecycle (subscribe, query,
//!   cancel/expire) and the dependent counter updates
//! - [`AccountService`]: signup and profile/creator reads
//! - [`ContentService`]: content publishing and tier-gated listing
//! - [`ChatService`]: 1:1 messaging with in-process thread fan-out
//!
//! All durable state lives behind the `fanbase-store` repository traits; the
//! services here hold no shared mutable domain state of their own.

pub mod accounts;
pub mod chat;
pub mod config;
pub mod content;
pub mod error;
pub mod identity;
pub mod manager;

mod timeout;

pub use accounts::{AccountService, SignUpInput};
pub use chat::{ChatService, ThreadSubscription};
pub use config::ServiceConfig;
pub use content::{ContentService, PublishInput};
pub use error::{CoreError, CoreResult};
pub use identity::{require_session, AuthSession, IdentityProvider};
pub use manager::{EntitlementManager, SubscriptionView};
