//! Fanbase Types - Shared domain types
//!
//! This crate contains domain types used across the Fanbase platform:
//! - User, creator, and record identifiers
//! - Subscription tiers and pricing
//! - Entitlements and their lifecycle states
//! - Creator aggregates, subscriber profiles, content, and chat messages

pub mod content;
pub mod creator;
pub mod entitlement;
pub mod id;
pub mod message;
pub mod profile;
pub mod tier;

pub use content::*;
pub use creator::*;
pub use entitlement::*;
pub use id::*;
pub use message::*;
pub use profile::*;
pub use tier::*;
