//! Fanbase Store - Ledger store abstractions
//!
//! SQLx-based store layer for the Fanbase platform. Repository traits define
//! the ledger boundary consumed by `fanbase-core`; the `pg` module provides
//! the PostgreSQL implementations.
//!
//! # Example
//!
//! ```rust,ignore
//! use fanbase_store::{create_pool, Repositories};
//!
//! let pool = create_pool("postgres://localhost/fanbase").await?;
//! let repos = Repositories::new(pool);
//!
//! let active = repos.entitlements.find_active(subscriber, creator).await?;
//! ```

pub mod error;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;

pub use error::{StoreError, StoreResult};
pub use models::*;
pub use pg::Repositories;
pub use pool::{create_pool, DbPool};
pub use repo::*;
