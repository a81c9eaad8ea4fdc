//! Configuration types for the core services

use std::time::Duration;

/// Shared configuration for the core services
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Upper bound on any single ledger store call; on elapse the operation
    /// fails with `StoreUnavailable`. No retry is performed here, retry
    /// policy belongs to the caller.
    pub store_timeout: Duration,
}

impl ServiceConfig {
    /// Create a config with the default store timeout
    pub fn new() -> Self {
        Self {
            store_timeout: Duration::from_secs(5),
        }
    }

    /// Set the store call timeout
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new()
    }
}
