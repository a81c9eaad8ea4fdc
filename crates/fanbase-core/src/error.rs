//! Core errors

use thiserror::Error;

use fanbase_store::StoreError;

/// Result alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Platform core errors
///
/// Every failure is surfaced to the immediate caller; nothing is swallowed
/// or retried inside the services.
#[derive(Error, Debug)]
pub enum CoreError {
    /// No caller identity; re-authenticate
    #[error("not authenticated")]
    NotAuthenticated,

    /// An active entitlement for the pair already exists (including the case
    /// where a concurrent subscribe lost the race at the store)
    #[error("already subscribed to this creator")]
    AlreadySubscribed,

    /// Tier name not in the price table; caller defect, never defaulted
    #[error("unknown tier: {0}")]
    UnknownTier(String),

    /// The free tier requires no entitlement record
    #[error("the free tier does not require a subscription")]
    FreeTier,

    /// Record not found
    #[error("not found")]
    NotFound,

    /// Caller does not own the entitlement
    #[error("entitlement does not belong to caller")]
    NotOwner,

    /// Entitlement already left the active state
    #[error("entitlement is not active")]
    NotActive,

    /// Username already taken at signup
    #[error("username already taken")]
    UsernameTaken,

    /// Empty chat message
    #[error("message body is empty")]
    EmptyMessage,

    /// Ledger store unreachable or timed out; caller decides whether to retry
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// Internal error (e.g. a malformed stored row)
    #[error("internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotAuthenticated => 401,
            Self::NotOwner => 403,
            Self::NotFound => 404,
            Self::AlreadySubscribed | Self::NotActive | Self::UsernameTaken => 409,
            Self::UnknownTier(_) | Self::FreeTier | Self::EmptyMessage => 400,
            Self::StoreUnavailable(_) => 503,
            Self::Internal(_) => 500,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => "NOT_AUTHENTICATED",
            Self::AlreadySubscribed => "ALREADY_SUBSCRIBED",
            Self::UnknownTier(_) => "UNKNOWN_TIER",
            Self::FreeTier => "FREE_TIER",
            Self::NotFound => "NOT_FOUND",
            Self::NotOwner => "NOT_OWNER",
            Self::NotActive => "NOT_ACTIVE",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::EmptyMessage => "EMPTY_MESSAGE",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            // A store-level uniqueness conflict means the same invariant the
            // pre-check guards was about to be violated by a race; callers
            // see both the same way.
            StoreError::Conflict => Self::AlreadySubscribed,
            StoreError::NotFound => Self::NotFound,
            StoreError::Malformed(detail) => Self::Internal(detail),
            StoreError::Sqlx(e) => {
                tracing::error!("store error: {e}");
                Self::StoreUnavailable(e.to_string())
            }
        }
    }
}
