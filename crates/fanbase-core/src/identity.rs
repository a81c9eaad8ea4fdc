//! Identity provider boundary

use async_trait::async_trait;

use fanbase_types::UserId;

use crate::error::{CoreError, CoreResult};

/// External collaborator issuing and validating the authenticated caller
/// identity. The core trusts the subscriber id it reports.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The currently authenticated user, if any
    async fn current_user(&self) -> CoreResult<Option<UserId>>;
}

/// An authenticated caller, passed explicitly into every operation that
/// needs one. There is no process-wide session singleton.
#[derive(Debug, Clone, Copy)]
pub struct AuthSession {
    /// Authenticated user
    pub user_id: UserId,
}

impl AuthSession {
    /// Build a session for an already-validated identity. Callers outside
    /// tests should go through [`require_session`].
    pub fn for_user(user_id: UserId) -> Self {
        Self { user_id }
    }
}

/// Resolve the current identity into a session, failing with
/// `NotAuthenticated` when there is none.
pub async fn require_session<I>(provider: &I) -> CoreResult<AuthSession>
where
    I: IdentityProvider + ?Sized,
{
    provider
        .current_user()
        .await?
        .map(AuthSession::for_user)
        .ok_or(CoreError::NotAuthenticated)
}
