//! Store call timeout wrapper

use std::future::Future;
use std::time::Duration;

use fanbase_store::StoreResult;

use crate::error::CoreError;

/// Run a store call under the configured timeout. Elapse surfaces as
/// `StoreUnavailable`; the in-flight write is not interruptible, only its
/// result delivery is abandoned.
pub(crate) async fn store_call<T>(
    timeout: Duration,
    fut: impl Future<Output = StoreResult<T>> + Send,
) -> Result<T, CoreError> {
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result.map_err(CoreError::from),
        Err(_) => Err(CoreError::StoreUnavailable(format!(
            "store call timed out after {timeout:?}"
        ))),
    }
}
