//! Liveness probe for the backing store.

use crate::error::AppError;
use async_trait::async_trait;

/// Reports whether the backing store answers requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// Short name of the backend, e.g. `postgres`.
    fn backend(&self) -> &'static str;

    async fn check(&self) -> Result<(), AppError>;
}
