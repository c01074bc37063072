//! Display cache repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::{CachedDisplayData, DisplayKind};
use crate::domain::error::DomainResult;

#[async_trait]
pub trait DisplayCacheRepository: Send + Sync {
    /// Stored entry for the user and kind, regardless of freshness.
    async fn get(&self, user_id: Uuid, kind: DisplayKind)
        -> DomainResult<Option<CachedDisplayData>>;
    /// Insert or overwrite the entry for (user, kind).
    async fn put(&self, entry: CachedDisplayData) -> DomainResult<()>;
}
