//! Repository provider abstraction

use super::contract::ContractRepository;
use super::display::DisplayCacheRepository;
use super::reading::ReadingRepository;

/// Unified access to the per-aggregate repositories.
///
/// Implemented by each storage backend; the backend is selected once at
/// startup from configuration, never per request.
pub trait RepositoryProvider: Send + Sync {
    fn readings(&self) -> &dyn ReadingRepository;
    fn contracts(&self) -> &dyn ContractRepository;
    fn display_cache(&self) -> &dyn DisplayCacheRepository;
}
