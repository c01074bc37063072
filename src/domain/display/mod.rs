pub mod model;
pub mod repository;

pub use model::{CachedDisplayData, DisplayKind};
pub use repository::DisplayCacheRepository;
