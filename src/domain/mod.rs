pub mod contract;
pub mod display;
pub mod error;
pub mod projection;
pub mod reading;
pub mod repositories;

// Re-export commonly used types
pub use contract::{active_contract, ContractRepository, PriceContract};
pub use display::{CachedDisplayData, DisplayCacheRepository, DisplayKind};
pub use error::{DomainError, DomainResult};
pub use projection::{daily_rate, DailyRate, PeriodOutlook, Projection};
pub use reading::{EnergyType, MeterReading, ReadingRepository};
pub use repositories::RepositoryProvider;
