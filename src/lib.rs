//! # Energy Insights
//!
//! Consumption tracking and projection core for a personal energy monitor:
//! cumulative meter readings (power/gas), time-bounded pricing contracts,
//! and current-month / current-year consumption and cost projections.
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **domain**: entities, repository traits and the projection math
//! - **application**: services orchestrating repositories and domain logic
//! - **infrastructure**: storage backends (in-memory, JSON snapshot file)
//!
//! Presentation and transport are the caller's concern; this crate returns
//! plain values.

pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use bootstrap::{init_logging, AppContext, InitFlag};
pub use config::{default_config_path, AppConfig, StorageBackendKind};

// Re-export the types callers touch most
pub use domain::{
    DomainError, DomainResult, EnergyType, MeterReading, PriceContract, Projection,
};
pub use infrastructure::storage::{InMemoryStorage, JsonFileStorage};
