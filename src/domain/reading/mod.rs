pub mod model;
pub mod repository;

pub use model::{EnergyType, MeterReading};
pub use repository::ReadingRepository;
