pub mod estimator;
pub mod model;

pub use estimator::{daily_rate, DailyRate};
pub use model::{PeriodOutlook, Projection};
