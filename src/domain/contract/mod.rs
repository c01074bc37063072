pub mod model;
pub mod repository;

pub use model::{active_contract, PriceContract};
pub use repository::ContractRepository;
