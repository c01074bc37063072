//! Contract repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::PriceContract;
use crate::domain::error::DomainResult;
use crate::domain::reading::EnergyType;

#[async_trait]
pub trait ContractRepository: Send + Sync {
    async fn save(&self, contract: PriceContract) -> DomainResult<PriceContract>;
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<PriceContract>>;
    /// All contracts for the user and energy type, ordered by `starts_on` ascending.
    async fn list_for_user(
        &self,
        user_id: Uuid,
        energy_type: EnergyType,
    ) -> DomainResult<Vec<PriceContract>>;
    async fn update(&self, contract: PriceContract) -> DomainResult<()>;
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}
