//! Reading repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::{EnergyType, MeterReading};
use crate::domain::error::DomainResult;

#[async_trait]
pub trait ReadingRepository: Send + Sync {
    async fn save(&self, reading: MeterReading) -> DomainResult<MeterReading>;
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<MeterReading>>;
    /// All readings for the user and energy type, ordered by `read_at` ascending.
    async fn list_for_user(
        &self,
        user_id: Uuid,
        energy_type: EnergyType,
    ) -> DomainResult<Vec<MeterReading>>;
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}
