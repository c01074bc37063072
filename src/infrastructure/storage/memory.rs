//! In-memory storage implementation

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::{
    CachedDisplayData, ContractRepository, DisplayCacheRepository, DisplayKind, DomainError,
    DomainResult, EnergyType, MeterReading, PriceContract, ReadingRepository, RepositoryProvider,
};

/// In-memory storage for development and testing
#[derive(Default)]
pub struct InMemoryStorage {
    readings: DashMap<Uuid, MeterReading>,
    contracts: DashMap<Uuid, PriceContract>,
    display_cache: DashMap<(Uuid, DisplayKind), CachedDisplayData>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReadingRepository for InMemoryStorage {
    async fn save(&self, reading: MeterReading) -> DomainResult<MeterReading> {
        if self.readings.contains_key(&reading.id) {
            return Err(DomainError::Conflict(format!("reading {}", reading.id)));
        }
        self.readings.insert(reading.id, reading.clone());
        Ok(reading)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<MeterReading>> {
        Ok(self.readings.get(&id).map(|r| r.clone()))
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        energy_type: EnergyType,
    ) -> DomainResult<Vec<MeterReading>> {
        let mut readings: Vec<MeterReading> = self
            .readings
            .iter()
            .filter(|r| r.user_id == user_id && r.energy_type == energy_type)
            .map(|r| r.value().clone())
            .collect();
        readings.sort_by_key(|r| r.read_at);
        Ok(readings)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.readings.remove(&id).ok_or(DomainError::NotFound {
            entity: "MeterReading",
            field: "id",
            value: id.to_string(),
        })?;
        Ok(())
    }
}

#[async_trait]
impl ContractRepository for InMemoryStorage {
    async fn save(&self, contract: PriceContract) -> DomainResult<PriceContract> {
        if self.contracts.contains_key(&contract.id) {
            return Err(DomainError::Conflict(format!("contract {}", contract.id)));
        }
        self.contracts.insert(contract.id, contract.clone());
        Ok(contract)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<PriceContract>> {
        Ok(self.contracts.get(&id).map(|c| c.clone()))
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        energy_type: EnergyType,
    ) -> DomainResult<Vec<PriceContract>> {
        let mut contracts: Vec<PriceContract> = self
            .contracts
            .iter()
            .filter(|c| c.user_id == user_id && c.energy_type == energy_type)
            .map(|c| c.value().clone())
            .collect();
        contracts.sort_by_key(|c| c.starts_on);
        Ok(contracts)
    }

    async fn update(&self, contract: PriceContract) -> DomainResult<()> {
        if !self.contracts.contains_key(&contract.id) {
            return Err(DomainError::NotFound {
                entity: "PriceContract",
                field: "id",
                value: contract.id.to_string(),
            });
        }
        self.contracts.insert(contract.id, contract);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.contracts.remove(&id).ok_or(DomainError::NotFound {
            entity: "PriceContract",
            field: "id",
            value: id.to_string(),
        })?;
        Ok(())
    }
}

#[async_trait]
impl DisplayCacheRepository for InMemoryStorage {
    async fn get(
        &self,
        user_id: Uuid,
        kind: DisplayKind,
    ) -> DomainResult<Option<CachedDisplayData>> {
        Ok(self.display_cache.get(&(user_id, kind)).map(|e| e.clone()))
    }

    async fn put(&self, entry: CachedDisplayData) -> DomainResult<()> {
        self.display_cache.insert((entry.user_id, entry.kind), entry);
        Ok(())
    }
}

impl RepositoryProvider for InMemoryStorage {
    fn readings(&self) -> &dyn ReadingRepository {
        self
    }

    fn contracts(&self) -> &dyn ContractRepository {
        self
    }

    fn display_cache(&self) -> &dyn DisplayCacheRepository {
        self
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_reading(user: Uuid, day: u32, value: f64) -> MeterReading {
        MeterReading::new(
            user,
            EnergyType::Power,
            Utc.with_ymd_and_hms(2023, 1, day, 0, 0, 0).unwrap(),
            value,
        )
    }

    #[tokio::test]
    async fn readings_round_trip_and_order() {
        let storage = InMemoryStorage::new();
        let user = Uuid::new_v4();

        let later = ReadingRepository::save(&storage, sample_reading(user, 20, 1100.0))
            .await
            .unwrap();
        ReadingRepository::save(&storage, sample_reading(user, 5, 1000.0))
            .await
            .unwrap();

        let found = ReadingRepository::find_by_id(&storage, later.id)
            .await
            .unwrap();
        assert!(found.is_some());

        let listed = ReadingRepository::list_for_user(&storage, user, EnergyType::Power)
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed[0].read_at < listed[1].read_at);
    }

    #[tokio::test]
    async fn duplicate_reading_id_conflicts() {
        let storage = InMemoryStorage::new();
        let reading = sample_reading(Uuid::new_v4(), 1, 1000.0);

        ReadingRepository::save(&storage, reading.clone()).await.unwrap();
        let err = ReadingRepository::save(&storage, reading).await;
        assert!(matches!(err, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn delete_missing_reading_is_not_found() {
        let storage = InMemoryStorage::new();
        let err = ReadingRepository::delete(&storage, Uuid::new_v4()).await;
        assert!(matches!(err, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn update_missing_contract_is_not_found() {
        let storage = InMemoryStorage::new();
        let contract = PriceContract::new(
            Uuid::new_v4(),
            EnergyType::Gas,
            chrono::NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            None,
            120.0,
            0.30,
        );
        let err = ContractRepository::update(&storage, contract).await;
        assert!(matches!(err, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn display_cache_overwrites_in_place() {
        let storage = InMemoryStorage::new();
        let user = Uuid::new_v4();
        let kind = DisplayKind::ProjectionSummary(EnergyType::Power);

        let entry = |hash: &str| CachedDisplayData {
            user_id: user,
            kind,
            payload: serde_json::json!({"v": hash}),
            calculated_at: Utc::now(),
            source_hash: hash.to_string(),
        };

        storage.put(entry("aaa")).await.unwrap();
        storage.put(entry("bbb")).await.unwrap();

        let stored = DisplayCacheRepository::get(&storage, user, kind)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.source_hash, "bbb");
    }
}
