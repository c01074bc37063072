//! JSON-file-backed storage implementation
//!
//! A flat snapshot persisted on every mutation, suited to single-user
//! deployments where a database would be overkill. The whole state is held
//! in memory behind a lock; the file is only read at startup.

use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    CachedDisplayData, ContractRepository, DisplayCacheRepository, DisplayKind, DomainError,
    DomainResult, EnergyType, MeterReading, PriceContract, ReadingRepository, RepositoryProvider,
};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    readings: Vec<MeterReading>,
    contracts: Vec<PriceContract>,
    display_cache: Vec<CachedDisplayData>,
}

/// Storage backed by a JSON snapshot file
pub struct JsonFileStorage {
    path: PathBuf,
    state: RwLock<Snapshot>,
}

impl JsonFileStorage {
    /// Load the snapshot at `path`, starting empty when the file is absent.
    pub fn open(path: impl Into<PathBuf>) -> DomainResult<Self> {
        let path = path.into();
        let state = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Snapshot::default(),
            Err(e) => return Err(DomainError::Storage(e.to_string())),
        };
        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    fn read_state(&self) -> DomainResult<RwLockReadGuard<'_, Snapshot>> {
        self.state
            .read()
            .map_err(|_| DomainError::Storage("storage lock poisoned".to_string()))
    }

    fn write_state(&self) -> DomainResult<RwLockWriteGuard<'_, Snapshot>> {
        self.state
            .write()
            .map_err(|_| DomainError::Storage("storage lock poisoned".to_string()))
    }

    fn persist(&self, state: &Snapshot) -> DomainResult<()> {
        let bytes = serde_json::to_vec_pretty(state)?;
        std::fs::write(&self.path, bytes).map_err(|e| DomainError::Storage(e.to_string()))
    }
}

#[async_trait]
impl ReadingRepository for JsonFileStorage {
    async fn save(&self, reading: MeterReading) -> DomainResult<MeterReading> {
        let mut state = self.write_state()?;
        if state.readings.iter().any(|r| r.id == reading.id) {
            return Err(DomainError::Conflict(format!("reading {}", reading.id)));
        }
        state.readings.push(reading.clone());
        self.persist(&state)?;
        Ok(reading)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<MeterReading>> {
        let state = self.read_state()?;
        Ok(state.readings.iter().find(|r| r.id == id).cloned())
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        energy_type: EnergyType,
    ) -> DomainResult<Vec<MeterReading>> {
        let state = self.read_state()?;
        let mut readings: Vec<MeterReading> = state
            .readings
            .iter()
            .filter(|r| r.user_id == user_id && r.energy_type == energy_type)
            .cloned()
            .collect();
        readings.sort_by_key(|r| r.read_at);
        Ok(readings)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let mut state = self.write_state()?;
        let pos = state
            .readings
            .iter()
            .position(|r| r.id == id)
            .ok_or(DomainError::NotFound {
                entity: "MeterReading",
                field: "id",
                value: id.to_string(),
            })?;
        state.readings.remove(pos);
        self.persist(&state)
    }
}

#[async_trait]
impl ContractRepository for JsonFileStorage {
    async fn save(&self, contract: PriceContract) -> DomainResult<PriceContract> {
        let mut state = self.write_state()?;
        if state.contracts.iter().any(|c| c.id == contract.id) {
            return Err(DomainError::Conflict(format!("contract {}", contract.id)));
        }
        state.contracts.push(contract.clone());
        self.persist(&state)?;
        Ok(contract)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<PriceContract>> {
        let state = self.read_state()?;
        Ok(state.contracts.iter().find(|c| c.id == id).cloned())
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        energy_type: EnergyType,
    ) -> DomainResult<Vec<PriceContract>> {
        let state = self.read_state()?;
        let mut contracts: Vec<PriceContract> = state
            .contracts
            .iter()
            .filter(|c| c.user_id == user_id && c.energy_type == energy_type)
            .cloned()
            .collect();
        contracts.sort_by_key(|c| c.starts_on);
        Ok(contracts)
    }

    async fn update(&self, contract: PriceContract) -> DomainResult<()> {
        let mut state = self.write_state()?;
        let stored = state
            .contracts
            .iter_mut()
            .find(|c| c.id == contract.id)
            .ok_or(DomainError::NotFound {
                entity: "PriceContract",
                field: "id",
                value: contract.id.to_string(),
            })?;
        *stored = contract;
        self.persist(&state)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let mut state = self.write_state()?;
        let pos = state
            .contracts
            .iter()
            .position(|c| c.id == id)
            .ok_or(DomainError::NotFound {
                entity: "PriceContract",
                field: "id",
                value: id.to_string(),
            })?;
        state.contracts.remove(pos);
        self.persist(&state)
    }
}

#[async_trait]
impl DisplayCacheRepository for JsonFileStorage {
    async fn get(
        &self,
        user_id: Uuid,
        kind: DisplayKind,
    ) -> DomainResult<Option<CachedDisplayData>> {
        let state = self.read_state()?;
        Ok(state
            .display_cache
            .iter()
            .find(|e| e.user_id == user_id && e.kind == kind)
            .cloned())
    }

    async fn put(&self, entry: CachedDisplayData) -> DomainResult<()> {
        let mut state = self.write_state()?;
        match state
            .display_cache
            .iter_mut()
            .find(|e| e.user_id == entry.user_id && e.kind == entry.kind)
        {
            Some(stored) => *stored = entry,
            None => state.display_cache.push(entry),
        }
        self.persist(&state)
    }
}

impl RepositoryProvider for JsonFileStorage {
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
    use chrono::{NaiveDate, TimeZone, Utc};

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("energy-insights-test-{}.json", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn snapshot_survives_reopen() {
        let path = temp_path();
        let user = Uuid::new_v4();

        let contract_id;
        {
            let storage = JsonFileStorage::open(&path).unwrap();
            ReadingRepository::save(
                &storage,
                MeterReading::new(
                    user,
                    EnergyType::Gas,
                    Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
                    500.0,
                ),
            )
            .await
            .unwrap();
            let contract = ContractRepository::save(
                &storage,
                PriceContract::new(
                    user,
                    EnergyType::Gas,
                    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                    None,
                    96.0,
                    0.08,
                ),
            )
            .await
            .unwrap();
            contract_id = contract.id;
        }

        let reopened = JsonFileStorage::open(&path).unwrap();
        let readings = ReadingRepository::list_for_user(&reopened, user, EnergyType::Gas)
            .await
            .unwrap();
        let contract = ContractRepository::find_by_id(&reopened, contract_id)
            .await
            .unwrap();

        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].value, 500.0);
        assert_eq!(contract.unwrap().working_price, 0.08);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn display_cache_survives_reopen_and_overwrites() {
        let path = temp_path();
        let user = Uuid::new_v4();
        let kind = DisplayKind::ConsumptionHistory(EnergyType::Power);

        let entry = |hash: &str| CachedDisplayData {
            user_id: user,
            kind,
            payload: serde_json::json!([]),
            calculated_at: Utc::now(),
            source_hash: hash.to_string(),
        };

        {
            let storage = JsonFileStorage::open(&path).unwrap();
            storage.put(entry("aaa")).await.unwrap();
            storage.put(entry("bbb")).await.unwrap();
        }

        let reopened = JsonFileStorage::open(&path).unwrap();
        let stored = DisplayCacheRepository::get(&reopened, user, kind)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.source_hash, "bbb");

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn missing_file_starts_empty() {
        let path = temp_path();
        let storage = JsonFileStorage::open(&path).unwrap();
        let readings =
            ReadingRepository::list_for_user(&storage, Uuid::new_v4(), EnergyType::Power)
                .await
                .unwrap();
        assert!(readings.is_empty());
    }

    #[tokio::test]
    async fn delete_persists_to_disk() {
        let path = temp_path();
        let user = Uuid::new_v4();

        let storage = JsonFileStorage::open(&path).unwrap();
        let saved = ReadingRepository::save(
            &storage,
            MeterReading::new(
                user,
                EnergyType::Power,
                Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
                1000.0,
            ),
        )
        .await
        .unwrap();
        ReadingRepository::delete(&storage, saved.id).await.unwrap();
        drop(storage);

        let reopened = JsonFileStorage::open(&path).unwrap();
        let readings = ReadingRepository::list_for_user(&reopened, user, EnergyType::Power)
            .await
            .unwrap();
        assert!(readings.is_empty());

        let _ = std::fs::remove_file(&path);
    }
}
