//! Display data service: cache-or-compute payloads for dashboard views
//!
//! Payloads are memoized per (user, kind) and keyed by a SHA-256 hash of
//! the source data; any change to the underlying readings or contracts
//! changes the hash and forces recomputation. Writes overwrite in place.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    CachedDisplayData, DisplayKind, DomainResult, EnergyType, MeterReading, PriceContract,
    Projection, RepositoryProvider,
};

/// Consumption attributed to one calendar month (chart bucket)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyConsumption {
    /// Bucket key, `YYYY-MM`
    pub month: String,
    /// Units consumed within the month
    pub consumed: f64,
}

/// Service producing cached display payloads
pub struct DisplayDataService {
    repos: Arc<dyn RepositoryProvider>,
}

impl DisplayDataService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Projection card for the dashboard.
    ///
    /// Served from cache while the source hash matches; `Ok(None)` when the
    /// projection itself is unavailable (fewer than two readings).
    pub async fn projection_summary(
        &self,
        user_id: Uuid,
        energy_type: EnergyType,
        as_of: NaiveDate,
    ) -> DomainResult<Option<serde_json::Value>> {
        let readings = self.repos.readings().list_for_user(user_id, energy_type).await?;
        let contracts = self.repos.contracts().list_for_user(user_id, energy_type).await?;
        let hash = source_hash(&readings, &contracts)?;
        let kind = DisplayKind::ProjectionSummary(energy_type);

        if let Some(payload) = self.cached(user_id, kind, &hash).await? {
            return Ok(Some(payload));
        }

        let projection = match Projection::calculate(&readings, &contracts, as_of) {
            Some(projection) => projection,
            None => return Ok(None),
        };

        let payload = serde_json::to_value(&projection)?;
        self.store(user_id, kind, payload.clone(), hash).await?;
        Ok(Some(payload))
    }

    /// Month-bucketed consumption series for charts.
    ///
    /// Always produces a payload; with no readings the series is empty.
    pub async fn consumption_history(
        &self,
        user_id: Uuid,
        energy_type: EnergyType,
    ) -> DomainResult<serde_json::Value> {
        let readings = self.repos.readings().list_for_user(user_id, energy_type).await?;
        let hash = source_hash(&readings, &[])?;
        let kind = DisplayKind::ConsumptionHistory(energy_type);

        if let Some(payload) = self.cached(user_id, kind, &hash).await? {
            return Ok(payload);
        }

        let payload = serde_json::to_value(monthly_consumption(&readings))?;
        self.store(user_id, kind, payload.clone(), hash).await?;
        Ok(payload)
    }

    async fn cached(
        &self,
        user_id: Uuid,
        kind: DisplayKind,
        hash: &str,
    ) -> DomainResult<Option<serde_json::Value>> {
        if let Some(entry) = self.repos.display_cache().get(user_id, kind).await? {
            if entry.source_hash == hash {
                debug!(user_id = %user_id, kind = %kind, "Display cache hit");
                return Ok(Some(entry.payload));
            }
            debug!(user_id = %user_id, kind = %kind, "Display cache stale; recomputing");
        }
        Ok(None)
    }

    async fn store(
        &self,
        user_id: Uuid,
        kind: DisplayKind,
        payload: serde_json::Value,
        source_hash: String,
    ) -> DomainResult<()> {
        let entry = CachedDisplayData {
            user_id,
            kind,
            payload,
            calculated_at: Utc::now(),
            source_hash,
        };
        self.repos.display_cache().put(entry).await?;
        debug!(user_id = %user_id, kind = %kind, "Display cache updated");
        Ok(())
    }
}

/// Hex SHA-256 over the canonical JSON of the source data
fn source_hash(readings: &[MeterReading], contracts: &[PriceContract]) -> DomainResult<String> {
    let mut hasher = Sha256::new();
    hasher.update(serde_json::to_vec(readings)?);
    hasher.update(serde_json::to_vec(contracts)?);
    Ok(hex::encode(hasher.finalize()))
}

/// Month-bucketed consumption from consecutive reading deltas.
///
/// Each delta is attributed to the month of the later reading.
fn monthly_consumption(readings: &[MeterReading]) -> Vec<MonthlyConsumption> {
    let mut buckets: BTreeMap<String, f64> = BTreeMap::new();
    for pair in readings.windows(2) {
        let delta = pair[1].value - pair[0].value;
        let key = format!(
            "{:04}-{:02}",
            pair[1].read_at.year(),
            pair[1].read_at.month()
        );
        *buckets.entry(key).or_insert(0.0) += delta;
    }

    buckets
        .into_iter()
        .map(|(month, consumed)| MonthlyConsumption { month, consumed })
        .collect()
}

// ── Tests ──────────────────────────────────────────────────────
