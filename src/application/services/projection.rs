//! Projection service combining stored readings with contract pricing

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{DomainResult, EnergyType, Projection, RepositoryProvider};

/// Service computing current-period consumption and cost projections
pub struct ProjectionService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ProjectionService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Projection for the user's energy type as of today.
    pub async fn project_now(
        &self,
        user_id: Uuid,
        energy_type: EnergyType,
    ) -> DomainResult<Option<Projection>> {
        self.project_as_of(user_id, energy_type, Utc::now().date_naive())
            .await
    }

    /// Projection as of an arbitrary date.
    ///
    /// Loads a consistent snapshot of readings and contracts and delegates
    /// to the domain calculation. Fewer than two readings for the type is
    /// not an error: the result is `Ok(None)`.
    pub async fn project_as_of(
        &self,
        user_id: Uuid,
        energy_type: EnergyType,
        as_of: NaiveDate,
    ) -> DomainResult<Option<Projection>> {
        let readings = self.repos.readings().list_for_user(user_id, energy_type).await?;
        let contracts = self.repos.contracts().list_for_user(user_id, energy_type).await?;

        let projection = Projection::calculate(&readings, &contracts, as_of);

        if let Some(p) = &projection {
            debug!(
                user_id = %user_id,
                energy_type = %energy_type,
                daily_rate = p.daily_rate,
                "Projection calculated"
            );
        } else {
            debug!(
                user_id = %user_id,
                energy_type = %energy_type,
                readings = readings.len(),
                "Insufficient data for projection"
            );
        }

        Ok(projection)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MeterReading;
    use crate::infrastructure::storage::InMemoryStorage;
    use chrono::{DateTime, TimeZone};

    fn dt(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn insufficient_data_returns_none_not_error() {
        let storage = Arc::new(InMemoryStorage::new());
        let svc = ProjectionService::new(storage.clone());
        let user = Uuid::new_v4();

        // No readings at all
        let p = svc
            .project_as_of(user, EnergyType::Power, date(2023, 6, 15))
            .await
            .unwrap();
        assert!(p.is_none());

        // A single reading is still not enough
        storage
            .readings()
            .save(MeterReading::new(user, EnergyType::Power, dt(2023, 1, 1), 1000.0))
            .await
            .unwrap();
        let p = svc
            .project_as_of(user, EnergyType::Power, date(2023, 6, 15))
            .await
            .unwrap();
        assert!(p.is_none());
    }

    #[tokio::test]
    async fn projection_reflects_new_reading_immediately() {
        let storage = Arc::new(InMemoryStorage::new());
        let svc = ProjectionService::new(storage.clone());
        let user = Uuid::new_v4();
        let as_of = date(2024, 6, 15);

        for (at, value) in [(dt(2024, 1, 1), 1000.0), (dt(2024, 5, 1), 2210.0)] {
            storage
                .readings()
                .save(MeterReading::new(user, EnergyType::Power, at, value))
                .await
                .unwrap();
        }

        let before = svc
            .project_as_of(user, EnergyType::Power, as_of)
            .await
            .unwrap()
            .unwrap();

        storage
            .readings()
            .save(MeterReading::new(user, EnergyType::Power, dt(2024, 6, 15), 3000.0))
            .await
            .unwrap();

        // No separate update step: the next call sees the shifted rate
        let after = svc
            .project_as_of(user, EnergyType::Power, as_of)
            .await
            .unwrap()
            .unwrap();

        assert!(after.daily_rate > before.daily_rate);
        assert!(after.month.projected > before.month.projected);
    }

    #[tokio::test]
    async fn project_now_uses_todays_date() {
        let storage = Arc::new(InMemoryStorage::new());
        let svc = ProjectionService::new(storage.clone());

        // No data for the user: absent result, regardless of the date
        let p = svc.project_now(Uuid::new_v4(), EnergyType::Power).await.unwrap();
        assert!(p.is_none());
    }

    #[tokio::test]
    async fn energy_types_are_isolated() {
        let storage = Arc::new(InMemoryStorage::new());
        let svc = ProjectionService::new(storage.clone());
        let user = Uuid::new_v4();

        for (at, value) in [(dt(2023, 1, 1), 1000.0), (dt(2023, 1, 11), 1100.0)] {
            storage
                .readings()
                .save(MeterReading::new(user, EnergyType::Power, at, value))
                .await
                .unwrap();
        }

        let gas = svc
            .project_as_of(user, EnergyType::Gas, date(2023, 1, 11))
            .await
            .unwrap();
        assert!(gas.is_none());
    }
}
