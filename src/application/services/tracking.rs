//! Meter tracking service for readings and pricing contracts

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{
    active_contract, DomainResult, EnergyType, MeterReading, PriceContract, RepositoryProvider,
};

/// Service for recording readings and managing pricing contracts
pub struct MeterTrackingService {
    repos: Arc<dyn RepositoryProvider>,
}

impl MeterTrackingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Readings ───────────────────────────────────────────────

    /// Record a cumulative meter reading. The timestamp defaults to now
    /// when absent.
    pub async fn record_reading(
        &self,
        user_id: Uuid,
        energy_type: EnergyType,
        read_at: Option<DateTime<Utc>>,
        value: f64,
    ) -> DomainResult<MeterReading> {
        let reading = MeterReading::new(
            user_id,
            energy_type,
            read_at.unwrap_or_else(Utc::now),
            value,
        );
        let saved = self.repos.readings().save(reading).await?;

        info!(
            user_id = %user_id,
            energy_type = %energy_type,
            value,
            "Meter reading recorded"
        );

        Ok(saved)
    }

    /// Reading history for the user and energy type, oldest first.
    pub async fn list_readings(
        &self,
        user_id: Uuid,
        energy_type: EnergyType,
    ) -> DomainResult<Vec<MeterReading>> {
        self.repos.readings().list_for_user(user_id, energy_type).await
    }

    pub async fn delete_reading(&self, id: Uuid) -> DomainResult<()> {
        self.repos.readings().delete(id).await?;
        info!(reading_id = %id, "Meter reading deleted");
        Ok(())
    }

    // ── Contracts ──────────────────────────────────────────────

    /// Create a pricing contract. An end date before the start date is
    /// clamped to the start date, not rejected.
    pub async fn create_contract(
        &self,
        user_id: Uuid,
        energy_type: EnergyType,
        starts_on: NaiveDate,
        ends_on: Option<NaiveDate>,
        base_price: f64,
        working_price: f64,
    ) -> DomainResult<PriceContract> {
        let ends_on = match ends_on {
            Some(end) if end < starts_on => {
                warn!(
                    user_id = %user_id,
                    %starts_on,
                    %end,
                    "Contract end precedes start; clamping to start"
                );
                Some(starts_on)
            }
            other => other,
        };

        let contract = PriceContract::new(
            user_id,
            energy_type,
            starts_on,
            ends_on,
            base_price,
            working_price,
        );
        let saved = self.repos.contracts().save(contract).await?;

        info!(
            user_id = %user_id,
            energy_type = %energy_type,
            contract_id = %saved.id,
            "Price contract created"
        );

        Ok(saved)
    }

    /// Contracts for the user and energy type, earliest start first.
    pub async fn list_contracts(
        &self,
        user_id: Uuid,
        energy_type: EnergyType,
    ) -> DomainResult<Vec<PriceContract>> {
        self.repos.contracts().list_for_user(user_id, energy_type).await
    }

    pub async fn update_contract(&self, contract: PriceContract) -> DomainResult<()> {
        self.repos.contracts().update(contract.clone()).await?;
        info!(contract_id = %contract.id, "Price contract updated");
        Ok(())
    }

    pub async fn delete_contract(&self, id: Uuid) -> DomainResult<()> {
        self.repos.contracts().delete(id).await?;
        info!(contract_id = %id, "Price contract deleted");
        Ok(())
    }

    /// The contract in effect for the user/energy type on the given date.
    pub async fn active_contract(
        &self,
        user_id: Uuid,
        energy_type: EnergyType,
        date: NaiveDate,
    ) -> DomainResult<Option<PriceContract>> {
        let contracts = self.repos.contracts().list_for_user(user_id, energy_type).await?;
        Ok(active_contract(&contracts, date).cloned())
    }
}

// ── Tests ──────────────────────────────────────────────────────
