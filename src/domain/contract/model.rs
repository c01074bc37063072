//! Pricing contract domain entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::reading::EnergyType;

/// A time-bounded pricing agreement for one energy type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceContract {
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    pub energy_type: EnergyType,
    /// First day the contract applies
    pub starts_on: NaiveDate,
    /// Last day the contract applies; open-ended when absent
    pub ends_on: Option<NaiveDate>,
    /// Fixed annual base fee
    pub base_price: f64,
    /// Price per consumed unit (kWh or m³)
    pub working_price: f64,
}

impl PriceContract {
    pub fn new(
        user_id: Uuid,
        energy_type: EnergyType,
        starts_on: NaiveDate,
        ends_on: Option<NaiveDate>,
        base_price: f64,
        working_price: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            energy_type,
            starts_on,
            ends_on,
            base_price,
            working_price,
        }
    }

    /// Check whether the contract covers the given date
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        if date < self.starts_on {
            return false;
        }
        match self.ends_on {
            Some(end) => date <= end,
            None => true,
        }
    }

    /// Monthly share of the annual base fee
    pub fn monthly_base_fee(&self) -> f64 {
        self.base_price / 12.0
    }
}

/// Resolve the active contract for a date.
///
/// Overlapping contracts for the same energy type may exist in storage; the
/// one with the latest start date at or before `date` wins.
pub fn active_contract(contracts: &[PriceContract], date: NaiveDate) -> Option<&PriceContract> {
    contracts
        .iter()
        .filter(|c| c.is_active_on(date))
        .max_by_key(|c| c.starts_on)
}

// ── Tests ──────────────────────────────────────────────────────
