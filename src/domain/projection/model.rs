//! Projection result types and the period calculation

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::estimator::daily_rate;
use crate::domain::contract::{active_contract, PriceContract};
use crate::domain::reading::{EnergyType, MeterReading};

/// Consumption and cost outlook for one calendar period (month or year)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodOutlook {
    /// Measured consumption from the period start through the as-of date
    pub actual: f64,
    /// Extrapolated consumption for the remaining days
    pub projected: f64,
    /// `actual + projected`
    pub estimated_total: f64,
    /// Estimated cost; absent without an active contract
    pub estimated_cost: Option<f64>,
    /// Days left in the period, counting the as-of day
    pub days_remaining: i64,
}

impl PeriodOutlook {
    fn compute(
        readings: &[MeterReading],
        per_day: f64,
        period_start: NaiveDate,
        as_of: NaiveDate,
        days_remaining: i64,
        pricing: Option<(f64, f64)>,
    ) -> Self {
        let actual = actual_consumption(readings, period_start, as_of);
        let projected = per_day * days_remaining as f64;
        let estimated_total = actual + projected;
        let estimated_cost =
            pricing.map(|(base_fee, working_price)| base_fee + estimated_total * working_price);

        Self {
            actual,
            projected,
            estimated_total,
            estimated_cost,
            days_remaining,
        }
    }
}

/// Current-month and current-year projection for one energy type
///
/// Derived and never persisted: a pure function of the readings and
/// contracts as of a given date, so recomputation is idempotent and new
/// readings are reflected immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projection {
    pub energy_type: EnergyType,
    pub as_of: NaiveDate,
    /// Average daily consumption since tracking began
    pub daily_rate: f64,
    /// Extrapolated consumption for a whole year
    pub estimated_yearly_consumption: f64,
    pub month: PeriodOutlook,
    pub year: PeriodOutlook,
}

impl Projection {
    /// Calculate the projection from a consistent snapshot.
    ///
    /// Readings must be ordered by timestamp ascending. Without an active
    /// contract the cost fields are absent but consumption fields are still
    /// produced. Returns `None` with fewer than two readings.
    pub fn calculate(
        readings: &[MeterReading],
        contracts: &[PriceContract],
        as_of: NaiveDate,
    ) -> Option<Self> {
        let rate = daily_rate(readings)?;
        let energy_type = readings.first()?.energy_type;
        let contract = active_contract(contracts, as_of);

        let month_start = as_of.with_day(1).unwrap_or(as_of);
        let month_remaining = days_in_month(as_of) - i64::from(as_of.day()) + 1;
        let month = PeriodOutlook::compute(
            readings,
            rate.per_day,
            month_start,
            as_of,
            month_remaining,
            contract.map(|c| (c.monthly_base_fee(), c.working_price)),
        );

        let year_start = NaiveDate::from_ymd_opt(as_of.year(), 1, 1).unwrap_or(as_of);
        let year_remaining = days_in_year(as_of.year()) - i64::from(as_of.ordinal()) + 1;
        let year = PeriodOutlook::compute(
            readings,
            rate.per_day,
            year_start,
            as_of,
            year_remaining,
            contract.map(|c| (c.base_price, c.working_price)),
        );

        Some(Self {
            energy_type,
            as_of,
            daily_rate: rate.per_day,
            estimated_yearly_consumption: rate.yearly_estimate(),
            month,
            year,
        })
    }
}

/// Measured consumption from the period start through the as-of date.
///
/// Baseline is the latest reading at or before the period start; with
/// nothing that early, the earliest in-period reading. The endpoint is the
/// latest reading at or before the as-of date. Without two usable readings
/// the measured consumption is zero.
fn actual_consumption(readings: &[MeterReading], period_start: NaiveDate, as_of: NaiveDate) -> f64 {
    let last = match readings.iter().rev().find(|r| r.read_at.date_naive() <= as_of) {
        Some(last) => last,
        None => return 0.0,
    };

    let baseline = readings
        .iter()
        .rev()
        .find(|r| r.read_at.date_naive() <= period_start)
        .or_else(|| {
            readings
                .iter()
                .find(|r| r.read_at.date_naive() > period_start && r.read_at.date_naive() <= as_of)
        });

    match baseline {
        Some(baseline) => last.value - baseline.value,
        None => 0.0,
    }
}

fn days_in_month(date: NaiveDate) -> i64 {
    let start = date.with_day(1).unwrap_or(date);
    let next = if start.month() == 12 {
        NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
    };
    match next {
        Some(next) => (next - start).num_days(),
        None => 30,
    }
}

fn days_in_year(year: i32) -> i64 {
    NaiveDate::from_ymd_opt(year, 12, 31)
        .map(|d| i64::from(d.ordinal()))
        .unwrap_or(365)
}

// ── Tests ──────────────────────────────────────────────────────
