//! Consumption-rate estimation over the tracked reading history

use crate::domain::reading::MeterReading;

/// Days per year used for yearly extrapolation
const DAYS_PER_YEAR: f64 = 365.0;

/// Average daily consumption derived from the reading history
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyRate {
    /// Units consumed per day
    pub per_day: f64,
    /// Elapsed days between the first and last reading, floored at 1
    pub elapsed_days: i64,
    /// Units consumed between the first and last reading
    pub total_consumed: f64,
}

impl DailyRate {
    /// Extrapolated consumption for a whole year
    pub fn yearly_estimate(&self) -> f64 {
        self.per_day * DAYS_PER_YEAR
    }
}

/// Compute the global daily rate from the full reading history.
///
/// The rate spans the first and last reading since tracking began, so every
/// new reading shifts the average; intermediate readings carry no extra
/// weight. Day spans below 1 (same-day or out-of-order timestamps) are
/// floored at 1.
///
/// Readings must be ordered by timestamp ascending. Returns `None` with
/// fewer than two readings.
pub fn daily_rate(readings: &[MeterReading]) -> Option<DailyRate> {
    if readings.len() < 2 {
        return None;
    }
    let (first, last) = match (readings.first(), readings.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return None,
    };

    let elapsed_days = (last.read_at - first.read_at).num_days().max(1);
    let total_consumed = last.value - first.value;

    Some(DailyRate {
        per_day: total_consumed / elapsed_days as f64,
        elapsed_days,
        total_consumed,
    })
}

// ── Tests ──────────────────────────────────────────────────────
