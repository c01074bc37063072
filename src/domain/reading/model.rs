//! Meter reading domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tracked energy type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyType {
    /// Electric power, metered in kWh
    Power,
    /// Natural gas, metered in m³
    Gas,
}

impl EnergyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Power => "power",
            Self::Gas => "gas",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "power" => Some(Self::Power),
            "gas" => Some(Self::Gas),
            _ => None,
        }
    }
}

impl std::fmt::Display for EnergyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A timestamped cumulative meter value
///
/// Values are non-decreasing by convention but not enforced; readings are
/// immutable once written and only ever deleted explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeterReading {
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    pub energy_type: EnergyType,
    /// When the meter was read
    pub read_at: DateTime<Utc>,
    /// Cumulative meter value (kWh for power, m³ for gas)
    pub value: f64,
}

impl MeterReading {
    pub fn new(user_id: Uuid, energy_type: EnergyType, read_at: DateTime<Utc>, value: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            energy_type,
            read_at,
            value,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_type_display() {
        assert_eq!(EnergyType::Power.to_string(), "power");
        assert_eq!(EnergyType::Gas.to_string(), "gas");
    }

    #[test]
    fn energy_type_from_str() {
        assert_eq!(EnergyType::from_str("power"), Some(EnergyType::Power));
        assert_eq!(EnergyType::from_str("gas"), Some(EnergyType::Gas));
        assert_eq!(EnergyType::from_str("water"), None);
    }

    #[test]
    fn new_reading_gets_unique_id() {
        let user = Uuid::new_v4();
        let a = MeterReading::new(user, EnergyType::Power, Utc::now(), 1000.0);
        let b = MeterReading::new(user, EnergyType::Power, Utc::now(), 1010.0);
        assert_ne!(a.id, b.id);
    }
}
