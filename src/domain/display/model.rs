//! Cached display data domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::reading::EnergyType;

/// Kind of precomputed display payload.
///
/// The energy type is folded into the kind, so the cache stays unique per
/// (user, kind) with no separate filter index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayKind {
    /// Dashboard projection card for one energy type
    ProjectionSummary(EnergyType),
    /// Month-bucketed consumption series for charts
    ConsumptionHistory(EnergyType),
}

impl std::fmt::Display for DisplayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProjectionSummary(t) => write!(f, "projection_summary:{}", t),
            Self::ConsumptionHistory(t) => write!(f, "consumption_history:{}", t),
        }
    }
}

/// A cached, precomputed payload for one UI view
///
/// Served as-is while `source_hash` still matches the underlying data;
/// otherwise recomputed and overwritten in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedDisplayData {
    pub user_id: Uuid,
    pub kind: DisplayKind,
    /// Opaque computed payload
    pub payload: serde_json::Value,
    pub calculated_at: DateTime<Utc>,
    /// Hex SHA-256 of the source readings/contracts
    pub source_hash: String,
}

// ── Tests ──────────────────────────────────────────────────────
