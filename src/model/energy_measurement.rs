use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cumulative energy of one meter channel, in microwatt-seconds.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct EnergyMeasurement {
    pub id: i32,
    pub energy_uws: i64,
    pub duration_ms: i64,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct EnergyMeterSnapshot {
    pub measurements: Vec<EnergyMeasurement>,
    pub measured_at_time: DateTime<Utc>,
}
