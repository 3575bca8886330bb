use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct StateResidency {
    pub id: i32,
    pub total_time_in_state_ms: i64,
    pub total_state_entry_count: i64,
    pub last_entry_timestamp_ms: i64,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct StateResidencySnapshot {
    pub power_entity_id: i32,
    pub state_residency_data: Vec<StateResidency>,
    pub measured_at_time: DateTime<Utc>,
}
