use crate::model::EnergyConsumerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Energy attributed to one consumer at the time the underlying samples were taken.
///
/// `degraded` is set when one of the configured data sources could not be read
/// and was counted as zero.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct EnergyConsumerResult {
    pub id: EnergyConsumerId,
    pub energy_uws: i64,
    pub measured_at_time: DateTime<Utc>,
    pub degraded: bool,
}
