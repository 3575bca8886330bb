use serde::{Deserialize, Serialize};

/// Which data sources an energy consumer combines.
#[derive(Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub enum EnergyConsumerKind {
    #[serde(rename = "ENERGY_CONSUMER_KIND_METER")]
    Meter,
    #[serde(rename = "ENERGY_CONSUMER_KIND_ENTITY")]
    Entity,
    #[serde(rename = "ENERGY_CONSUMER_KIND_METER_AND_ENTITY")]
    MeterAndEntity,
}
