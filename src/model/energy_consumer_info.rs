use crate::model::{EnergyConsumerId, EnergyConsumerKind};
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct EnergyConsumerInfo {
    pub id: EnergyConsumerId,
    pub kind: EnergyConsumerKind,
    pub channel_ids: Vec<i32>,
    pub power_entity_id: Option<i32>,
}
