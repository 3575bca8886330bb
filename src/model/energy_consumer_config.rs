use crate::config_client::SetDefaults;
use crate::model::EnergyConsumerId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EnergyConsumerConfig {
    pub id: EnergyConsumerId,
    #[serde(default)]
    pub channel_names: Vec<String>,
    pub power_entity_name: Option<String>,
    #[serde(default)]
    pub state_coefficients: BTreeMap<String, i32>,
}

impl EnergyConsumerConfig {
    pub fn has_meter(&self) -> bool {
        !self.channel_names.is_empty()
    }

    pub fn has_entity(&self) -> bool {
        self.power_entity_name.is_some() && !self.state_coefficients.is_empty()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EnergyConsumersConfig {
    pub energy_consumers: Vec<EnergyConsumerConfig>,
}

impl SetDefaults for EnergyConsumersConfig {
    fn set_defaults(&mut self) {
        for energy_consumer in self.energy_consumers.iter_mut() {
            energy_consumer.channel_names = energy_consumer
                .channel_names
                .iter()
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect();

            if let Some(name) = &energy_consumer.power_entity_name {
                if name.trim().is_empty() {
                    energy_consumer.power_entity_name = None;
                }
            }
        }
    }
}
