use crate::config_client::ConfigClient;
use crate::energy_consumer::EnergyConsumer;
use crate::error::EnergyConsumerError;
use crate::model::*;
use crate::power_stats_client::PowerStatsClient;
use std::collections::BTreeMap;
use std::error::Error;
use std::sync::Arc;
use tracing::{info, warn};

pub struct EnergyConsumerServiceConfig {
    config_client: ConfigClient,
    power_stats_client: Arc<dyn PowerStatsClient>,
}

impl EnergyConsumerServiceConfig {
    pub fn new(
        config_client: ConfigClient,
        power_stats_client: Arc<dyn PowerStatsClient>,
    ) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            config_client,
            power_stats_client,
        })
    }
}

/// Energy consumers addressed by id.
#[derive(Default, Debug)]
pub struct EnergyConsumerService {
    energy_consumers: BTreeMap<EnergyConsumerId, Arc<EnergyConsumer>>,
}

impl EnergyConsumerService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds every consumer listed in the config file; consumers that fail validation or
    /// repeat an id already registered are logged and left out.
    pub fn from_config(config: EnergyConsumerServiceConfig) -> Result<Self, Box<dyn Error>> {
        let energy_consumers_config: EnergyConsumersConfig =
            config.config_client.read_config_from_file()?;

        let mut service = Self::new();

        for energy_consumer_config in &energy_consumers_config.energy_consumers {
            let id = energy_consumer_config.id;
            let power_stats_client = config.power_stats_client.clone();

            let result = EnergyConsumer::from_config(power_stats_client, energy_consumer_config)
                .and_then(|energy_consumer| service.add_energy_consumer(energy_consumer));

            if let Err(e) = result {
                warn!("Skipping energy consumer {:?}: {}", id, e);
            }
        }

        info!(
            "Registered {} of {} configured energy consumers",
            service.energy_consumers.len(),
            energy_consumers_config.energy_consumers.len()
        );

        Ok(service)
    }

    pub fn add_energy_consumer(
        &mut self,
        energy_consumer: Arc<EnergyConsumer>,
    ) -> Result<(), EnergyConsumerError> {
        let id = energy_consumer.id();
        if self.energy_consumers.contains_key(&id) {
            return Err(EnergyConsumerError::DuplicateEnergyConsumer(id));
        }

        self.energy_consumers.insert(id, energy_consumer);

        Ok(())
    }

    pub fn get_energy_consumer(&self, id: EnergyConsumerId) -> Option<Arc<EnergyConsumer>> {
        self.energy_consumers.get(&id).cloned()
    }

    pub fn get_energy_consumer_info(&self) -> Vec<EnergyConsumerInfo> {
        self.energy_consumers
            .values()
            .map(|energy_consumer| energy_consumer.info())
            .collect()
    }

    /// Returns the energy consumed by the consumers in `ids`, or by all consumers when `ids`
    /// is empty. Consumers without available data are left out of the result.
    pub fn get_energy_consumed(
        &self,
        ids: &[EnergyConsumerId],
    ) -> Result<Vec<EnergyConsumerResult>, EnergyConsumerError> {
        let energy_consumers: Vec<&Arc<EnergyConsumer>> = if ids.is_empty() {
            self.energy_consumers.values().collect()
        } else {
            ids.iter()
                .map(|id| {
                    self.energy_consumers
                        .get(id)
                        .ok_or(EnergyConsumerError::UnknownEnergyConsumer(*id))
                })
                .collect::<Result<_, _>>()?
        };

        Ok(energy_consumers
            .into_iter()
            .filter_map(|energy_consumer| energy_consumer.get_energy_consumed())
            .collect())
    }
}
