use crate::error::EnergyConsumerError;
use crate::model::*;
use crate::power_stats_client::PowerStatsClient;
use crate::resolver;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// An energy consumer whose consumption is represented as
/// `SUM_i(E_i) + SUM_j(C_j * T_j)`, where `E_i` is the energy of meter channel `i` in µWs,
/// `C_j` the coefficient of power state `j` in mW and `T_j` the time spent in state `j`
/// in ms. mW * ms is µWs, so both terms add up without scaling.
///
/// Consumers come in three varieties, each with its own factory:
/// 1. meter: at least one channel and no coefficients
/// 2. entity: no channels and at least one coefficient
/// 3. meter and entity: at least one channel and at least one coefficient
pub struct EnergyConsumer {
    id: EnergyConsumerId,
    power_stats_client: Arc<dyn PowerStatsClient>,
    channel_ids: Vec<i32>,
    power_entity_id: Option<i32>,
    coefficients: BTreeMap<i32, i32>,
}

struct Contribution {
    energy_uws: i64,
    measured_at_time: DateTime<Utc>,
}

impl EnergyConsumer {
    fn new(power_stats_client: Arc<dyn PowerStatsClient>, id: EnergyConsumerId) -> Self {
        Self {
            id,
            power_stats_client,
            channel_ids: vec![],
            power_entity_id: None,
            coefficients: BTreeMap::new(),
        }
    }

    pub fn create_meter_consumer(
        power_stats_client: Arc<dyn PowerStatsClient>,
        id: EnergyConsumerId,
        channel_names: &BTreeSet<String>,
    ) -> Option<Arc<Self>> {
        Self::log_failure(
            id,
            Self::try_create_meter_consumer(power_stats_client, id, channel_names),
        )
    }

    pub fn create_entity_consumer(
        power_stats_client: Arc<dyn PowerStatsClient>,
        id: EnergyConsumerId,
        power_entity_name: &str,
        state_coeffs: &BTreeMap<String, i32>,
    ) -> Option<Arc<Self>> {
        Self::log_failure(
            id,
            Self::try_create_entity_consumer(
                power_stats_client,
                id,
                power_entity_name,
                state_coeffs,
            ),
        )
    }

    pub fn create_meter_and_entity_consumer(
        power_stats_client: Arc<dyn PowerStatsClient>,
        id: EnergyConsumerId,
        channel_names: &BTreeSet<String>,
        power_entity_name: &str,
        state_coeffs: &BTreeMap<String, i32>,
    ) -> Option<Arc<Self>> {
        Self::log_failure(
            id,
            Self::try_create_meter_and_entity_consumer(
                power_stats_client,
                id,
                channel_names,
                power_entity_name,
                state_coeffs,
            ),
        )
    }

    pub fn try_create_meter_consumer(
        power_stats_client: Arc<dyn PowerStatsClient>,
        id: EnergyConsumerId,
        channel_names: &BTreeSet<String>,
    ) -> Result<Arc<Self>, EnergyConsumerError> {
        let mut energy_consumer = Self::new(power_stats_client, id);
        energy_consumer.add_energy_meter(channel_names)?;

        Ok(Arc::new(energy_consumer))
    }

    pub fn try_create_entity_consumer(
        power_stats_client: Arc<dyn PowerStatsClient>,
        id: EnergyConsumerId,
        power_entity_name: &str,
        state_coeffs: &BTreeMap<String, i32>,
    ) -> Result<Arc<Self>, EnergyConsumerError> {
        let mut energy_consumer = Self::new(power_stats_client, id);
        energy_consumer.add_power_entity(power_entity_name, state_coeffs)?;

        Ok(Arc::new(energy_consumer))
    }

    pub fn try_create_meter_and_entity_consumer(
        power_stats_client: Arc<dyn PowerStatsClient>,
        id: EnergyConsumerId,
        channel_names: &BTreeSet<String>,
        power_entity_name: &str,
        state_coeffs: &BTreeMap<String, i32>,
    ) -> Result<Arc<Self>, EnergyConsumerError> {
        let mut energy_consumer = Self::new(power_stats_client, id);
        energy_consumer.add_energy_meter(channel_names)?;
        energy_consumer.add_power_entity(power_entity_name, state_coeffs)?;

        Ok(Arc::new(energy_consumer))
    }

    /// Picks the factory matching the halves present in `config`.
    pub fn from_config(
        power_stats_client: Arc<dyn PowerStatsClient>,
        config: &EnergyConsumerConfig,
    ) -> Result<Arc<Self>, EnergyConsumerError> {
        let channel_names: BTreeSet<String> = config.channel_names.iter().cloned().collect();

        match (config.has_meter(), &config.power_entity_name) {
            (true, Some(power_entity_name)) if config.has_entity() => {
                Self::try_create_meter_and_entity_consumer(
                    power_stats_client,
                    config.id,
                    &channel_names,
                    power_entity_name,
                    &config.state_coefficients,
                )
            }
            (true, _) => {
                Self::try_create_meter_consumer(power_stats_client, config.id, &channel_names)
            }
            (false, Some(power_entity_name)) if config.has_entity() => {
                Self::try_create_entity_consumer(
                    power_stats_client,
                    config.id,
                    power_entity_name,
                    &config.state_coefficients,
                )
            }
            (false, _) => Err(EnergyConsumerError::EmptyConfiguration(config.id)),
        }
    }

    fn log_failure(
        id: EnergyConsumerId,
        result: Result<Arc<Self>, EnergyConsumerError>,
    ) -> Option<Arc<Self>> {
        match result {
            Ok(energy_consumer) => Some(energy_consumer),
            Err(e) => {
                warn!("Not creating energy consumer {:?}: {}", id, e);
                None
            }
        }
    }

    fn add_energy_meter(
        &mut self,
        channel_names: &BTreeSet<String>,
    ) -> Result<(), EnergyConsumerError> {
        if self.power_stats_client.get_energy_meter_info().is_empty() {
            return Err(EnergyConsumerError::NoEnergyMeterChannels);
        }

        let channel_ids = self.power_stats_client.resolve_channel_ids(channel_names);
        if channel_ids.is_empty() {
            return Err(EnergyConsumerError::NoChannelsResolved(
                channel_names.iter().cloned().collect(),
            ));
        }

        if channel_ids.len() < channel_names.len() {
            warn!(
                "Only {} of {} channels resolved for energy consumer {:?}",
                channel_ids.len(),
                channel_names.len(),
                self.id
            );
        }

        self.channel_ids = channel_ids;

        Ok(())
    }

    fn add_power_entity(
        &mut self,
        power_entity_name: &str,
        state_coeffs: &BTreeMap<String, i32>,
    ) -> Result<(), EnergyConsumerError> {
        let power_entity_id = self
            .power_stats_client
            .resolve_entity_id(power_entity_name)
            .ok_or_else(|| {
                EnergyConsumerError::UnknownPowerEntity(power_entity_name.to_string())
            })?;

        let state_names: BTreeSet<String> = state_coeffs.keys().cloned().collect();
        let state_ids = self
            .power_stats_client
            .resolve_state_ids(power_entity_id, &state_names);

        let coefficients =
            resolver::resolve_coefficients(power_entity_name, &state_ids, state_coeffs);
        if coefficients.is_empty() {
            return Err(EnergyConsumerError::NoStatesResolved(power_entity_name.to_string()));
        }

        self.power_entity_id = Some(power_entity_id);
        self.coefficients = coefficients;

        Ok(())
    }

    pub fn id(&self) -> EnergyConsumerId {
        self.id
    }

    pub fn kind(&self) -> EnergyConsumerKind {
        if self.coefficients.is_empty() {
            EnergyConsumerKind::Meter
        } else if self.channel_ids.is_empty() {
            EnergyConsumerKind::Entity
        } else {
            EnergyConsumerKind::MeterAndEntity
        }
    }

    pub fn channel_ids(&self) -> &[i32] {
        &self.channel_ids
    }

    pub fn power_entity_id(&self) -> Option<i32> {
        self.power_entity_id
    }

    /// State id to coefficient in mW.
    pub fn coefficients(&self) -> &BTreeMap<i32, i32> {
        &self.coefficients
    }

    pub fn info(&self) -> EnergyConsumerInfo {
        EnergyConsumerInfo {
            id: self.id,
            kind: self.kind(),
            channel_ids: self.channel_ids.clone(),
            power_entity_id: self.power_entity_id,
        }
    }

    /// Returns the energy consumed so far, or `None` when none of the configured sources
    /// produced any data. A source that fails while another succeeds is counted as zero
    /// and flags the result as degraded.
    pub fn get_energy_consumed(&self) -> Option<EnergyConsumerResult> {
        let meter = if self.channel_ids.is_empty() {
            None
        } else {
            Some(self.read_meter_contribution())
        };

        let entity = self
            .power_entity_id
            .map(|power_entity_id| self.read_entity_contribution(power_entity_id));

        let degraded = matches!(meter, Some(None)) || matches!(entity, Some(None));

        let (meter, entity) = (meter.flatten(), entity.flatten());

        let measured_at_time = match (&meter, &entity) {
            (Some(m), _) => m.measured_at_time,
            (None, Some(e)) => e.measured_at_time,
            (None, None) => {
                warn!("No energy data available for energy consumer {:?}", self.id);
                return None;
            }
        };

        let energy_uws = meter
            .iter()
            .chain(entity.iter())
            .fold(0_i64, |total, c| total.saturating_add(c.energy_uws));

        if degraded {
            warn!(
                "Energy consumed by {:?} is based on partial data: {} µWs",
                self.id, energy_uws
            );
        }

        Some(EnergyConsumerResult {
            id: self.id,
            energy_uws,
            measured_at_time,
            degraded,
        })
    }

    fn read_meter_contribution(&self) -> Option<Contribution> {
        let snapshot = match self.power_stats_client.read_energy_meter(&self.channel_ids) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Failed to read energy meter for {:?}: {}", self.id, e);
                return None;
            }
        };

        // a channel listed more than once counts with its last reported value
        let energy_by_channel: BTreeMap<i32, i64> = snapshot
            .measurements
            .iter()
            .filter(|m| self.channel_ids.contains(&m.id))
            .map(|m| (m.id, m.energy_uws))
            .collect();

        if energy_by_channel.is_empty() {
            warn!("Energy meter returned no data for {:?}", self.id);
            return None;
        }

        if energy_by_channel.len() < self.channel_ids.len() {
            debug!(
                "Energy meter returned {} of {} channels for {:?}; missing channels count as 0",
                energy_by_channel.len(),
                self.channel_ids.len(),
                self.id
            );
        }

        let energy_uws = energy_by_channel
            .values()
            .fold(0_i64, |total, e| total.saturating_add(*e));

        Some(Contribution {
            energy_uws,
            measured_at_time: snapshot.measured_at_time,
        })
    }

    fn read_entity_contribution(&self, power_entity_id: i32) -> Option<Contribution> {
        let snapshot = match self.power_stats_client.get_state_residency(power_entity_id) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Failed to get state residency for {:?}: {}", self.id, e);
                return None;
            }
        };

        if snapshot.power_entity_id != power_entity_id || snapshot.state_residency_data.is_empty() {
            warn!(
                "State residency of power entity {} returned no data for {:?}",
                power_entity_id, self.id
            );
            return None;
        }

        // states without a coefficient cost nothing
        let energy_uws = snapshot
            .state_residency_data
            .iter()
            .filter_map(|s| {
                let coefficient = i64::from(*self.coefficients.get(&s.id)?);
                Some(coefficient.saturating_mul(s.total_time_in_state_ms))
            })
            .fold(0_i64, |total, e| total.saturating_add(e));

        debug!(
            "Power entity {} contributes {} µWs to {:?}",
            power_entity_id, energy_uws, self.id
        );

        Some(Contribution {
            energy_uws,
            measured_at_time: snapshot.measured_at_time,
        })
    }
}

impl fmt::Debug for EnergyConsumer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnergyConsumer")
            .field("id", &self.id)
            .field("channel_ids", &self.channel_ids)
            .field("power_entity_id", &self.power_entity_id)
            .field("coefficients", &self.coefficients)
            .finish()
    }
}
