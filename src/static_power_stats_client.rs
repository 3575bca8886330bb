use crate::error::PowerStatsError;
use crate::model::*;
use crate::power_stats_client::PowerStatsClient;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::RwLock;
use tracing::debug;

struct Readings {
    energy_uws: BTreeMap<i32, i64>,
    time_in_state_ms: BTreeMap<i32, BTreeMap<i32, i64>>,
    energy_meter_measured_at_time: DateTime<Utc>,
    state_residency_measured_at_time: DateTime<Utc>,
    energy_meter_failing: bool,
    state_residency_failing: bool,
}

/// In-memory registry holding fixed channel and power entity info and counter values that
/// can be updated between reads.
pub struct StaticPowerStatsClient {
    channels: Vec<Channel>,
    power_entities: Vec<PowerEntity>,
    readings: RwLock<Readings>,
}

impl StaticPowerStatsClient {
    pub fn new(channels: Vec<Channel>, power_entities: Vec<PowerEntity>) -> Self {
        debug!(
            "StaticPowerStatsClient::new(channels: {}, power_entities: {})",
            channels.len(),
            power_entities.len()
        );

        let now = Utc::now();

        Self {
            channels,
            power_entities,
            readings: RwLock::new(Readings {
                energy_uws: BTreeMap::new(),
                time_in_state_ms: BTreeMap::new(),
                energy_meter_measured_at_time: now,
                state_residency_measured_at_time: now,
                energy_meter_failing: false,
                state_residency_failing: false,
            }),
        }
    }

    pub fn set_energy(&self, channel_id: i32, energy_uws: i64) {
        let mut readings = self.readings.write().unwrap_or_else(|e| e.into_inner());
        readings.energy_uws.insert(channel_id, energy_uws);
    }

    pub fn set_time_in_state(&self, power_entity_id: i32, state_id: i32, time_in_state_ms: i64) {
        let mut readings = self.readings.write().unwrap_or_else(|e| e.into_inner());
        readings
            .time_in_state_ms
            .entry(power_entity_id)
            .or_default()
            .insert(state_id, time_in_state_ms);
    }

    pub fn set_energy_meter_measured_at_time(&self, measured_at_time: DateTime<Utc>) {
        let mut readings = self.readings.write().unwrap_or_else(|e| e.into_inner());
        readings.energy_meter_measured_at_time = measured_at_time;
    }

    pub fn set_state_residency_measured_at_time(&self, measured_at_time: DateTime<Utc>) {
        let mut readings = self.readings.write().unwrap_or_else(|e| e.into_inner());
        readings.state_residency_measured_at_time = measured_at_time;
    }

    /// Makes every following energy meter read fail until reset.
    pub fn set_energy_meter_failing(&self, failing: bool) {
        let mut readings = self.readings.write().unwrap_or_else(|e| e.into_inner());
        readings.energy_meter_failing = failing;
    }

    /// Makes every following state residency read fail until reset.
    pub fn set_state_residency_failing(&self, failing: bool) {
        let mut readings = self.readings.write().unwrap_or_else(|e| e.into_inner());
        readings.state_residency_failing = failing;
    }
}

impl PowerStatsClient for StaticPowerStatsClient {
    fn get_energy_meter_info(&self) -> Vec<Channel> {
        self.channels.clone()
    }

    fn get_power_entity_info(&self) -> Vec<PowerEntity> {
        self.power_entities.clone()
    }

    fn read_energy_meter(
        &self,
        channel_ids: &[i32],
    ) -> Result<EnergyMeterSnapshot, PowerStatsError> {
        let readings = self.readings.read().unwrap_or_else(|e| e.into_inner());

        if readings.energy_meter_failing {
            return Err(PowerStatsError::EnergyMeterReadFailed(
                "energy meter is not responding".to_string(),
            ));
        }

        if let Some(unknown) = channel_ids
            .iter()
            .find(|id| !self.channels.iter().any(|channel| channel.id == **id))
        {
            return Err(PowerStatsError::UnknownChannel(*unknown));
        }

        // channels without a recorded value are left out of the snapshot
        let measurements = channel_ids
            .iter()
            .filter_map(|id| {
                let energy_uws = *readings.energy_uws.get(id)?;
                Some(EnergyMeasurement {
                    id: *id,
                    energy_uws,
                    duration_ms: 0,
                })
            })
            .collect();

        Ok(EnergyMeterSnapshot {
            measurements,
            measured_at_time: readings.energy_meter_measured_at_time,
        })
    }

    fn get_state_residency(
        &self,
        power_entity_id: i32,
    ) -> Result<StateResidencySnapshot, PowerStatsError> {
        let readings = self.readings.read().unwrap_or_else(|e| e.into_inner());

        if !self
            .power_entities
            .iter()
            .any(|power_entity| power_entity.id == power_entity_id)
        {
            return Err(PowerStatsError::UnknownPowerEntity(power_entity_id));
        }

        if readings.state_residency_failing {
            return Err(PowerStatsError::StateResidencyUnavailable(power_entity_id));
        }

        let state_residency_data = readings
            .time_in_state_ms
            .get(&power_entity_id)
            .map(|states| {
                states
                    .iter()
                    .map(|(state_id, time_in_state_ms)| StateResidency {
                        id: *state_id,
                        total_time_in_state_ms: *time_in_state_ms,
                        total_state_entry_count: 0,
                        last_entry_timestamp_ms: 0,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(StateResidencySnapshot {
            power_entity_id,
            state_residency_data,
            measured_at_time: readings.state_residency_measured_at_time,
        })
    }
}
