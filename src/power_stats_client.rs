use crate::error::PowerStatsError;
use crate::model::{Channel, EnergyMeterSnapshot, PowerEntity, StateResidencySnapshot};
use crate::resolver;
use std::collections::{BTreeMap, BTreeSet};

/// Read access to the energy meters and power entity state residency counters of a device.
///
/// Every call blocks until the registry returns a complete snapshot or fails.
pub trait PowerStatsClient: Send + Sync {
    fn get_energy_meter_info(&self) -> Vec<Channel>;

    fn get_power_entity_info(&self) -> Vec<PowerEntity>;

    fn read_energy_meter(
        &self,
        channel_ids: &[i32],
    ) -> Result<EnergyMeterSnapshot, PowerStatsError>;

    fn get_state_residency(
        &self,
        power_entity_id: i32,
    ) -> Result<StateResidencySnapshot, PowerStatsError>;

    fn resolve_channel_ids(&self, names: &BTreeSet<String>) -> Vec<i32> {
        resolver::resolve_channel_ids(&self.get_energy_meter_info(), names)
    }

    fn resolve_entity_id(&self, name: &str) -> Option<i32> {
        resolver::resolve_entity_id(&self.get_power_entity_info(), name)
    }

    fn resolve_state_ids(
        &self,
        power_entity_id: i32,
        names: &BTreeSet<String>,
    ) -> BTreeMap<String, i32> {
        self.get_power_entity_info()
            .iter()
            .find(|power_entity| power_entity.id == power_entity_id)
            .map(|power_entity| resolver::resolve_state_ids(power_entity, names))
            .unwrap_or_default()
    }
}
