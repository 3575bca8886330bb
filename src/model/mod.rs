mod channel;
mod energy_consumer_config;
mod energy_consumer_id;
mod energy_consumer_info;
mod energy_consumer_kind;
mod energy_consumer_result;
mod energy_measurement;
mod power_entity;
mod state_residency;

pub use crate::model::channel::Channel;
pub use crate::model::energy_consumer_config::{EnergyConsumerConfig, EnergyConsumersConfig};
pub use crate::model::energy_consumer_id::EnergyConsumerId;
pub use crate::model::energy_consumer_info::EnergyConsumerInfo;
pub use crate::model::energy_consumer_kind::EnergyConsumerKind;
pub use crate::model::energy_consumer_result::EnergyConsumerResult;
pub use crate::model::energy_measurement::{EnergyMeasurement, EnergyMeterSnapshot};
pub use crate::model::power_entity::{PowerEntity, State};
pub use crate::model::state_residency::{StateResidency, StateResidencySnapshot};

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config_client::SetDefaults;
  use chrono::{DateTime, Utc};
  use pretty_assertions::assert_eq;
  use serde_json;
  use serde_yaml;

  #[test]
  fn to_json() {
    assert_eq!(
      serde_json::to_string_pretty(&EnergyConsumerResult{
        id: EnergyConsumerId::Display,
        energy_uws: 3000,
        measured_at_time: DateTime::parse_from_rfc3339("2021-05-01T05:45:03.043614293Z").unwrap().with_timezone(&Utc),
        degraded: false,
      })
      .unwrap(),
      r#"{
  "Id": "ENERGY_CONSUMER_DISPLAY",
  "EnergyUws": 3000,
  "MeasuredAtTime": "2021-05-01T05:45:03.043614293Z",
  "Degraded": false
}"#
    );
  }

  #[test]
  fn from_json() {
    let result = serde_json::from_str::<EnergyConsumerResult>(
      r#"{
  "Id": "ENERGY_CONSUMER_MOBILE_RADIO",
  "EnergyUws": 9695872800,
  "MeasuredAtTime": "2021-05-01T05:45:03.043614293Z",
  "Degraded": true
}"#
    )
    .unwrap();

    assert_eq!(result.id, EnergyConsumerId::MobileRadio);
    assert_eq!(result.energy_uws, 9695872800);
    assert_eq!(result.measured_at_time, DateTime::parse_from_rfc3339("2021-05-01T05:45:03.043614293Z").unwrap().with_timezone(&Utc));
    assert_eq!(result.degraded, true);
  }

  #[test]
  fn to_yaml() {
    assert_eq!(
      serde_yaml::to_string(&Channel{
        id: 3,
        name: "S6M_LLDO1".into(),
        subsystem: "Display".into(),
      })
      .unwrap(),
      r#"Id: 3
Name: S6M_LLDO1
Subsystem: Display
"#
    );
  }

  #[test]
  fn from_yaml() {
    let mut config = serde_yaml::from_str::<EnergyConsumersConfig>(
      r#"
energyConsumers:
- id: ENERGY_CONSUMER_DISPLAY
  channelNames:
  - " S6M_LLDO1 "
  - ""
  powerEntityName: ""
- id: ENERGY_CONSUMER_MOBILE_RADIO
  powerEntityName: modem
  stateCoefficients:
    sleep: 0
    active: 150
"#
    )
    .unwrap();

    config.set_defaults();

    assert_eq!(config.energy_consumers.len(), 2);

    let display = &config.energy_consumers[0];
    assert_eq!(display.id, EnergyConsumerId::Display);
    assert_eq!(display.channel_names, vec!["S6M_LLDO1".to_string()]);
    assert_eq!(display.power_entity_name, None);
    assert!(display.has_meter());
    assert!(!display.has_entity());

    let modem = &config.energy_consumers[1];
    assert_eq!(modem.id, EnergyConsumerId::MobileRadio);
    assert!(modem.channel_names.is_empty());
    assert_eq!(modem.power_entity_name, Some("modem".to_string()));
    assert_eq!(modem.state_coefficients.get("active"), Some(&150));
    assert!(!modem.has_meter());
    assert!(modem.has_entity());
  }
}
