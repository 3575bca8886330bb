use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Debug)]
pub enum EnergyConsumerId {
    #[serde(rename = "ENERGY_CONSUMER_DISPLAY")]
    Display,
    #[serde(rename = "ENERGY_CONSUMER_GNSS")]
    Gnss,
    #[serde(rename = "ENERGY_CONSUMER_MOBILE_RADIO")]
    MobileRadio,
    #[serde(rename = "ENERGY_CONSUMER_WIFI")]
    Wifi,
    #[serde(rename = "ENERGY_CONSUMER_BLUETOOTH")]
    Bluetooth,
    #[serde(rename = "ENERGY_CONSUMER_CPU_CLUSTER")]
    CpuCluster,
    #[serde(rename = "ENERGY_CONSUMER_CAMERA")]
    Camera,
    #[serde(rename = "ENERGY_CONSUMER_GPU")]
    Gpu,
    #[serde(rename = "ENERGY_CONSUMER_OTHER")]
    Other,
}
