use serde::de::DeserializeOwned;
use serde_yaml;
use std::env;
use std::error::Error;
use std::fs;
use tracing::{debug, info};

pub trait SetDefaults {
    fn set_defaults(&mut self);
}

pub struct ConfigClientConfig {
    config_path: String,
}

impl ConfigClientConfig {
    pub fn new(config_path: String) -> Result<Self, Box<dyn Error>> {
        debug!("ConfigClientConfig::new(config_path: {})", config_path);
        Ok(Self { config_path })
    }

    pub fn from_env() -> Result<Self, Box<dyn Error>> {
        let config_path = env::var("CONFIG_PATH")
            .unwrap_or_else(|_| "/configs/energy-consumers.yaml".to_string());

        Self::new(config_path)
    }
}

pub struct ConfigClient {
    config: ConfigClientConfig,
}

impl ConfigClient {
    pub fn new(config: ConfigClientConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Result<Self, Box<dyn Error>> {
        Ok(Self::new(ConfigClientConfig::from_env()?))
    }

    pub fn read_config_from_file<T>(&self) -> Result<T, Box<dyn Error>>
    where
        T: DeserializeOwned + SetDefaults,
    {
        let config_file_contents = fs::read_to_string(&self.config.config_path)?;
        let mut config: T = serde_yaml::from_str(&config_file_contents)?;

        config.set_defaults();

        info!("Loaded config from {}", &self.config.config_path);

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EnergyConsumerId, EnergyConsumersConfig};
    use assert2::{check, let_assert};

    #[test]
    fn read_config_from_file_returns_deserialized_test_file() {
        let_assert!(Ok(config) = ConfigClientConfig::new("test-config.yaml".to_string()));
        let config_client = ConfigClient::new(config);

        let_assert!(
            Ok(EnergyConsumersConfig { energy_consumers }) = config_client.read_config_from_file()
        );

        let_assert!([display, modem, gnss, camera] = energy_consumers.as_slice());

        check!(display.id == EnergyConsumerId::Display);
        check!(display.channel_names == ["S6M_LLDO1", "S8S_VDD_G3D_L2"]);
        check!(display.power_entity_name.is_none());

        check!(modem.id == EnergyConsumerId::MobileRadio);
        check!(modem.channel_names == vec!["VSYS_PWR_MODEM".to_string()]);
        check!(modem.power_entity_name == Some("modem".to_string()));
        check!(modem.state_coefficients.get("active") == Some(&150));
        check!(modem.state_coefficients.get("sleep") == Some(&1));

        check!(gnss.id == EnergyConsumerId::Gnss);
        check!(gnss.channel_names.is_empty());
        check!(gnss.power_entity_name == Some("gnss".to_string()));

        check!(camera.id == EnergyConsumerId::Camera);
        check!(camera.channel_names == vec!["L11S_VDD_CAM".to_string()]);
    }

    #[test]
    fn read_config_from_file_fails_for_missing_file() {
        let_assert!(Ok(config) = ConfigClientConfig::new("does-not-exist.yaml".to_string()));
        let config_client = ConfigClient::new(config);

        let_assert!(Err(_) = config_client.read_config_from_file::<EnergyConsumersConfig>());
    }
}
