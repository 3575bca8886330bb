use crate::model::EnergyConsumerId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PowerStatsError {
    #[error("Failed to read energy meter: {0}")]
    EnergyMeterReadFailed(String),
    #[error("State residency unavailable for power entity {0}")]
    StateResidencyUnavailable(i32),
    #[error("Unknown energy meter channel {0}")]
    UnknownChannel(i32),
    #[error("Unknown power entity {0}")]
    UnknownPowerEntity(i32),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnergyConsumerError {
    #[error("No energy meter channels are configured")]
    NoEnergyMeterChannels,
    #[error("None of the channels {0:?} could be resolved")]
    NoChannelsResolved(Vec<String>),
    #[error("Power entity {0} could not be resolved")]
    UnknownPowerEntity(String),
    #[error("None of the states of power entity {0} could be resolved")]
    NoStatesResolved(String),
    #[error("Energy consumer {0:?} has neither channels nor state coefficients configured")]
    EmptyConfiguration(EnergyConsumerId),
    #[error("Energy consumer {0:?} is already registered")]
    DuplicateEnergyConsumer(EnergyConsumerId),
    #[error("Unknown energy consumer {0:?}")]
    UnknownEnergyConsumer(EnergyConsumerId),
}
