pub mod config_client;
pub mod energy_consumer;
pub mod energy_consumer_service;
pub mod error;
pub mod model;
pub mod power_stats_client;
pub mod resolver;
pub mod static_power_stats_client;
