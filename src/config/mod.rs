
use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    bus::i2c::DEFAULT_BUS,
    drivers::mpu6050::{self, info::SensorScale},
    filter::FilterConfig,
    motion::IntegrationMode,
};

/// Represents all possible errors loading a [SensorConfig]
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Could not read: {0}")]
    IoError(#[from] io::Error),
    #[error("Unable to deserialize: {0}")]
    DeserializeError(#[from] serde_yaml::Error),
    #[error("Invalid filter configuration: {0}")]
    InvalidFilter(String),
}

/// Initialization time configuration for a motion sensor session
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "snake_case", default)]
pub struct SensorConfig {
    /// Path to the bus device
    pub bus: String,
    /// 7-bit peripheral address
    pub address: u16,
    /// Delay between refreshes in the polling loop
    pub poll_interval_ms: u64,
    /// Delay between state reports
    pub report_interval_ms: u64,
    pub integration: IntegrationMode,
    pub scale: SensorScale,
    pub accel_filter: FilterConfig,
    pub gyro_filter: FilterConfig,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            bus: DEFAULT_BUS.to_string(),
            address: mpu6050::ADDRESS,
            poll_interval_ms: 10,
            report_interval_ms: 1000,
            integration: IntegrationMode::default(),
            scale: SensorScale::default(),
            accel_filter: FilterConfig::default(),
            gyro_filter: FilterConfig::default(),
        }
    }
}

impl SensorConfig {
    /// Load a [SensorConfig] from the given YAML string
    pub fn from_yaml(content: String) -> Result<SensorConfig, LoadError> {
        let config: SensorConfig = serde_yaml::from_str(content.as_str())?;
        config.validate()?;
        Ok(config)
    }

    /// Load a [SensorConfig] from the given YAML file
    pub fn from_yaml_file(path: String) -> Result<SensorConfig, LoadError> {
        let file = std::fs::File::open(path)?;
        let config: SensorConfig = serde_yaml::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the filter parameters for both banks
    pub fn validate(&self) -> Result<(), LoadError> {
        self.accel_filter
            .validate()
            .map_err(|e| LoadError::InvalidFilter(format!("accel_filter: {e}")))?;
        self.gyro_filter
            .validate()
            .map_err(|e| LoadError::InvalidFilter(format!("gyro_filter: {e}")))?;
        Ok(())
    }
}
