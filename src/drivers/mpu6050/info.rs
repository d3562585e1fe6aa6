use std::fmt;

use serde::{Deserialize, Serialize};

/// Sensitivity used to turn raw 16-bit counts into real units. The defaults
/// match the factory ranges of ±2 g and ±250 deg/s.
///   acceleration = raw / accel_lsb_per_g * gravity
///   angular_rate = raw / gyro_lsb_per_dps
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case", default)]
pub struct SensorScale {
    pub accel_lsb_per_g: f64,
    pub gravity: f64,
    pub gyro_lsb_per_dps: f64,
}

impl Default for SensorScale {
    fn default() -> Self {
        Self {
            accel_lsb_per_g: 16384.0,
            gravity: 9.81,
            gyro_lsb_per_dps: 131.0,
        }
    }
}

impl SensorScale {
    /// Convert a raw accelerometer count into m/s²
    pub fn acceleration(&self, raw: i16) -> f64 {
        (raw as f64 / self.accel_lsb_per_g) * self.gravity
    }

    /// Convert a raw gyroscope count into deg/s
    pub fn angular_rate(&self, raw: i16) -> f64 {
        raw as f64 / self.gyro_lsb_per_dps
    }
}

impl fmt::Display for SensorScale {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "accel: {} LSB/g (g = {}), gyro: {} LSB/(deg/s)",
            self.accel_lsb_per_g, self.gravity, self.gyro_lsb_per_dps
        )
    }
}
