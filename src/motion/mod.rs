pub mod clock;
pub mod sensor;
pub mod state;


use std::fmt;

use serde::{Deserialize, Serialize};

/// AxisData represents a sample on each of the (x, y, z) axes
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct AxisData {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl AxisData {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for AxisData {
    fn from(value: [f64; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

impl fmt::Display for AxisData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.4}, {:.4}, {:.4}", self.x, self.y, self.z)
    }
}

/// Orientation in degrees derived from the gravity vector.
///
/// Yaw cannot be observed with an accelerometer alone, so it is always
/// `None` here rather than a number that looks measured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Orientation {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: Option<f64>,
}

impl Orientation {
    /// Flatten into `[roll, pitch, yaw]`, with an undetermined yaw as `0.0`
    pub fn to_array(self) -> [f64; 3] {
        [self.roll, self.pitch, self.yaw.unwrap_or(0.0)]
    }
}

/// Which acceleration sample velocity integration uses on each refresh
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationMode {
    /// Integrate the acceleration from before the refresh over the elapsed
    /// time since the previous sample. This lags by one sample.
    #[default]
    PreviousSample,
    /// Integrate the freshly filtered acceleration instead
    CurrentSample,
}

/// A consistent copy of every estimated quantity, taken under one lock
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct MotionSnapshot {
    /// Smoothed acceleration in m/s²
    pub acceleration: AxisData,
    /// Smoothed angular rate in deg/s
    pub angular_rate: AxisData,
    pub orientation: Orientation,
    /// Integrated velocity in m/s
    pub velocity: AxisData,
    /// Seconds between the two most recent samples
    pub delta_time: f64,
}
