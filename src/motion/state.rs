use std::{f64::consts::PI, time::Instant};

use super::{AxisData, IntegrationMode, MotionSnapshot, Orientation};

/// Filtered motion state with one sample of history.
///
/// `previous_*` always hold what `current_*` held right before the latest
/// refresh.
#[derive(Debug, Clone)]
pub struct MotionState {
    pub current_acceleration: AxisData,
    pub previous_acceleration: AxisData,
    pub current_angular_rate: AxisData,
    pub previous_angular_rate: AxisData,
    pub orientation: Orientation,
    pub velocity: AxisData,
    pub last_sample_time: Instant,
    pub current_sample_time: Instant,
}

impl MotionState {
    /// Create a zeroed state with both timestamps set to `now`
    pub fn new(now: Instant) -> Self {
        Self {
            current_acceleration: AxisData::default(),
            previous_acceleration: AxisData::default(),
            current_angular_rate: AxisData::default(),
            previous_angular_rate: AxisData::default(),
            orientation: Orientation::default(),
            velocity: AxisData::default(),
            last_sample_time: now,
            current_sample_time: now,
        }
    }

    /// Reset both timestamps to `now` without touching the estimates
    pub fn seed_timestamps(&mut self, now: Instant) {
        self.last_sample_time = now;
        self.current_sample_time = now;
    }

    /// Move the current acceleration into the history slot
    pub fn shift_acceleration(&mut self) {
        self.previous_acceleration = self.current_acceleration;
    }

    /// Move the current angular rate into the history slot
    pub fn shift_angular_rate(&mut self) {
        self.previous_angular_rate = self.current_angular_rate;
    }

    /// Seconds between the two most recent samples
    pub fn delta_time(&self) -> f64 {
        self.current_sample_time
            .saturating_duration_since(self.last_sample_time)
            .as_secs_f64()
    }

    /// Derive the orientation from the previous acceleration, integrate the
    /// velocity over the elapsed time and then advance the timestamps.
    pub fn integrate(&mut self, mode: IntegrationMode, now: Instant) {
        self.orientation = orientation_from_gravity(self.previous_acceleration);

        let dt = self.delta_time();
        let acceleration = match mode {
            IntegrationMode::PreviousSample => self.previous_acceleration,
            IntegrationMode::CurrentSample => self.current_acceleration,
        };
        self.velocity = integrate_velocity(self.velocity, acceleration, dt);

        self.last_sample_time = self.current_sample_time;
        self.current_sample_time = now;
    }

    pub fn snapshot(&self) -> MotionSnapshot {
        MotionSnapshot {
            acceleration: self.current_acceleration,
            angular_rate: self.current_angular_rate,
            orientation: self.orientation,
            velocity: self.velocity,
            delta_time: self.delta_time(),
        }
    }
}

/// Compute roll and pitch in degrees from an acceleration vector dominated
/// by gravity. Yaw is left undetermined.
pub fn orientation_from_gravity(acc: AxisData) -> Orientation {
    let roll = acc.y.atan2(acc.z) * 180.0 / PI;
    let pitch = (-acc.x).atan2((acc.y * acc.y + acc.z * acc.z).sqrt()) * 180.0 / PI;
    Orientation {
        roll,
        pitch,
        yaw: None,
    }
}

/// First order Euler step: `v += a * dt` per axis
pub fn integrate_velocity(velocity: AxisData, acceleration: AxisData, dt: f64) -> AxisData {
    AxisData {
        x: velocity.x + acceleration.x * dt,
        y: velocity.y + acceleration.y * dt,
        z: velocity.z + acceleration.z * dt,
    }
}
