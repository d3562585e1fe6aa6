use std::{
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use crate::{
    bus::Transport,
    config::SensorConfig,
    drivers::mpu6050::driver::Driver,
    filter::FilterBank,
};

pub use crate::drivers::mpu6050::driver::InitError;

use super::{
    clock::{Clock, SystemClock},
    state::MotionState,
    AxisData, IntegrationMode, MotionSnapshot, Orientation,
};

/// Everything the refresh cycle touches, guarded by a single lock
#[derive(Debug)]
struct Inner<T: Transport> {
    driver: Driver<T>,
    accel_filter: FilterBank,
    gyro_filter: FilterBank,
    state: MotionState,
}

/// Polled motion sensor session.
///
/// One polling actor calls [MotionSensor::refresh]; any number of readers may
/// call the accessors concurrently. A refresh runs entirely under one lock,
/// so readers never see a half-updated state.
#[derive(Debug)]
pub struct MotionSensor<T: Transport, C: Clock = SystemClock> {
    address: u16,
    integration: IntegrationMode,
    clock: C,
    inner: Mutex<Inner<T>>,
}

impl<T: Transport> MotionSensor<T, SystemClock> {
    pub fn new(transport: T, config: &SensorConfig) -> Self {
        Self::with_clock(transport, config, SystemClock)
    }
}

impl<T: Transport, C: Clock> MotionSensor<T, C> {
    pub fn with_clock(transport: T, config: &SensorConfig, clock: C) -> Self {
        let state = MotionState::new(clock.now());
        let inner = Inner {
            driver: Driver::new(transport, config.scale),
            accel_filter: FilterBank::new(config.accel_filter),
            gyro_filter: FilterBank::new(config.gyro_filter),
            state,
        };
        Self {
            address: config.address,
            integration: config.integration,
            clock,
            inner: Mutex::new(inner),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open the bus, wake the sensor and seed both timestamps to now. This
    /// does not retry; the caller decides whether to try again.
    pub fn initialize(&self) -> Result<(), InitError> {
        let mut inner = self.lock();
        inner.driver.initialize(self.address)?;
        inner.state.seed_timestamps(self.clock.now());
        log::info!("Motion sensor ready at 0x{:02x}", self.address);
        Ok(())
    }

    /// Read, filter and integrate one sample. Never fails: bus errors are
    /// logged by the driver and the last good readings are used instead.
    pub fn refresh(&self) {
        let mut guard = self.lock();
        let inner = &mut *guard;

        inner.state.shift_acceleration();
        let raw_accel = inner.driver.read_acceleration();
        inner.state.current_acceleration = inner.accel_filter.filter(raw_accel);

        inner.state.shift_angular_rate();
        let raw_gyro = inner.driver.read_angular_rate();
        inner.state.current_angular_rate = inner.gyro_filter.filter(raw_gyro);

        inner.state.integrate(self.integration, self.clock.now());

        log::debug!("Angular rate: {}", inner.state.current_angular_rate);
    }

    /// Smoothed acceleration in m/s²
    pub fn acceleration(&self) -> AxisData {
        self.lock().state.current_acceleration
    }

    /// Smoothed angular rate in deg/s
    pub fn angular_rate(&self) -> AxisData {
        self.lock().state.current_angular_rate
    }

    /// Roll and pitch in degrees, from the acceleration before the latest
    /// refresh
    pub fn orientation(&self) -> Orientation {
        self.lock().state.orientation
    }

    /// Integrated velocity in m/s
    pub fn velocity(&self) -> AxisData {
        self.lock().state.velocity
    }

    pub fn previous_acceleration(&self) -> AxisData {
        self.lock().state.previous_acceleration
    }

    pub fn previous_angular_rate(&self) -> AxisData {
        self.lock().state.previous_angular_rate
    }

    /// Time between the two most recent samples
    pub fn delta_time(&self) -> Duration {
        let inner = self.lock();
        inner
            .state
            .current_sample_time
            .saturating_duration_since(inner.state.last_sample_time)
    }

    /// Copy every estimate at once
    pub fn snapshot(&self) -> MotionSnapshot {
        self.lock().state.snapshot()
    }

    pub fn integration_mode(&self) -> IntegrationMode {
        self.integration
    }
}

impl<T: Transport, C: Clock> Drop for MotionSensor<T, C> {
    fn drop(&mut self) {
        let inner = self.inner.get_mut().unwrap_or_else(PoisonError::into_inner);
        inner.driver.stop();
    }
}
