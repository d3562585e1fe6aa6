use thiserror::Error;

use crate::{
    bus::{BusError, Transport},
    motion::AxisData,
};

use super::{info::SensorScale, ACCEL_REGISTERS, GYRO_REGISTERS, PWR_MGMT_1};

/// Driver for reading accelerometer and gyroscope words from the sensor.
///
/// Reads never fail. When a register cannot be read the last value that was
/// read from it successfully is used, or zero if there is none yet.
#[derive(Debug)]
pub struct Driver<T: Transport> {
    transport: T,
    scale: SensorScale,
    last_accel: [i16; 3],
    last_gyro: [i16; 3],
}

impl<T: Transport> Driver<T> {
    pub fn new(transport: T, scale: SensorScale) -> Self {
        Self {
            transport,
            scale,
            last_accel: [0; 3],
            last_gyro: [0; 3],
        }
    }

    /// Open the bus, address the peripheral and wake it up. Only failing to
    /// open or address the bus is an error; a failed wake write is logged.
    pub fn initialize(&mut self, address: u16) -> Result<(), InitError> {
        self.transport.open().map_err(InitError::Open)?;
        self.transport
            .select_peripheral(address)
            .map_err(InitError::SelectPeripheral)?;

        if let Err(e) = self.transport.write_register(PWR_MGMT_1, 0) {
            log::error!("Failed to wake sensor at 0x{address:02x}: {e}");
        }

        log::debug!("Initialized sensor at 0x{address:02x} ({})", self.scale);
        Ok(())
    }

    /// Read the accelerometer in m/s²
    pub fn read_acceleration(&mut self) -> AxisData {
        let raw = read_block(&mut self.transport, ACCEL_REGISTERS, &mut self.last_accel);
        AxisData::new(
            self.scale.acceleration(raw[0]),
            self.scale.acceleration(raw[1]),
            self.scale.acceleration(raw[2]),
        )
    }

    /// Read the gyroscope in deg/s
    pub fn read_angular_rate(&mut self) -> AxisData {
        let raw = read_block(&mut self.transport, GYRO_REGISTERS, &mut self.last_gyro);
        AxisData::new(
            self.scale.angular_rate(raw[0]),
            self.scale.angular_rate(raw[1]),
            self.scale.angular_rate(raw[2]),
        )
    }

    /// Release the bus
    pub fn stop(&mut self) {
        self.transport.close();
    }

    pub fn scale(&self) -> SensorScale {
        self.scale
    }
}

/// Represents all possible errors initializing the sensor
#[derive(Debug, Error)]
pub enum InitError {
    #[error("Failed to open bus: {0}")]
    Open(BusError),
    #[error("Failed to acquire bus access: {0}")]
    SelectPeripheral(BusError),
}

/// Read three consecutive data words, falling back to the last good value
/// for any register that fails.
fn read_block<T: Transport>(
    transport: &mut T,
    registers: [u8; 3],
    last: &mut [i16; 3],
) -> [i16; 3] {
    for (i, reg) in registers.into_iter().enumerate() {
        match transport.read_register_word(reg) {
            Ok(value) => last[i] = value,
            Err(e) => {
                log::warn!(
                    "Failed to read register 0x{reg:02x}, reusing {}: {e}",
                    last[i]
                );
            }
        }
    }
    *last
}
