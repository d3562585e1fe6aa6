pub mod driver;
pub mod info;

#[cfg(test)]
mod driver_test;

/// Default 7-bit address of the peripheral (AD0 pulled low)
pub const ADDRESS: u16 = 0x68;

/// Power management register. Writing zero wakes the device from sleep.
pub const PWR_MGMT_1: u8 = 0x6B;

/// Accelerometer X/Y/Z high byte registers
pub const ACCEL_XOUT_H: u8 = 0x3B;
pub const ACCEL_YOUT_H: u8 = 0x3D;
pub const ACCEL_ZOUT_H: u8 = 0x3F;

/// Gyroscope X/Y/Z high byte registers
pub const GYRO_XOUT_H: u8 = 0x43;
pub const GYRO_YOUT_H: u8 = 0x45;
pub const GYRO_ZOUT_H: u8 = 0x47;

pub const ACCEL_REGISTERS: [u8; 3] = [ACCEL_XOUT_H, ACCEL_YOUT_H, ACCEL_ZOUT_H];
pub const GYRO_REGISTERS: [u8; 3] = [GYRO_XOUT_H, GYRO_YOUT_H, GYRO_ZOUT_H];
