use std::error::Error;

use crate::{
    bus::mock::{BusOperation, MockBus},
    drivers::mpu6050::{
        driver::{Driver, InitError},
        info::SensorScale,
        ACCEL_XOUT_H, ADDRESS, GYRO_XOUT_H, PWR_MGMT_1,
    },
};

#[test]
fn test_initialize_wakes_sensor() -> Result<(), Box<dyn Error>> {
    let bus = MockBus::new();
    let mut driver = Driver::new(bus.clone(), SensorScale::default());

    driver.initialize(ADDRESS)?;

    assert_eq!(
        bus.operations(),
        vec![
            BusOperation::Open,
            BusOperation::SelectPeripheral(ADDRESS),
            BusOperation::WriteRegister {
                reg: PWR_MGMT_1,
                value: 0
            },
        ],
        "should open, select and wake the sensor"
    );

    Ok(())
}

#[test]
fn test_initialize_reports_open_failure() {
    let bus = MockBus::new();
    bus.fail_open(true);
    let mut driver = Driver::new(bus.clone(), SensorScale::default());

    let result = driver.initialize(ADDRESS);
    assert!(matches!(result, Err(InitError::Open(_))), "should fail to open");
}

#[test]
fn test_initialize_ignores_wake_failure() -> Result<(), Box<dyn Error>> {
    let bus = MockBus::new();
    bus.fail_writes(true);
    let mut driver = Driver::new(bus.clone(), SensorScale::default());

    driver.initialize(ADDRESS)?;
    assert!(bus.is_open(), "bus should stay open");

    Ok(())
}

#[test]
fn test_read_converts_units() -> Result<(), Box<dyn Error>> {
    let bus = MockBus::new();
    bus.set_block(ACCEL_XOUT_H, [16384, -8192, 0]);
    bus.set_block(GYRO_XOUT_H, [131, 262, -655]);
    let mut driver = Driver::new(bus.clone(), SensorScale::default());
    driver.initialize(ADDRESS)?;

    let accel = driver.read_acceleration();
    assert!((accel.x - 9.81).abs() < 1e-12, "1 g should be 9.81 m/s²");
    assert!((accel.y + 4.905).abs() < 1e-12, "-0.5 g should be -4.905 m/s²");
    assert_eq!(accel.z, 0.0);

    let gyro = driver.read_angular_rate();
    assert!((gyro.x - 1.0).abs() < 1e-12);
    assert!((gyro.y - 2.0).abs() < 1e-12);
    assert!((gyro.z + 5.0).abs() < 1e-12);

    Ok(())
}

#[test]
fn test_read_failure_reuses_last_good_value() -> Result<(), Box<dyn Error>> {
    let bus = MockBus::new();
    let scale = SensorScale {
        accel_lsb_per_g: 1.0,
        gravity: 1.0,
        gyro_lsb_per_dps: 1.0,
    };
    let mut driver = Driver::new(bus.clone(), scale);
    driver.initialize(ADDRESS)?;

    // Nothing read yet, so a failure falls back to zero
    bus.fail_reads(true);
    let accel = driver.read_acceleration();
    assert_eq!(accel.to_array(), [0.0; 3], "should fall back to zero");

    bus.fail_reads(false);
    bus.set_block(ACCEL_XOUT_H, [1, 2, 3]);
    driver.read_acceleration();

    bus.fail_reads(true);
    bus.set_block(ACCEL_XOUT_H, [100, 200, 300]);
    let accel = driver.read_acceleration();
    assert_eq!(
        accel.to_array(),
        [1.0, 2.0, 3.0],
        "should reuse the last good values"
    );

    Ok(())
}
