pub mod mpu6050;
