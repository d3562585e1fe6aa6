use std::{
    fs::{File, OpenOptions},
    io::{Read, Write},
    os::fd::AsRawFd,
};

use super::{BusError, Transport};

/// Default I2C character device on a Raspberry Pi
pub const DEFAULT_BUS: &str = "/dev/i2c-1";

/// ioctl request used to set the slave address for subsequent transfers
/// https://github.com/torvalds/linux/blob/master/include/uapi/linux/i2c-dev.h
const I2C_SLAVE: u16 = 0x0703;

nix::ioctl_write_int_bad!(i2c_set_slave, I2C_SLAVE);

/// Linux i2c-dev implementation of [Transport]
#[derive(Debug)]
pub struct I2cBus {
    path: String,
    file: Option<File>,
}

impl I2cBus {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }

    /// Returns the path to the bus device
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    fn file(&mut self) -> Result<&mut File, BusError> {
        self.file.as_mut().ok_or(BusError::NotOpen)
    }
}

impl Transport for I2cBus {
    fn open(&mut self) -> Result<(), BusError> {
        log::debug!("Opening I2C bus {}", self.path);
        let file = OpenOptions::new().read(true).write(true).open(&self.path)?;
        self.file = Some(file);
        Ok(())
    }

    fn select_peripheral(&mut self, address: u16) -> Result<(), BusError> {
        let fd = self.file()?.as_raw_fd();
        log::debug!("Selecting I2C peripheral 0x{address:02x}");
        // SAFETY: fd is owned by an open File for the duration of the call
        unsafe { i2c_set_slave(fd, address as i32) }?;
        Ok(())
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), BusError> {
        let buf = [reg, value];
        let written = self.file()?.write(&buf)?;
        if written != buf.len() {
            return Err(BusError::ShortTransfer {
                expected: buf.len(),
                actual: written,
            });
        }
        Ok(())
    }

    fn read_register_word(&mut self, reg: u8) -> Result<i16, BusError> {
        let file = self.file()?;

        // Set the register pointer, then read the high and low bytes
        let written = file.write(&[reg])?;
        if written != 1 {
            return Err(BusError::ShortTransfer {
                expected: 1,
                actual: written,
            });
        }

        let mut data = [0u8; 2];
        let read = file.read(&mut data)?;
        if read != data.len() {
            return Err(BusError::ShortTransfer {
                expected: data.len(),
                actual: read,
            });
        }

        Ok(i16::from_be_bytes(data))
    }

    fn close(&mut self) {
        if self.file.take().is_some() {
            log::debug!("Closed I2C bus {}", self.path);
        }
    }
}

impl Drop for I2cBus {
    fn drop(&mut self) {
        self.close();
    }
}
