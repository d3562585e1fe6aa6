pub mod i2c;
pub mod mock;

use std::io;

use thiserror::Error;

/// Represents all possible errors talking to a peripheral over the bus
#[derive(Debug, Error)]
pub enum BusError {
    #[error("Bus has not been opened")]
    NotOpen,
    #[error("Bus I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("Bus ioctl failed: {0}")]
    Ioctl(#[from] nix::errno::Errno),
    #[error("Short transfer: expected {expected} bytes, got {actual}")]
    ShortTransfer { expected: usize, actual: usize },
}

/// A register-based bus used to talk to a single peripheral.
///
/// Implementations report failures through [BusError], but callers in the
/// polling path are expected to log and discard them rather than abort.
pub trait Transport: Send {
    /// Open the underlying device handle
    fn open(&mut self) -> Result<(), BusError>;

    /// Address the peripheral that subsequent register operations target
    fn select_peripheral(&mut self, address: u16) -> Result<(), BusError>;

    /// Write a single data byte to the given register
    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), BusError>;

    /// Read a big-endian two byte word starting at the given register
    fn read_register_word(&mut self, reg: u8) -> Result<i16, BusError>;

    /// Release the device handle. Closing a transport that was never opened
    /// does nothing.
    fn close(&mut self) {}
}
