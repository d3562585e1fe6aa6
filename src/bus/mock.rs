//! Scripted [Transport] used to exercise the sensor without hardware

use std::{
    collections::HashMap,
    io,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use super::{BusError, Transport};

/// A single operation recorded by the [MockBus]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusOperation {
    Open,
    SelectPeripheral(u16),
    WriteRegister { reg: u8, value: u8 },
    ReadRegisterWord(u8),
    Close,
}

#[derive(Debug, Default)]
struct MockState {
    is_open: bool,
    fail_open: bool,
    fail_select: bool,
    fail_writes: bool,
    fail_reads: bool,
    registers: HashMap<u8, i16>,
    operations: Vec<BusOperation>,
}

/// Mock transport. Clones share the same state, so a test can keep a handle
/// after moving the bus into a sensor.
#[derive(Debug, Clone, Default)]
pub struct MockBus {
    state: Arc<Mutex<MockState>>,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Set the word returned when the given register is read
    pub fn set_register(&self, reg: u8, value: i16) {
        self.state().registers.insert(reg, value);
    }

    /// Set three consecutive words starting at the given register. This
    /// matches the X/Y/Z layout of a sensor data block.
    pub fn set_block(&self, start: u8, values: [i16; 3]) {
        let mut state = self.state();
        for (i, value) in values.into_iter().enumerate() {
            state.registers.insert(start + 2 * i as u8, value);
        }
    }

    pub fn fail_open(&self, fail: bool) {
        self.state().fail_open = fail;
    }

    pub fn fail_select(&self, fail: bool) {
        self.state().fail_select = fail;
    }

    pub fn fail_writes(&self, fail: bool) {
        self.state().fail_writes = fail;
    }

    pub fn fail_reads(&self, fail: bool) {
        self.state().fail_reads = fail;
    }

    /// Returns true if the bus is currently open
    pub fn is_open(&self) -> bool {
        self.state().is_open
    }

    /// Get the operation log
    pub fn operations(&self) -> Vec<BusOperation> {
        self.state().operations.clone()
    }

    /// Clear the operation log
    pub fn clear_operations(&self) {
        self.state().operations.clear();
    }
}

fn injected(what: &str) -> BusError {
    BusError::Io(io::Error::other(format!("injected {what} failure")))
}

impl Transport for MockBus {
    fn open(&mut self) -> Result<(), BusError> {
        let mut state = self.state();
        state.operations.push(BusOperation::Open);
        if state.fail_open {
            return Err(injected("open"));
        }
        state.is_open = true;
        Ok(())
    }

    fn select_peripheral(&mut self, address: u16) -> Result<(), BusError> {
        let mut state = self.state();
        state.operations.push(BusOperation::SelectPeripheral(address));
        if !state.is_open {
            return Err(BusError::NotOpen);
        }
        if state.fail_select {
            return Err(injected("select"));
        }
        Ok(())
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), BusError> {
        let mut state = self.state();
        state
            .operations
            .push(BusOperation::WriteRegister { reg, value });
        if !state.is_open {
            return Err(BusError::NotOpen);
        }
        if state.fail_writes {
            return Err(injected("write"));
        }
        Ok(())
    }

    fn read_register_word(&mut self, reg: u8) -> Result<i16, BusError> {
        let mut state = self.state();
        state.operations.push(BusOperation::ReadRegisterWord(reg));
        if !state.is_open {
            return Err(BusError::NotOpen);
        }
        if state.fail_reads {
            return Err(BusError::ShortTransfer {
                expected: 2,
                actual: 0,
            });
        }
        Ok(state.registers.get(&reg).copied().unwrap_or_default())
    }

    fn close(&mut self) {
        let mut state = self.state();
        if state.is_open {
            state.operations.push(BusOperation::Close);
            state.is_open = false;
        }
    }
}
