//! Test doubles shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;

use embedded_storage::nor_flash::{
    ErrorType,
    NorFlash,
    NorFlashErrorKind,
    ReadNorFlash,
    check_erase,
    check_read,
    check_write,
};
use pwm_output_actor::{
    ConfigStorage,
    LedcDriver,
    LedcError,
    PwmOutputActor,
    SimulatedLedc,
    StorageError,
};

pub const PATH: &str = "/settings/act/LEDPWM.json";

/// Peripheral call as seen by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedcCall {
    Release { pin: u8 },
    Configure { channel: u8, frequency: u32, resolution: u8 },
    Bind { pin: u8, channel: u8 },
    Write { channel: u8, duty_cycle: u32 },
}

/// Driver that logs every call and forwards it to the LEDC model.
#[derive(Debug, Default)]
pub struct RecordingLedc {
    pub calls: Vec<LedcCall>,
    pub model: SimulatedLedc,
    pub reject_setup: Option<LedcError>,
}

impl RecordingLedc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(error: LedcError) -> Self {
        Self {
            reject_setup: Some(error),
            ..Self::default()
        }
    }

    pub fn writes(&self) -> Vec<u32> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                LedcCall::Write { duty_cycle, .. } => Some(*duty_cycle),
                _ => None,
            })
            .collect()
    }

    pub fn last_write(&self) -> Option<u32> {
        self.writes().last().copied()
    }
}

impl LedcDriver for RecordingLedc {
    fn release_binding(&mut self, pin: u8) {
        self.calls.push(LedcCall::Release { pin });
        self.model.release_binding(pin);
    }

    fn configure_channel(
        &mut self,
        channel: u8,
        frequency: u32,
        resolution: u8,
    ) -> Result<(), LedcError> {
        self.calls.push(LedcCall::Configure {
            channel,
            frequency,
            resolution,
        });
        if let Some(error) = self.reject_setup {
            return Err(error);
        }
        self.model.configure_channel(channel, frequency, resolution)
    }

    fn bind_pin(&mut self, pin: u8, channel: u8) {
        self.calls.push(LedcCall::Bind { pin, channel });
        self.model.bind_pin(pin, channel);
    }

    fn write_duty_cycle(&mut self, channel: u8, duty_cycle: u32) {
        self.calls.push(LedcCall::Write {
            channel,
            duty_cycle,
        });
        self.model.write_duty_cycle(channel, duty_cycle);
    }
}

/// In-memory configuration store.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    pub records: HashMap<String, Vec<u8>>,
    pub writes: usize,
    pub fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(path: &str, record: &str) -> Self {
        let mut storage = Self::default();
        storage
            .records
            .insert(path.to_owned(), record.as_bytes().to_vec());
        storage
    }

    pub fn record(&self, path: &str) -> Option<&str> {
        self.records
            .get(path)
            .map(|bytes| std::str::from_utf8(bytes).expect("record is utf-8"))
    }
}

impl ConfigStorage for MemoryStorage {
    fn exists(&mut self, path: &str) -> bool {
        self.records.contains_key(path)
    }

    fn read(&mut self, path: &str, buffer: &mut [u8]) -> Result<usize, StorageError> {
        let record = self.records.get(path).ok_or(StorageError::NotFound)?;
        buffer
            .get_mut(..record.len())
            .ok_or(StorageError::BufferTooSmall)?
            .copy_from_slice(record);
        Ok(record.len())
    }

    fn write(&mut self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::DriverError);
        }
        self.writes += 1;
        self.records.insert(path.to_owned(), data.to_vec());
        Ok(())
    }
}

/// RAM-backed NOR flash: erase sets bytes to 0xFF, programming only clears bits.
#[derive(Debug)]
pub struct RamFlash {
    pub data: Vec<u8>,
    pub erases: usize,
}

impl RamFlash {
    pub const ERASE: usize = 4096;

    pub fn new(blocks: usize) -> Self {
        Self {
            data: vec![0xFF; blocks * Self::ERASE],
            erases: 0,
        }
    }
}

impl ErrorType for RamFlash {
    type Error = NorFlashErrorKind;
}

impl ReadNorFlash for RamFlash {
    const READ_SIZE: usize = 1;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        check_read(self, offset, bytes.len())?;
        let start = offset as usize;
        bytes.copy_from_slice(&self.data[start..start + bytes.len()]);
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.data.len()
    }
}

impl NorFlash for RamFlash {
    const WRITE_SIZE: usize = 4;
    const ERASE_SIZE: usize = Self::ERASE;

    fn erase(&mut self, from: u32, to: u32) -> Result<(), Self::Error> {
        check_erase(self, from, to)?;
        self.data[from as usize..to as usize].fill(0xFF);
        self.erases += 1;
        Ok(())
    }

    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        check_write(self, offset, bytes.len())?;
        let start = offset as usize;
        for (cell, byte) in self.data[start..start + bytes.len()].iter_mut().zip(bytes) {
            *cell &= *byte;
        }
        Ok(())
    }
}

pub type TestActor = PwmOutputActor<MemoryStorage, RecordingLedc>;

/// Actor on pin 5, channel 0, default record path.
pub fn actor(storage: MemoryStorage) -> TestActor {
    PwmOutputActor::with_defaults("Desk LED", 5, storage, RecordingLedc::new())
        .expect("name and path fit")
}

/// Encode a full record.
pub fn record(
    name: &str,
    pin: u8,
    save_duty_cycle: bool,
    duty_cycle: u32,
    channel: u8,
    resolution: u8,
    frequency: u32,
) -> String {
    format!(
        r#"{{"Name":"{name}","Pin":{pin},"saveDutyCycle":{save_duty_cycle},"dutyCycle":{duty_cycle},"ledc_channel":{channel},"ledc_resolution":{resolution},"ledc_frequency":{frequency}}}"#
    )
}
