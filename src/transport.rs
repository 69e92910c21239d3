//! Byte-level access to devices on a shared I2C bus

use crate::error::{RecorderError, Result};
use embedded_hal::i2c::I2c;
use linux_embedded_hal::I2cdev;
use std::path::Path;

/// Lowest and highest non-reserved 7-bit addresses probed by a scan
const SCAN_FIRST_ADDRESS: u8 = 0x03;
const SCAN_LAST_ADDRESS: u8 = 0x77;

/// Bus operations the recorder needs from the transport
pub trait BusTransport {
    /// Probe the bus and return every address that acknowledged, ascending
    fn scan(&mut self) -> Result<Vec<u8>>;

    /// Read `length` bytes starting at `register` of the device at `address`
    fn read_bytes(&mut self, address: u8, register: u8, length: usize) -> Result<Vec<u8>>;

    /// Write `bytes` starting at `register` of the device at `address`
    fn write_bytes(&mut self, address: u8, register: u8, bytes: &[u8]) -> Result<()>;
}

/// [`BusTransport`] over any embedded-hal I2C bus
pub struct I2cBus<I> {
    i2c: I,
}

impl I2cBus<I2cdev> {
    /// Open a Linux i2c-dev node, e.g. `/dev/i2c-1`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let i2c = I2cdev::new(path).map_err(|e| {
            RecorderError::ScanError(format!("Failed to open {}: {}", path.display(), e))
        })?;
        log::debug!("Opened I2C bus {}", path.display());
        Ok(Self::new(i2c))
    }
}

impl<I: I2c> I2cBus<I> {
    /// Wrap an already-open bus
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    fn bus_error(address: u8, err: I::Error) -> RecorderError {
        RecorderError::BusError {
            address,
            description: format!("{:?}", err),
        }
    }
}

impl<I: I2c> BusTransport for I2cBus<I> {
    fn scan(&mut self) -> Result<Vec<u8>> {
        let mut found = Vec::new();
        let mut probe = [0u8; 1];

        for address in SCAN_FIRST_ADDRESS..=SCAN_LAST_ADDRESS {
            // A NACK on the address byte means nobody is there
            if self.i2c.read(address, &mut probe).is_ok() {
                found.push(address);
            }
        }

        Ok(found)
    }

    fn read_bytes(&mut self, address: u8, register: u8, length: usize) -> Result<Vec<u8>> {
        let mut data = vec![0u8; length];
        self.i2c
            .write_read(address, &[register], &mut data)
            .map_err(|e| Self::bus_error(address, e))?;
        Ok(data)
    }

    fn write_bytes(&mut self, address: u8, register: u8, bytes: &[u8]) -> Result<()> {
        let mut buffer = Vec::with_capacity(bytes.len() + 1);
        buffer.push(register);
        buffer.extend_from_slice(bytes);

        self.i2c
            .write(address, &buffer)
            .map_err(|e| Self::bus_error(address, e))
    }
}
