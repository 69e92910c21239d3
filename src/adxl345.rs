//! ADXL345 accelerometer driver over a [`BusTransport`]

use crate::common::TimeKeeper;
use crate::error::{RecorderError, Result};
use crate::recording::Sample;
use crate::transport::BusTransport;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

// ADXL345 register addresses
const REG_POWER_CTL: u8 = 0x2D;
const REG_BW_RATE: u8 = 0x2C;
const REG_DATA_FORMAT: u8 = 0x31;
const REG_DATAX0: u8 = 0x32;

// POWER_CTL: measure bit
const POWER_CTL_MEASURE: u8 = 0x08;

// DATA_FORMAT bits
const DATA_FORMAT_RANGE_4G: u8 = 0x01;
const DATA_FORMAT_JUSTIFY_RIGHT: u8 = 0 << 2;
const DATA_FORMAT_FULL_RES: u8 = 1 << 3;

// BW_RATE: rate code 0x0B, 200 Hz output data rate
const BW_RATE_200HZ: u8 = 0x0B;

/// Bytes in one X/Y/Z data burst
const DATA_LEN: usize = 6;

/// g per LSB in full-resolution mode
pub const SCALE_G_PER_LSB: f64 = 0.004;

/// Default delay between the end of one read and the start of the next
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(10);

/// Control flow for streaming operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamControl {
    /// Continue streaming
    Continue,
    /// Stop streaming
    Break,
}

/// Raw accelerometer counts as read from DATAX0..DATAZ1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawAcceleration {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl RawAcceleration {
    /// Decode the little-endian X, Y, Z burst
    pub fn from_le_bytes(data: &[u8; DATA_LEN]) -> Self {
        Self {
            x: i16::from_le_bytes([data[0], data[1]]),
            y: i16::from_le_bytes([data[2], data[3]]),
            z: i16::from_le_bytes([data[4], data[5]]),
        }
    }

    /// Convert raw counts to g
    pub fn to_g(&self) -> (f64, f64, f64) {
        (
            self.x as f64 * SCALE_G_PER_LSB,
            self.y as f64 * SCALE_G_PER_LSB,
            self.z as f64 * SCALE_G_PER_LSB,
        )
    }

    /// Build a sample stamped with `elapsed_ms`
    pub fn to_sample(&self, elapsed_ms: u64) -> Sample {
        let (x, y, z) = self.to_g();
        Sample { elapsed_ms, x, y, z }
    }
}

/// Initialized ADXL345 bound to a single bus address
pub struct Adxl345<B: BusTransport> {
    bus: B,
    address: u8,
}

impl<B: BusTransport> Adxl345<B> {
    /// Discover the sensor on the bus and configure it for measurement
    ///
    /// Exactly one device must answer the scan. POWER_CTL, DATA_FORMAT and
    /// BW_RATE are then written in that order; the first failure aborts
    /// bring-up.
    ///
    /// # Returns
    /// * `Ok(Adxl345)` - Sensor in measurement mode
    /// * `Err(RecorderError::DeviceCount)` - Zero or several devices found
    /// * `Err(RecorderError::ConfigurationError)` - A register write failed
    pub fn initialize(mut bus: B) -> Result<Self> {
        let addresses = bus.scan()?;
        log::info!("I2C scan found {} device(s): {:02X?}", addresses.len(), addresses);

        let address = match addresses.as_slice() {
            [address] => *address,
            _ => return Err(RecorderError::DeviceCount(addresses)),
        };

        let mut sensor = Adxl345 { bus, address };
        sensor.configure()?;

        Ok(sensor)
    }

    fn configure(&mut self) -> Result<()> {
        self.write_register(REG_POWER_CTL, POWER_CTL_MEASURE)?;
        self.write_register(
            REG_DATA_FORMAT,
            DATA_FORMAT_RANGE_4G | DATA_FORMAT_JUSTIFY_RIGHT | DATA_FORMAT_FULL_RES,
        )?;
        self.write_register(REG_BW_RATE, BW_RATE_200HZ)?;
        Ok(())
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<()> {
        log::debug!("0x{:02X}: write 0x{:02X} to register 0x{:02X}", self.address, value, register);
        self.bus
            .write_bytes(self.address, register, &[value])
            .map_err(|e| RecorderError::ConfigurationError {
                register,
                reason: e.to_string(),
            })
    }

    /// Bus address the sensor was discovered at
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Read the current X/Y/Z registers in one burst
    pub fn read_raw(&mut self) -> Result<RawAcceleration> {
        let data = self.bus.read_bytes(self.address, REG_DATAX0, DATA_LEN)?;
        let data: [u8; DATA_LEN] = data
            .as_slice()
            .try_into()
            .map_err(|_| RecorderError::TransferError {
                expected: DATA_LEN,
                actual: data.len(),
            })?;
        Ok(RawAcceleration::from_le_bytes(&data))
    }

    /// Sample repeatedly until the callback asks to stop
    ///
    /// The time origin is taken when this call starts. After each sample
    /// has been handed to the callback the loop sleeps for `interval`, so the
    /// effective period is the transfer time plus `interval`.
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of samples delivered before stopping
    /// * `Err(RecorderError)` - If a read fails; the loop stops there
    pub fn stream<F>(&mut self, interval: Duration, callback: F) -> Result<u64>
    where
        F: FnMut(Sample) -> StreamControl,
    {
        let always = AtomicBool::new(true);
        self.stream_while(interval, &always, callback)
    }

    /// Like [`stream`](Self::stream), but also stops once `running` is cleared
    ///
    /// The flag is checked before every read, so a stop request never
    /// interrupts a transfer already in flight.
    pub fn stream_while<F>(&mut self, interval: Duration, running: &AtomicBool, mut callback: F) -> Result<u64>
    where
        F: FnMut(Sample) -> StreamControl,
    {
        if interval.is_zero() {
            return Err(RecorderError::InvalidParameter(
                "Sample interval must be non-zero".to_string(),
            ));
        }

        let timer = TimeKeeper::new();
        let mut sample_count = 0u64;

        while running.load(Ordering::SeqCst) {
            let raw = self.read_raw()?;
            let sample = raw.to_sample(timer.elapsed_ms());
            sample_count += 1;

            if callback(sample) == StreamControl::Break {
                break;
            }

            std::thread::sleep(interval);
        }

        Ok(sample_count)
    }
}
