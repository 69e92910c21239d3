//! Scripted in-memory bus for exercising the recorder without hardware

use crate::error::{RecorderError, Result};
use crate::transport::BusTransport;
use std::collections::VecDeque;

/// A single register write observed by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedWrite {
    pub address: u8,
    pub register: u8,
    pub bytes: Vec<u8>,
}

/// Mock [`BusTransport`] returning queued data frames
///
/// Reads pop the next queued frame; once the queue is empty the last frame
/// is repeated (or zeros if nothing was ever queued).
#[derive(Debug, Default)]
pub struct MockBus {
    devices: Vec<u8>,
    frames: VecDeque<Vec<u8>>,
    last_frame: Vec<u8>,
    writes: Vec<RecordedWrite>,
    reads: usize,
    fail_scan: bool,
    fail_write_register: Option<u8>,
    fail_reads_after: Option<usize>,
}

impl MockBus {
    /// Create a mock with the given device addresses present
    pub fn new(devices: &[u8]) -> Self {
        Self {
            devices: devices.to_vec(),
            ..Self::default()
        }
    }

    /// Queue a frame to be returned by the next read
    pub fn push_frame(&mut self, frame: &[u8]) {
        self.frames.push_back(frame.to_vec());
    }

    /// Make `scan` fail
    pub fn fail_scan(&mut self) {
        self.fail_scan = true;
    }

    /// Make every write to `register` fail
    pub fn fail_writes_to(&mut self, register: u8) {
        self.fail_write_register = Some(register);
    }

    /// Let `count` reads succeed, then fail every read after that
    pub fn fail_reads_after(&mut self, count: usize) {
        self.fail_reads_after = Some(count);
    }

    /// Writes observed so far, in order
    pub fn writes(&self) -> &[RecordedWrite] {
        &self.writes
    }

    /// Number of successful reads
    pub fn read_count(&self) -> usize {
        self.reads
    }

    fn check_present(&self, address: u8) -> Result<()> {
        if self.devices.contains(&address) {
            Ok(())
        } else {
            Err(RecorderError::BusError {
                address,
                description: "no acknowledge".to_string(),
            })
        }
    }
}

impl BusTransport for MockBus {
    fn scan(&mut self) -> Result<Vec<u8>> {
        if self.fail_scan {
            return Err(RecorderError::ScanError("mock scan failure".to_string()));
        }
        let mut found = self.devices.clone();
        found.sort_unstable();
        Ok(found)
    }

    fn read_bytes(&mut self, address: u8, _register: u8, length: usize) -> Result<Vec<u8>> {
        self.check_present(address)?;

        if let Some(limit) = self.fail_reads_after {
            if self.reads >= limit {
                return Err(RecorderError::BusError {
                    address,
                    description: "mock read failure".to_string(),
                });
            }
        }

        if let Some(frame) = self.frames.pop_front() {
            self.last_frame = frame;
        }
        self.reads += 1;

        if self.last_frame.is_empty() {
            return Ok(vec![0; length]);
        }
        Ok(self.last_frame.iter().copied().take(length).collect())
    }

    fn write_bytes(&mut self, address: u8, register: u8, bytes: &[u8]) -> Result<()> {
        self.check_present(address)?;

        if self.fail_write_register == Some(register) {
            return Err(RecorderError::BusError {
                address,
                description: "mock write failure".to_string(),
            });
        }

        self.writes.push(RecordedWrite {
            address,
            register,
            bytes: bytes.to_vec(),
        });
        Ok(())
    }
}
