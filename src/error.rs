//! Error types for the ADXL345 recorder

use thiserror::Error;

/// Error type for recorder operations
#[derive(Error, Debug)]
pub enum RecorderError {
    /// Bus transfer failed
    #[error("Bus error at address 0x{address:02X}: {description}")]
    BusError { address: u8, description: String },

    /// Bus could not be opened or scanned
    #[error("Bus scan failed: {0}")]
    ScanError(String),

    /// Discovery found zero or several devices
    #[error("Expected exactly one I2C device, found {}: {:02X?}", .0.len(), .0)]
    DeviceCount(Vec<u8>),

    /// A bring-up register write failed
    #[error("Configuration of register 0x{register:02X} failed: {reason}")]
    ConfigurationError { register: u8, reason: String },

    /// Data transfer error
    #[error("Data transfer error: expected {expected} bytes, transferred {actual}")]
    TransferError { expected: usize, actual: usize },

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Writing the export file failed
    #[error("Export failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for recorder operations
pub type Result<T> = std::result::Result<T, RecorderError>;
