//! ADXL345 acceleration recorder
//!
//! This library discovers a single ADXL345 accelerometer on a Linux I2C bus,
//! samples it in a self-paced loop and exports the recording as a
//! four-channel text signal file (32768 ticks per second).
//!
//! # Quick Start
//!
//! ## Record Until Interrupted
//! ```no_run
//! use adxl345_signal_recorder::{collect, signals_format, Adxl345, I2cBus, Recording};
//! use std::sync::atomic::AtomicBool;
//! use std::time::Duration;
//!
//! let bus = I2cBus::open("/dev/i2c-1")?;
//! let mut sensor = Adxl345::initialize(bus)?;
//!
//! let running = AtomicBool::new(true);
//! let mut recording = Recording::new();
//! collect(&mut sensor, &mut recording, Duration::from_millis(10), &running)?;
//!
//! signals_format::write_signals("out.signals.out", &recording)?;
//! # Ok::<(), adxl345_signal_recorder::RecorderError>(())
//! ```
//!
//! ## Streaming Individual Samples
//! ```no_run
//! use adxl345_signal_recorder::{Adxl345, I2cBus, StreamControl};
//! use std::time::Duration;
//!
//! let mut sensor = Adxl345::initialize(I2cBus::open("/dev/i2c-1")?)?;
//!
//! sensor.stream(Duration::from_millis(10), |sample| {
//!     if sample.magnitude() > 3.0 {
//!         println!("High acceleration at {} ms: {:.2}g", sample.elapsed_ms, sample.magnitude());
//!         StreamControl::Break
//!     } else {
//!         StreamControl::Continue
//!     }
//! })?;
//! # Ok::<(), adxl345_signal_recorder::RecorderError>(())
//! ```

pub mod adxl345;
pub mod collector;
pub mod common;
pub mod error;
pub mod mock_bus;
pub mod recording;
pub mod signals_format;
pub mod transport;

// Re-export public API
pub use adxl345::{Adxl345, RawAcceleration, StreamControl};
pub use collector::collect;
pub use common::TimeKeeper;
pub use error::{RecorderError, Result};
pub use mock_bus::MockBus;
pub use recording::{Recording, Sample};
pub use transport::{BusTransport, I2cBus};
