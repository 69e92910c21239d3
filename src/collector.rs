//! Run-until-interrupted acquisition into a [`Recording`]

use crate::adxl345::{Adxl345, StreamControl};
use crate::error::Result;
use crate::recording::Recording;
use crate::transport::BusTransport;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

/// Samples between progress reports
pub const PROGRESS_EVERY: usize = 100;

/// Append samples to `recording` until `running` is cleared
///
/// A read failure stops collection; everything recorded before it stays in
/// `recording` so the caller can still export it.
///
/// # Returns
/// * `Ok(u64)` - Samples collected by this call
/// * `Err(RecorderError)` - The read error that ended collection
pub fn collect<B: BusTransport>(
    sensor: &mut Adxl345<B>,
    recording: &mut Recording,
    interval: Duration,
    running: &AtomicBool,
) -> Result<u64> {
    let result = sensor.stream_while(interval, running, |sample| {
        recording.append(sample);

        if recording.len() % PROGRESS_EVERY == 0 {
            log::info!(
                "{:.2}s: {} samples",
                sample.elapsed_ms as f64 / 1000.0,
                recording.len()
            );
        }

        StreamControl::Continue
    });

    if let Err(ref e) = result {
        log::error!("Read failed after {} samples: {}", recording.len(), e);
    }

    result
}
