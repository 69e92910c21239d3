//! Text signal file format for recorded acceleration
//!
//! The file holds four channels in a fixed order. Each channel is written as
//! its name, its sample count, then one `"<tick> <tick> <value>"` line per
//! sample, where ticks count 1/32768 s since sampling began.

use crate::error::Result;
use crate::recording::Recording;
use std::fs;
use std::path::Path;

/// Time base of the signal file
pub const TICKS_PER_SECOND: u64 = 32768;

/// Channel names in file order
pub const CHANNEL_NAMES: [&str; 4] = ["x-raw", "y-raw", "z-raw", "total-raw"];

/// One named series of `(tick, value)` points
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub name: &'static str,
    pub points: Vec<(u64, f64)>,
}

impl Channel {
    fn with_capacity(name: &'static str, capacity: usize) -> Self {
        Self {
            name,
            points: Vec::with_capacity(capacity),
        }
    }
}

/// Convert milliseconds to ticks, rounding half up
pub fn ms_to_ticks(elapsed_ms: u64) -> u64 {
    let scaled = elapsed_ms as u128 * TICKS_PER_SECOND as u128;
    ((scaled + 500) / 1000) as u64
}

/// Split a recording into the x, y, z and magnitude channels
pub fn build_channels(recording: &Recording) -> [Channel; 4] {
    let n = recording.len();
    let [x_name, y_name, z_name, total_name] = CHANNEL_NAMES;
    let mut x = Channel::with_capacity(x_name, n);
    let mut y = Channel::with_capacity(y_name, n);
    let mut z = Channel::with_capacity(z_name, n);
    let mut total = Channel::with_capacity(total_name, n);

    for sample in recording.samples() {
        let tick = ms_to_ticks(sample.elapsed_ms);
        x.points.push((tick, sample.x));
        y.points.push((tick, sample.y));
        z.points.push((tick, sample.z));
        total.points.push((tick, sample.magnitude()));
    }

    [x, y, z, total]
}

/// Render a recording as signal file text
///
/// Lines are joined with `\n` and there is no trailing newline.
pub fn render(recording: &Recording) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(CHANNEL_NAMES.len() * (recording.len() + 2));

    for channel in build_channels(recording) {
        lines.push(channel.name.to_string());
        lines.push(channel.points.len().to_string());
        for (tick, value) in &channel.points {
            lines.push(format!("{} {} {:.3}", tick, tick, value));
        }
    }

    lines.join("\n")
}

/// Render a recording and write it to `path`, replacing any existing file
///
/// # Returns
/// * `Ok(usize)` - Number of bytes written
pub fn write_signals<P: AsRef<Path>>(path: P, recording: &Recording) -> Result<usize> {
    let path = path.as_ref();
    let content = render(recording);
    fs::write(path, &content)?;
    log::info!(
        "Wrote {} samples per channel ({} bytes) to {}",
        recording.len(),
        content.len(),
        path.display()
    );
    Ok(content.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::Sample;

    fn sample(elapsed_ms: u64, x: f64, y: f64, z: f64) -> Sample {
        Sample { elapsed_ms, x, y, z }
    }

    fn unit_axes() -> Recording {
        let mut recording = Recording::new();
        recording.append(sample(0, 1.0, 0.0, 0.0));
        recording.append(sample(10, 0.0, 1.0, 0.0));
        recording.append(sample(20, 0.0, 0.0, 1.0));
        recording
    }

    #[test]
    fn test_ms_to_ticks() {
        assert_eq!(ms_to_ticks(0), 0);
        assert_eq!(ms_to_ticks(500), 16384);
        assert_eq!(ms_to_ticks(1000), 32768);
        assert_eq!(ms_to_ticks(10), 328); // 327.68
        assert_eq!(ms_to_ticks(20), 655); // 655.36
    }

    #[test]
    fn test_ms_to_ticks_large_values() {
        // One day
        assert_eq!(ms_to_ticks(86_400_000), 86_400 * 32768);
    }

    #[test]
    fn test_render_unit_axes() {
        let text = render(&unit_axes());
        let expected = [
            "x-raw", "3", "0 0 1.000", "328 328 0.000", "655 655 0.000",
            "y-raw", "3", "0 0 0.000", "328 328 1.000", "655 655 0.000",
            "z-raw", "3", "0 0 0.000", "328 328 0.000", "655 655 1.000",
            "total-raw", "3", "0 0 1.000", "328 328 1.000", "655 655 1.000",
        ]
        .join("\n");
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_empty_recording() {
        let text = render(&Recording::new());
        assert_eq!(text, "x-raw\n0\ny-raw\n0\nz-raw\n0\ntotal-raw\n0");
    }

    #[test]
    fn test_total_is_rounded_magnitude() {
        let mut recording = Recording::new();
        recording.append(sample(0, 0.3, -0.4, 1.2));
        let channels = build_channels(&recording);
        assert_eq!(channels[3].name, "total-raw");
        assert!((channels[3].points[0].1 - 1.3).abs() < 1e-9);
        assert!(render(&recording).ends_with("0 0 1.300"));
    }

    #[test]
    fn test_negative_values_keep_sign() {
        let mut recording = Recording::new();
        recording.append(sample(1000, -0.988, 0.004, -2.0));
        let text = render(&recording);
        assert!(text.contains("32768 32768 -0.988"));
        assert!(text.contains("32768 32768 -2.000"));
    }

    #[test]
    fn test_channel_order_follows_recording() {
        let mut recording = Recording::new();
        for i in 0..50u64 {
            recording.append(sample(i * 7, i as f64, 0.0, 0.0));
        }
        let channels = build_channels(&recording);
        for channel in &channels {
            assert_eq!(channel.points.len(), 50);
        }
        let xs: Vec<f64> = channels[0].points.iter().map(|p| p.1).collect();
        let expected: Vec<f64> = (0..50).map(|i| i as f64).collect();
        assert_eq!(xs, expected);
    }

    #[test]
    fn test_render_is_repeatable() {
        let recording = unit_axes();
        assert_eq!(render(&recording), render(&recording));
    }

    #[test]
    fn test_write_signals_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.signals.out");
        std::fs::write(&path, "stale content that is much longer than the export").unwrap();

        let written = write_signals(&path, &unit_axes()).unwrap();
        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert_eq!(on_disk, render(&unit_axes()));
        assert_eq!(written, on_disk.len());
    }

    #[test]
    fn test_write_signals_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.signals.out");
        let err = write_signals(&path, &unit_axes()).unwrap_err();
        assert!(matches!(err, crate::error::RecorderError::Io(_)));
    }
}
