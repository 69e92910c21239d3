//! In-memory recording of timestamped acceleration samples

/// One acceleration reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Milliseconds since sampling began
    pub elapsed_ms: u64,
    /// X-axis acceleration in g
    pub x: f64,
    /// Y-axis acceleration in g
    pub y: f64,
    /// Z-axis acceleration in g
    pub z: f64,
}

impl Sample {
    /// Euclidean magnitude of the acceleration vector in g
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Append-only, insertion-ordered sequence of samples
///
/// The collector is the only writer; the exporter reads it once after
/// collection has stopped.
#[derive(Debug, Default, Clone)]
pub struct Recording {
    samples: Vec<Sample>,
}

impl Recording {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample at the end
    pub fn append(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// All samples in the order they were appended
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Timestamp of the last sample, 0 when empty
    pub fn duration_ms(&self) -> u64 {
        self.samples.last().map_or(0, |s| s.elapsed_ms)
    }
}
