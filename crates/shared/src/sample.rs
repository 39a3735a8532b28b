use std::fmt;

use crate::config::BYTES_PER_SAMPLE;
use crate::error::BenchError;

/// Number of (x, y) points drawn by one estimator invocation. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SampleCount(u64);

impl SampleCount {
    pub fn new(samples: u64) -> Result<Self, BenchError> {
        if samples == 0 {
            return Err(BenchError::InvalidSampleCount(0));
        }
        Ok(Self(samples))
    }

    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }

    pub fn memory_gb(self) -> f64 {
        memory_gb(self.0)
    }
}

impl TryFrom<u64> for SampleCount {
    type Error = BenchError;

    fn try_from(samples: u64) -> Result<Self, Self::Error> {
        Self::new(samples)
    }
}

impl TryFrom<i64> for SampleCount {
    type Error = BenchError;

    fn try_from(samples: i64) -> Result<Self, Self::Error> {
        if samples <= 0 {
            return Err(BenchError::InvalidSampleCount(samples as i128));
        }
        Self::new(samples as u64)
    }
}

impl fmt::Display for SampleCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Memory footprint of a materialized batch: two 4-byte buffers per sample.
#[inline]
pub fn memory_gb(samples: u64) -> f64 {
    samples as f64 * BYTES_PER_SAMPLE as f64 / 1e9
}

#[inline]
pub fn pi_from_count(in_circle: u64, samples: SampleCount) -> f64 {
    4.0 * in_circle as f64 / samples.as_f64()
}
