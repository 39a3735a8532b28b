#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    #[error("Invalid sample count {0}: must be a positive integer")]
    InvalidSampleCount(i128),
    #[error("Invalid run count: at least one run is required")]
    InvalidRunCount,
    #[error("No sample counts configured")]
    NoSampleCounts,
    #[error("Device {index} unavailable ({available} device(s) detected)")]
    DeviceUnavailable { index: usize, available: usize },
    #[error("Device initialization failed: {0}")]
    DeviceInit(String),
    #[error("Device allocation failed for {samples} samples")]
    DeviceAllocation { samples: u64 },
}
