pub mod config;
pub mod error;
pub mod result;
pub mod sample;

pub use error::BenchError;
pub use sample::SampleCount;
