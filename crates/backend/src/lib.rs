pub mod backend;
pub mod device;
pub mod parallel;
pub mod sequential;

pub use backend::{estimate, in_unit_circle, Backend};
pub use device::{available_devices, DeviceBackend, DeviceBuffer, DeviceInfo};
pub use parallel::{ParallelBackend, Partition, PartitionedPairs};
pub use sequential::{LazyPairs, SequentialBackend};
