pub mod report;
pub mod runner;
pub mod sysinfo;
