pub mod devices;
pub mod run;
