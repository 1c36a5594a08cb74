//! Background tasks

pub mod file_sweep;

pub use file_sweep::spawn_file_sweep_task;
