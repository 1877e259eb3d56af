//! PathBench library — application logic for the benchmark harness CLI.

pub mod app;
pub mod completion;
pub mod config;
pub mod presenter;
