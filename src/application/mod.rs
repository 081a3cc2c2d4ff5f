//! Application Layer
//!
//! Orchestrates the domain types into the running monitor: timer tasks,
//! pulse aggregation, teardown and the start/stop facade.

pub mod services;

pub use services::SessionMonitor;
