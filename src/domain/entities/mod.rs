//! # Domain Entities
//!
//! Core entities of the session monitor.
//!
//! - **SessionInfo**: server-reported session lifetime, seeded once per start
//! - **MonitorState**: lifecycle of one timer subsystem
//! - **ActivityEvent**: raw interaction signal, pre-debounce
//!
//! Collaborator traits live next to the entity they deliver
//! ([`SessionGateway`] with [`SessionInfo`], [`ActivitySource`] with
//! [`ActivityEvent`]); implementations belong to the embedding application.

mod activity;
mod monitor_state;
mod session_info;

pub use activity::{ActivityEvent, ActivitySource};
pub use monitor_state::{MonitorState, WarningKind};
pub use session_info::{SessionGateway, SessionInfo};

#[cfg(test)]
pub use activity::MockActivitySource;
#[cfg(test)]
pub use session_info::MockSessionGateway;
