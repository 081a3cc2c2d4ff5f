//! # Session Monitor Library
//!
//! This crate watches user activity and absolute session lifetime for a
//! client application, forcing a logout when either:
//! - the user stays idle past a threshold and does not answer a warning, or
//! - the backend-issued session expiration is reached.
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core entities and the collaborator traits the
//!   embedding application implements (activity source, session gateway,
//!   confirmation prompt, credential store, navigator)
//! - **Application Layer**: The timer state machines, pulse aggregation,
//!   teardown and the `SessionMonitor` facade
//!
//! ## Module Structure
//!
//! ```text
//! session_monitor/
//! +-- config/        Configuration management
//! +-- domain/        Entities and collaborator traits
//! +-- application/   Timer services and the monitor facade
//! +-- shared/        Common utilities (errors)
//! +-- telemetry/     Structured logging setup
//! ```
//!
//! ## Key asymmetry
//!
//! The inactivity window is client-renewable: every activity pulse fully
//! re-arms it, and a "stay active" answer restarts it. The absolute session
//! timer is server-authoritative: seeded once per `start()`, never touched
//! by activity, and its warning dialog cannot postpone the logout at the
//! expiration timestamp.

// Configuration module
pub mod config;

// Domain layer - Core types and collaborator contracts
pub mod domain;

// Application layer - Timer services and facade
pub mod application;

// Shared utilities
pub mod shared;

// Telemetry and observability
pub mod telemetry;
