//! # Domain Layer
//!
//! Core types and collaborator contracts of the session monitor, free of
//! any runtime or UI concern.
//!
//! ## Structure
//!
//! - **entities**: SessionInfo, MonitorState, ActivityEvent and their
//!   delivery traits
//! - **collaborators**: prompt, credential storage and navigation seams
//!
//! ## Design Principles
//!
//! - No dependencies on the application layer
//! - Traits define every outward surface so tests run without a UI or network
//! - Entities encapsulate the little domain behavior there is (expiry math,
//!   payload validation)

pub mod collaborators;
pub mod entities;

// Re-export commonly used types
pub use collaborators::*;
pub use entities::*;
