//! # Configuration Module
//!
//! This module handles monitor configuration loading and management.
//! Configuration can be loaded from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config/default.toml, config/{environment}.toml)
//! - .env files (via dotenvy)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use session_monitor::config::Settings;
//!
//! let settings = Settings::load()?;
//! println!("Warning after {}s of inactivity", settings.inactivity.warning_after_secs);
//! ```

mod settings;

pub use settings::*;
