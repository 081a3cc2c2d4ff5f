//! Monitor Error Types
//!
//! Centralized error handling for the session monitor.
//!
//! No variant here is fatal: every failure mode degrades toward "log the
//! user out / leave them logged out", never toward blocking the UI.

/// Monitor error type
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// Transport failure talking to the session-info or logout endpoint.
    #[error("Session gateway error: {0}")]
    Gateway(String),

    /// The session-info payload could not be interpreted (bad timestamps,
    /// expiration before login, and the like).
    #[error("Invalid session info: {0}")]
    InvalidSessionInfo(String),

    /// The stored access token could not be decoded. Treated upstream as
    /// "no authenticated user"; never surfaced to the UI.
    #[error("Token decode failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Configuration loading or validation failure.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
