//! Session lifetime entity and gateway trait.
//!
//! Maps to the session-info endpoint payload reported by the backend at
//! login. Fetched once per monitoring session and never mutated; the
//! absolute session timer owns the only copy.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::MonitorError;

/// Server-reported session lifetime.
///
/// Both timestamps arrive as ISO-8601 strings:
/// - loginTime: when the backend issued the session
/// - expirationTime: when the backend will stop honoring it
///
/// The expiration is authoritative and server-driven; nothing the client
/// does extends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    /// When the backend issued the session
    pub login_time: DateTime<Utc>,

    /// When the backend will stop honoring the session
    pub expiration_time: DateTime<Utc>,
}

impl SessionInfo {
    /// Create a session lifetime record.
    pub fn new(login_time: DateTime<Utc>, expiration_time: DateTime<Utc>) -> Self {
        Self {
            login_time,
            expiration_time,
        }
    }

    /// Time left until expiration, negative once expired.
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        self.expiration_time - now
    }

    /// Check whether the session has already expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiration_time <= now
    }

    /// Parse and validate a raw session-info endpoint payload.
    pub fn from_json(payload: &str) -> Result<Self, MonitorError> {
        let info: Self = serde_json::from_str(payload)
            .map_err(|e| MonitorError::InvalidSessionInfo(e.to_string()))?;
        info.validate()?;
        Ok(info)
    }

    /// Reject payloads whose expiration precedes the login timestamp.
    pub fn validate(&self) -> Result<(), MonitorError> {
        if self.expiration_time < self.login_time {
            return Err(MonitorError::InvalidSessionInfo(format!(
                "expiration {} precedes login {}",
                self.expiration_time, self.login_time
            )));
        }
        Ok(())
    }
}

/// Gateway trait for the backend session endpoints.
///
/// Implemented by the embedding application over its HTTP client; the
/// monitor only consumes the interface.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionGateway: Send + Sync {
    /// Fetch the current session lifetime from the session-info endpoint.
    async fn fetch_session_info(&self) -> Result<SessionInfo, MonitorError>;

    /// Invalidate the session server-side (bearer-token POST, no body).
    /// Best-effort: callers proceed with local teardown on failure.
    async fn logout(&self) -> Result<(), MonitorError>;
}
