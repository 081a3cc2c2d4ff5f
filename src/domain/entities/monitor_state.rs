//! Monitor lifecycle states.

use serde::{Deserialize, Serialize};

/// Lifecycle state of one timer subsystem.
///
/// The inactivity and absolute timers each track their own state; both
/// terminate in `LoggedOut` through the shared teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MonitorState {
    /// Not monitoring (never started, or stopped)
    #[default]
    Stopped,

    /// Monitoring, no warning pending
    Idle,

    /// Warning dialog pending a user decision
    WarningShown,

    /// Teardown has been invoked by this subsystem
    LoggedOut,
}

impl MonitorState {
    /// String representation for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Idle => "idle",
            Self::WarningShown => "warning_shown",
            Self::LoggedOut => "logged_out",
        }
    }
}

impl std::fmt::Display for MonitorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which timer subsystem raised a warning.
///
/// Passed to the confirmation prompt so the UI can phrase the dialog: an
/// inactivity warning offers to keep the session alive, a session-expiry
/// warning can only announce the remaining time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Idle past the inactivity threshold; "stay active" re-arms the timer
    Inactivity,

    /// Server-issued expiration is near; "stay active" only dismisses the dialog
    SessionExpiry,
}

impl WarningKind {
    /// String representation for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inactivity => "inactivity",
            Self::SessionExpiry => "session_expiry",
        }
    }
}

impl std::fmt::Display for WarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
