//! Raw user-activity events and the source trait that delivers them.

use tokio::sync::mpsc;

/// A raw interaction signal, before debouncing.
///
/// Mirrors the interaction set the monitor watches: pointer movement, key
/// presses, clicks, scrolling, touch, plus completed HTTP traffic from the
/// application itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityEvent {
    PointerMove,
    KeyDown,
    Click,
    Scroll,
    TouchStart,
    HttpTraffic,
}

impl ActivityEvent {
    /// String representation for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PointerMove => "pointer_move",
            Self::KeyDown => "key_down",
            Self::Click => "click",
            Self::Scroll => "scroll",
            Self::TouchStart => "touch_start",
            Self::HttpTraffic => "http_traffic",
        }
    }
}

impl std::fmt::Display for ActivityEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Source of raw activity events.
///
/// Implemented by the embedding application over its event system (window
/// listeners, an HTTP interceptor, ...). Dropping the returned receiver is
/// the unsubscribe: the source observes the closed channel and detaches
/// its listeners.
#[cfg_attr(test, mockall::automock)]
pub trait ActivitySource: Send + Sync {
    /// Begin delivering raw activity events on the returned channel.
    fn subscribe(&self) -> mpsc::UnboundedReceiver<ActivityEvent>;
}
