//! Application Services
//!
//! The monitor's moving parts: the activity aggregator, the two timer
//! subsystems, the shared teardown, credential decoding, and the facade
//! that composes them.

pub mod absolute_timer;
pub mod activity_aggregator;
pub mod credentials;
pub mod inactivity_timer;
pub mod monitor;
pub mod teardown;

pub use absolute_timer::AbsoluteTimer;
pub use activity_aggregator::ActivityAggregator;
pub use inactivity_timer::InactivityTimer;
pub use monitor::SessionMonitor;
pub use teardown::SessionTeardown;
