//! Monitor settings and configuration structures.

use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Root configuration structure containing all monitor settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Activity aggregation configuration (debounce window)
    pub activity: ActivitySettings,

    /// Inactivity timer configuration (warning threshold, response window)
    pub inactivity: InactivitySettings,

    /// Absolute session timer configuration (warning lead time)
    pub absolute: AbsoluteSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// Activity signal aggregation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivitySettings {
    /// Debounce window in milliseconds; bursts of raw interaction events
    /// within this window collapse into a single activity pulse
    pub debounce_ms: u64,
}

/// Inactivity timer configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct InactivitySettings {
    /// Idle time without an activity pulse before the warning is shown,
    /// in seconds (default: 780 = 13 minutes)
    pub warning_after_secs: u64,

    /// Time the user has to answer the warning before a forced logout,
    /// in seconds (default: 60)
    pub response_window_secs: u64,
}

/// Absolute session timer configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AbsoluteSettings {
    /// How long before the server-issued expiration the warning is shown,
    /// in seconds (default: 60). The warning is skipped entirely when less
    /// than this remains at seed time.
    pub warning_lead_secs: u64,
}

/// Smallest debounce window that still coalesces event bursts meaningfully.
pub const MIN_DEBOUNCE_MS: u64 = 100;

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. built-in defaults
    /// 2. config/default.toml (base configuration)
    /// 3. config/{RUN_ENV}.toml (environment-specific overrides)
    /// 4. Environment variables (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed,
    /// or if the debounce window is below [`MIN_DEBOUNCE_MS`].
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        // Determine the running environment
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("activity.debounce_ms", 750_i64)?
            .set_default("inactivity.warning_after_secs", 780_i64)?
            .set_default("inactivity.response_window_secs", 60_i64)?
            .set_default("absolute.warning_lead_secs", 60_i64)?
            // Load from config files
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Load from environment variables
            // APP__INACTIVITY__WARNING_AFTER_SECS=900 -> inactivity.warning_after_secs = 900
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
            .and_then(|settings: Self| {
                if settings.activity.debounce_ms < MIN_DEBOUNCE_MS {
                    return Err(ConfigError::Message(format!(
                        "Activity debounce must be at least {}ms to coalesce event bursts. Current: {}ms",
                        MIN_DEBOUNCE_MS, settings.activity.debounce_ms
                    )));
                }
                Ok(settings)
            })
    }
}

impl ActivitySettings {
    /// Debounce window as a `Duration`.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl InactivitySettings {
    /// Idle threshold before the warning as a `Duration`.
    pub fn warning_after(&self) -> Duration {
        Duration::from_secs(self.warning_after_secs)
    }

    /// Warning response window as a `Duration`.
    pub fn response_window(&self) -> Duration {
        Duration::from_secs(self.response_window_secs)
    }
}

impl AbsoluteSettings {
    /// Warning lead time as a `Duration`.
    pub fn warning_lead(&self) -> Duration {
        Duration::from_secs(self.warning_lead_secs)
    }
}

impl Default for Settings {
    /// Built-in defaults, matching `load()` without any file or
    /// environment overrides. Convenient for embedding and tests.
    fn default() -> Self {
        Self {
            activity: ActivitySettings { debounce_ms: 750 },
            inactivity: InactivitySettings {
                warning_after_secs: 780,
                response_window_secs: 60,
            },
            absolute: AbsoluteSettings {
                warning_lead_secs: 60,
            },
            environment: "development".into(),
        }
    }
}
