//! Absolute Session Timer
//!
//! Server-authoritative counterpart to the inactivity timer. Seeded exactly
//! once per start from the backend-reported session lifetime; never touched
//! by activity. The expiry warning can be dismissed, but dismissal only
//! closes the dialog: the logout at the expiration timestamp still stands.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::config::AbsoluteSettings;
use crate::domain::{ConfirmationPrompt, MonitorState, SessionGateway, WarningKind};

use super::teardown::SessionTeardown;

/// Backend-driven session-lifetime watchdog.
pub struct AbsoluteTimer {
    warning_lead: Duration,
    gateway: Arc<dyn SessionGateway>,
    prompt: Arc<dyn ConfirmationPrompt>,
    teardown: Arc<SessionTeardown>,
    state: Arc<Mutex<MonitorState>>,
}

impl AbsoluteTimer {
    /// Create an absolute timer. `state` is the facade-observable state
    /// slot for this subsystem.
    pub fn new(
        settings: &AbsoluteSettings,
        gateway: Arc<dyn SessionGateway>,
        prompt: Arc<dyn ConfirmationPrompt>,
        teardown: Arc<SessionTeardown>,
        state: Arc<Mutex<MonitorState>>,
    ) -> Self {
        Self {
            warning_lead: settings.warning_lead(),
            gateway,
            prompt,
            teardown,
            state,
        }
    }

    /// Spawn the timer task. Fetches session info once; on fetch failure the
    /// task exits without arming anything and inactivity monitoring carries
    /// on unaffected.
    pub fn spawn(self, shutdown_rx: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown_rx))
    }

    fn set_state(&self, next: MonitorState) {
        let mut state = self.state.lock();
        if *state != next {
            tracing::debug!(from = %state, to = %next, "Absolute timer state change");
            *state = next;
        }
    }

    /// Sleep for `duration` unless shutdown arrives first; returns false on
    /// shutdown.
    async fn wait(&self, duration: Duration, shutdown_rx: &mut watch::Receiver<bool>) -> bool {
        let timer = sleep(duration);
        tokio::pin!(timer);
        loop {
            tokio::select! {
                _ = &mut timer => return true,
                res = shutdown_rx.changed() => {
                    if res.is_err() || *shutdown_rx.borrow() {
                        return false;
                    }
                }
            }
        }
    }

    async fn expire(&self, reason: &'static str) {
        self.set_state(MonitorState::LoggedOut);
        self.teardown.execute(reason).await;
    }

    async fn run(self, mut shutdown_rx: watch::Receiver<bool>) {
        let info = match self.gateway.fetch_session_info().await {
            Ok(info) => info,
            Err(e) => {
                tracing::warn!(error = %e, "Session info fetch failed; absolute timers not armed");
                return;
            }
        };
        if let Err(e) = info.validate() {
            tracing::warn!(error = %e, "Session info rejected; absolute timers not armed");
            return;
        }

        // All timer math derives from this single sample
        let remaining = match info.remaining(Utc::now()).to_std() {
            Ok(d) if !d.is_zero() => d,
            _ => {
                tracing::info!(
                    expiration = %info.expiration_time,
                    "Session already expired; logging out"
                );
                self.expire("session_expired").await;
                return;
            }
        };

        self.set_state(MonitorState::Idle);
        tracing::debug!(
            remaining_secs = remaining.as_secs(),
            expiration = %info.expiration_time,
            "Absolute session timer armed"
        );

        if remaining <= self.warning_lead {
            tracing::warn!(
                remaining_secs = remaining.as_secs(),
                "Less than the warning lead remains; skipping expiry warning"
            );
            if !self.wait(remaining, &mut shutdown_rx).await {
                self.set_state(MonitorState::Stopped);
                return;
            }
            self.expire("session_expired").await;
            return;
        }

        if !self.wait(remaining - self.warning_lead, &mut shutdown_rx).await {
            self.set_state(MonitorState::Stopped);
            return;
        }

        self.set_state(MonitorState::WarningShown);
        tracing::info!(
            lead_secs = self.warning_lead.as_secs(),
            "Session expiry warning shown"
        );

        // The dialog races the expiration itself; there is no separate
        // countdown that could outlive the session
        let expiry = sleep(self.warning_lead);
        tokio::pin!(expiry);
        let decision = self.prompt.confirm_stay_active(WarningKind::SessionExpiry);
        tokio::pin!(decision);

        loop {
            tokio::select! {
                res = shutdown_rx.changed() => {
                    if res.is_err() || *shutdown_rx.borrow() {
                        self.set_state(MonitorState::Stopped);
                        return;
                    }
                }
                _ = &mut expiry => {
                    self.expire("session_expired").await;
                    return;
                }
                stay = &mut decision => {
                    if stay {
                        // Dismissal only; the logout at expiration stands
                        tracing::info!("Expiry warning dismissed; logout at expiration stands");
                        self.set_state(MonitorState::Idle);
                        if !self.wait_for_expiry(&mut expiry, &mut shutdown_rx).await {
                            self.set_state(MonitorState::Stopped);
                            return;
                        }
                        self.expire("session_expired").await;
                    } else {
                        tracing::info!("User chose to log out before expiration");
                        self.expire("user_logout").await;
                    }
                    return;
                }
            }
        }
    }

    /// Wait out an already-armed expiry sleep; returns false on shutdown.
    async fn wait_for_expiry(
        &self,
        expiry: &mut std::pin::Pin<&mut tokio::time::Sleep>,
        shutdown_rx: &mut watch::Receiver<bool>,
    ) -> bool {
        loop {
            tokio::select! {
                _ = expiry.as_mut() => return true,
                res = shutdown_rx.changed() => {
                    if res.is_err() || *shutdown_rx.borrow() {
                        return false;
                    }
                }
            }
        }
    }
}
