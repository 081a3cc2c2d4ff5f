//! Inactivity Timer
//!
//! Tracks idle duration since the last activity pulse and walks the
//! `Idle -> WarningShown -> {Idle, LoggedOut}` state machine. An activity
//! pulse while idle fully cancels and re-arms the warning timer; pulses
//! during the warning are ignored so that background HTTP polling cannot
//! silently dismiss a warning the user has not seen. Only the explicit
//! prompt answer or the countdown expiring resolves the warning.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};

use crate::config::InactivitySettings;
use crate::domain::{ConfirmationPrompt, MonitorState, WarningKind};

use super::teardown::SessionTeardown;

/// Client-renewable idle watchdog.
pub struct InactivityTimer {
    warning_after: Duration,
    response_window: Duration,
    prompt: Arc<dyn ConfirmationPrompt>,
    teardown: Arc<SessionTeardown>,
    state: Arc<Mutex<MonitorState>>,
}

impl InactivityTimer {
    /// Create an inactivity timer. `state` is the facade-observable state
    /// slot for this subsystem.
    pub fn new(
        settings: &InactivitySettings,
        prompt: Arc<dyn ConfirmationPrompt>,
        teardown: Arc<SessionTeardown>,
        state: Arc<Mutex<MonitorState>>,
    ) -> Self {
        Self {
            warning_after: settings.warning_after(),
            response_window: settings.response_window(),
            prompt,
            teardown,
            state,
        }
    }

    /// Spawn the timer task. Exactly one warning cycle is armed at a time;
    /// the task exits on shutdown or after invoking teardown.
    pub fn spawn(
        self,
        pulse_rx: mpsc::Receiver<()>,
        shutdown_rx: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        tokio::spawn(self.run(pulse_rx, shutdown_rx))
    }

    fn set_state(&self, next: MonitorState) {
        let mut state = self.state.lock();
        if *state != next {
            tracing::debug!(from = %state, to = %next, "Inactivity timer state change");
            *state = next;
        }
    }

    async fn run(self, mut pulse_rx: mpsc::Receiver<()>, mut shutdown_rx: watch::Receiver<bool>) {
        self.set_state(MonitorState::Idle);
        tracing::debug!(
            warning_after_secs = self.warning_after.as_secs(),
            "Inactivity monitoring started"
        );
        let mut pulses_open = true;

        loop {
            // Idle: one armed warning timer, fully re-armed on every pulse
            let armed = sleep(self.warning_after);
            tokio::pin!(armed);
            loop {
                tokio::select! {
                    res = shutdown_rx.changed() => {
                        if res.is_err() || *shutdown_rx.borrow() {
                            self.set_state(MonitorState::Stopped);
                            return;
                        }
                    }
                    pulse = pulse_rx.recv(), if pulses_open => {
                        match pulse {
                            Some(()) => {
                                armed.as_mut().reset(Instant::now() + self.warning_after);
                                tracing::trace!("Activity pulse; warning timer re-armed");
                            }
                            // Aggregator gone; the armed timer still stands
                            None => pulses_open = false,
                        }
                    }
                    _ = &mut armed => break,
                }
            }

            self.set_state(MonitorState::WarningShown);
            tracing::info!(
                response_window_secs = self.response_window.as_secs(),
                "Inactivity warning shown"
            );

            let countdown = sleep(self.response_window);
            tokio::pin!(countdown);
            let decision = self.prompt.confirm_stay_active(WarningKind::Inactivity);
            tokio::pin!(decision);

            tokio::select! {
                res = shutdown_rx.changed() => {
                    if res.is_err() || *shutdown_rx.borrow() {
                        self.set_state(MonitorState::Stopped);
                        return;
                    }
                }
                _ = &mut countdown => {
                    tracing::info!("Inactivity warning unanswered; forcing logout");
                    self.set_state(MonitorState::LoggedOut);
                    self.teardown.execute("inactivity_timeout").await;
                    return;
                }
                stay = &mut decision => {
                    if stay {
                        // Countdown drops here, before the warning timer is
                        // re-armed. Pulses queued while the warning was up
                        // are stale; discard them.
                        while pulse_rx.try_recv().is_ok() {}
                        tracing::info!("User chose to stay active; resuming idle monitoring");
                        self.set_state(MonitorState::Idle);
                    } else {
                        tracing::info!("User chose to log out");
                        self.set_state(MonitorState::LoggedOut);
                        self.teardown.execute("user_logout").await;
                        return;
                    }
                }
            }
        }
    }
}
