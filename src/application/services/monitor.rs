//! Session Monitor Facade
//!
//! Composes the activity aggregator, the inactivity timer and the absolute
//! session timer over one shared teardown, and owns their lifecycle. The
//! two timer subsystems stay independent on purpose: only the inactivity
//! window resets on activity, while the absolute expiry is server-driven
//! and never client-extendable.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::config::Settings;
use crate::domain::{
    ActivitySource, ConfirmationPrompt, CredentialStore, MonitorState, Navigator, SessionGateway,
};

use super::absolute_timer::AbsoluteTimer;
use super::activity_aggregator::ActivityAggregator;
use super::credentials;
use super::inactivity_timer::InactivityTimer;
use super::teardown::SessionTeardown;

/// Handles of one monitoring session.
struct Running {
    shutdown_tx: watch::Sender<bool>,
    handles: Vec<JoinHandle<()>>,
}

/// Inactivity and session-timeout monitor.
///
/// `start()`/`stop()` are idempotent and callable in any order; timers that
/// were armed before `stop()` have no observable effect afterwards. Must be
/// used inside a tokio runtime.
pub struct SessionMonitor {
    settings: Settings,
    source: Arc<dyn ActivitySource>,
    gateway: Arc<dyn SessionGateway>,
    prompt: Arc<dyn ConfirmationPrompt>,
    credentials: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
    monitoring: Arc<AtomicBool>,
    inactivity_state: Arc<Mutex<MonitorState>>,
    absolute_state: Arc<Mutex<MonitorState>>,
    running: Mutex<Option<Running>>,
}

impl SessionMonitor {
    /// Wire a monitor from settings and the injected collaborators.
    pub fn new(
        settings: Settings,
        source: Arc<dyn ActivitySource>,
        gateway: Arc<dyn SessionGateway>,
        prompt: Arc<dyn ConfirmationPrompt>,
        credentials: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            settings,
            source,
            gateway,
            prompt,
            credentials,
            navigator,
            monitoring: Arc::new(AtomicBool::new(false)),
            inactivity_state: Arc::new(Mutex::new(MonitorState::Stopped)),
            absolute_state: Arc::new(Mutex::new(MonitorState::Stopped)),
            running: Mutex::new(None),
        }
    }

    /// Begin monitoring. No-op while already running; also a no-op when no
    /// authenticated user exists (missing, malformed or expired token).
    pub fn start(&self) {
        let mut running = self.running.lock();
        if running.is_some() {
            if self.monitoring.load(Ordering::SeqCst) {
                tracing::debug!("Monitor already running; start ignored");
                return;
            }
            // Previous session tore itself down; its tasks are gone
            *running = None;
        }

        let Some(token) = self.credentials.access_token() else {
            tracing::debug!("No access token present; monitor not started");
            return;
        };
        let claims = match credentials::decode_claims(&token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "Access token not usable; monitor not started");
                return;
            }
        };

        tracing::info!(subject = %claims.sub, "Starting session monitor");

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        self.monitoring.store(true, Ordering::SeqCst);
        let teardown = Arc::new(SessionTeardown::new(
            self.gateway.clone(),
            self.credentials.clone(),
            self.navigator.clone(),
            self.monitoring.clone(),
            shutdown_tx.clone(),
        ));

        // Coalescing pulse channel: one queued pulse is all the timer needs
        let (pulse_tx, pulse_rx) = mpsc::channel(1);

        let aggregator = ActivityAggregator::new(&self.settings.activity, self.source.clone());
        let inactivity = InactivityTimer::new(
            &self.settings.inactivity,
            self.prompt.clone(),
            teardown.clone(),
            self.inactivity_state.clone(),
        );
        let absolute = AbsoluteTimer::new(
            &self.settings.absolute,
            self.gateway.clone(),
            self.prompt.clone(),
            teardown,
            self.absolute_state.clone(),
        );

        let handles = vec![
            aggregator.spawn(pulse_tx, shutdown_rx.clone()),
            inactivity.spawn(pulse_rx, shutdown_rx.clone()),
            absolute.spawn(shutdown_rx),
        ];

        *running = Some(Running {
            shutdown_tx,
            handles,
        });
    }

    /// Stop monitoring: cancel every pending timer and release the activity
    /// subscription. Safe to call multiple times.
    pub fn stop(&self) {
        let mut running = self.running.lock();
        let Some(session) = running.take() else {
            tracing::debug!("Monitor not running; stop ignored");
            return;
        };

        // Clear the flag before broadcasting so a timer that already fired
        // cannot tear down afterwards
        self.monitoring.store(false, Ordering::SeqCst);
        let _ = session.shutdown_tx.send(true);
        drop(session.handles);

        *self.inactivity_state.lock() = MonitorState::Stopped;
        *self.absolute_state.lock() = MonitorState::Stopped;
        tracing::info!("Session monitor stopped");
    }

    /// Whether a monitoring session is active (false again after a forced
    /// logout).
    pub fn is_monitoring(&self) -> bool {
        self.monitoring.load(Ordering::SeqCst)
    }

    /// Current state of the inactivity subsystem.
    pub fn inactivity_state(&self) -> MonitorState {
        *self.inactivity_state.lock()
    }

    /// Current state of the absolute-session subsystem.
    pub fn absolute_state(&self) -> MonitorState {
        *self.absolute_state.lock()
    }
}

impl Drop for SessionMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}
