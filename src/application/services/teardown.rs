//! Session Teardown
//!
//! Terminal action shared by both timer subsystems and the monitor facade.
//! Performs, in order: a best-effort logout call, local credential clear,
//! and navigation to the entry route. Idempotent: the inactivity and
//! absolute timers may race to invoke it within the same tick, and the
//! second caller must be a no-op.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::{CredentialStore, Navigator, SessionGateway};

/// Idempotent session teardown.
pub struct SessionTeardown {
    gateway: Arc<dyn SessionGateway>,
    credentials: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
    /// Shared with the facade; `stop()` clears it before broadcasting
    /// shutdown, so a timer that already fired cannot tear down afterwards.
    monitoring: Arc<AtomicBool>,
    torn_down: AtomicBool,
    shutdown_tx: watch::Sender<bool>,
}

impl SessionTeardown {
    /// Create a teardown collaborator for one monitoring session.
    pub fn new(
        gateway: Arc<dyn SessionGateway>,
        credentials: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
        monitoring: Arc<AtomicBool>,
        shutdown_tx: watch::Sender<bool>,
    ) -> Self {
        Self {
            gateway,
            credentials,
            navigator,
            monitoring,
            torn_down: AtomicBool::new(false),
            shutdown_tx,
        }
    }

    /// Tear the session down. First caller wins; subsequent calls and
    /// calls after `stop()` are logged no-ops.
    ///
    /// The logout call is best-effort: network failure is logged and
    /// swallowed, local cleanup and navigation always proceed.
    pub async fn execute(&self, reason: &'static str) {
        if !self.monitoring.load(Ordering::SeqCst) {
            tracing::debug!(reason, "Teardown skipped: monitor no longer active");
            return;
        }

        if self.torn_down.swap(true, Ordering::SeqCst) {
            tracing::debug!(reason, "Teardown already performed");
            return;
        }

        self.monitoring.store(false, Ordering::SeqCst);
        tracing::info!(reason, "Tearing down session");

        if let Err(e) = self.gateway.logout().await {
            tracing::warn!(error = %e, "Logout call failed; proceeding with local teardown");
        }

        self.credentials.clear_session();
        self.navigator.redirect_to_entry();

        // Stand the sibling timer tasks down
        let _ = self.shutdown_tx.send(true);
    }

    /// Whether teardown has already run for this monitoring session.
    pub fn has_run(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }
}
