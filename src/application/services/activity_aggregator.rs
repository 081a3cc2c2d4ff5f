//! Activity Signal Aggregator
//!
//! Merges raw interaction events (pointer, keyboard, scroll, touch, HTTP
//! traffic) into debounced activity pulses for the inactivity timer.
//! Leading-edge debounce: the first event of a burst emits a pulse
//! immediately, the rest of the burst is swallowed until the window
//! elapses. Pulses are coalescing unit signals, so the pulse channel never
//! needs more than one slot; a full channel simply means the timer already
//! has a pending reset.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::config::ActivitySettings;
use crate::domain::ActivitySource;

/// Debouncing bridge between an [`ActivitySource`] and the pulse channel.
pub struct ActivityAggregator {
    debounce: Duration,
    source: Arc<dyn ActivitySource>,
}

impl ActivityAggregator {
    /// Create an aggregator from settings and an injected source.
    pub fn new(settings: &ActivitySettings, source: Arc<dyn ActivitySource>) -> Self {
        Self {
            debounce: settings.debounce(),
            source,
        }
    }

    /// Spawn the aggregation task. It exits when the shutdown watch flips,
    /// the source closes, or the pulse receiver is dropped; its raw-event
    /// subscription is released on exit.
    pub fn spawn(
        self,
        pulse_tx: mpsc::Sender<()>,
        shutdown_rx: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        tokio::spawn(self.run(pulse_tx, shutdown_rx))
    }

    async fn run(self, pulse_tx: mpsc::Sender<()>, mut shutdown_rx: watch::Receiver<bool>) {
        let mut raw_rx = self.source.subscribe();
        tracing::debug!(debounce_ms = self.debounce.as_millis() as u64, "Activity aggregation started");

        loop {
            tokio::select! {
                res = shutdown_rx.changed() => {
                    if res.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
                event = raw_rx.recv() => {
                    let Some(event) = event else {
                        tracing::debug!("Activity source closed");
                        break;
                    };
                    tracing::trace!(event = %event, "Activity observed");

                    match pulse_tx.try_send(()) {
                        Ok(()) => {}
                        // A pulse is already queued; this burst coalesces into it
                        Err(mpsc::error::TrySendError::Full(())) => {}
                        Err(mpsc::error::TrySendError::Closed(())) => break,
                    }

                    // Swallow the rest of the burst
                    let window = sleep(self.debounce);
                    tokio::pin!(window);
                    loop {
                        tokio::select! {
                            _ = &mut window => break,
                            res = shutdown_rx.changed() => {
                                if res.is_err() || *shutdown_rx.borrow() {
                                    return;
                                }
                            }
                            more = raw_rx.recv() => {
                                if more.is_none() {
                                    tracing::debug!("Activity source closed");
                                    return;
                                }
                            }
                        }
                    }
                }
            }
        }
        // Dropping raw_rx here is the unsubscribe
    }
}
