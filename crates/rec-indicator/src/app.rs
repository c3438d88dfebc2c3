use crate::{AppResult, UiCommand, UiSink};

use rec_indicator_core::{ConnectionListener, ConnectionSettings, HANDOFF_CAPACITY};

use std::{future::Future, io, time::Duration};

use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, instrument, warn};

/// How long shutdown waits for the listener to close its session.
const LISTENER_STOP_TIMEOUT: Duration = Duration::from_secs(1);

/// Runtime side of the application.
///
/// Runs on the async runtime thread. Owns the control-service session and
/// forwards its notifications to the main thread through `ui`, because the
/// overlay window must remain on the UI thread.
pub struct App<S> {
    pub(crate) settings: ConnectionSettings,
    pub(crate) ui: S,
}

impl<S: UiSink> App<S> {
    /// Connect, forward notifications until `interrupt` resolves, then shut
    /// down.
    ///
    /// `interrupt` is watched from the start, so an interrupt during the
    /// handshake also ends with a clean `Shutdown { exit_code: 0 }`.
    ///
    /// # Errors
    ///
    /// Returns the connection error if the session cannot be established.
    /// Nothing is retried.
    #[instrument(skip(self, interrupt))]
    pub(crate) async fn run<I>(self, interrupt: I) -> AppResult<()>
    where
        I: Future<Output = io::Result<()>>,
    {
        info!("Rec-Indicator starting");

        tokio::pin!(interrupt);

        let listener = tokio::select! {
            result = ConnectionListener::connect(&self.settings) => result?,
            result = &mut interrupt => {
                log_interrupt(result);
                info!("Interrupted before the session was established");
                self.ui.send(UiCommand::Shutdown { exit_code: 0 });
                return Ok(());
            }
        };

        let (queue_tx, mut queue_rx) = mpsc::channel(HANDOFF_CAPACITY);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let listener_handle = tokio::spawn(listener.run(queue_tx, shutdown_rx));

        // The UI sink is FIFO, so forwarding one at a time preserves delivery order.
        loop {
            tokio::select! {
                result = &mut interrupt => {
                    log_interrupt(result);
                    break;
                }

                Some(notification) = queue_rx.recv() => {
                    debug!(notification = ?notification, "Forwarding notification to UI thread");
                    if !self.ui.send(UiCommand::Notify(notification)) {
                        info!("UI event loop closed, shutting down");
                        break;
                    }
                }
            }
        }

        let _ = shutdown_tx.send(true);
        // Unblocks the listener if it is waiting on a full queue.
        drop(queue_rx);

        match tokio::time::timeout(LISTENER_STOP_TIMEOUT, listener_handle).await {
            Ok(Ok(Ok(()))) => info!("Control-service session closed cleanly"),
            Ok(Ok(Err(e))) => warn!(error = %e, "Listener had already stopped"),
            Ok(Err(e)) => error!(error = ?e, "Listener task panicked"),
            Err(_) => info!(
                "Listener did not stop within timeout, \
                     will be cleaned up on exit"
            ),
        }

        self.ui.send(UiCommand::Shutdown { exit_code: 0 });
        info!("Rec-Indicator shut down successfully");

        Ok(())
    }
}

fn log_interrupt(result: io::Result<()>) {
    match result {
        Ok(()) => info!("Interrupt received, shutting down"),
        Err(e) => error!(error = ?e, "Failed to listen for interrupt, shutting down"),
    }
}
