//! Indicator for hosts that own the UI thread and tick loop.
//!
//! The host calls [`EmbeddedIndicator::load`] when it loads the
//! integration, [`EmbeddedIndicator::tick`] from its UI thread on every
//! frame or timer, and [`EmbeddedIndicator::unload`] when it unloads.
//! The connection runs on a private tokio runtime.

use crate::{
    ConnectionListener, ConnectionSettings, CoreResult, HANDOFF_CAPACITY, Indicator,
    IndicatorError, Notification, OverlayDisplay,
};

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;
use tokio::{
    runtime::Runtime,
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::{debug, info, instrument, warn};

/// How long `unload` waits for the listener to close its session.
const UNLOAD_TIMEOUT: Duration = Duration::from_secs(1);

/// Host-driven recording indicator.
pub struct EmbeddedIndicator<H> {
    runtime: Runtime,
    queue_rx: mpsc::Receiver<Notification>,
    shutdown_tx: watch::Sender<bool>,
    listener: Option<JoinHandle<CoreResult<()>>>,
    indicator: Indicator<H>,
}

impl<H> EmbeddedIndicator<H> {
    /// Connect to the control service and start listening.
    ///
    /// Must not be called from inside an async runtime.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::Runtime`] if the runtime cannot be built,
    /// or the connection error if the session cannot be established.
    #[track_caller]
    #[instrument]
    pub fn load(settings: &ConnectionSettings) -> CoreResult<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("rec-indicator-listener")
            .enable_all()
            .build()
            .map_err(|e| IndicatorError::Runtime {
                reason: format!("Failed to create tokio runtime: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let listener = runtime.block_on(ConnectionListener::connect(settings))?;

        let (queue_tx, queue_rx) = mpsc::channel(HANDOFF_CAPACITY);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = runtime.spawn(listener.run(queue_tx, shutdown_rx));

        info!("Embedded indicator loaded");

        Ok(Self {
            runtime,
            queue_rx,
            shutdown_tx,
            listener: Some(handle),
            indicator: Indicator::new(),
        })
    }

    /// Apply every queued notification, in delivery order.
    ///
    /// Call from the host's UI thread. Never blocks. Returns the number
    /// of notifications processed.
    pub fn tick<D>(&mut self, display: &mut D) -> usize
    where
        D: OverlayDisplay<Handle = H>,
    {
        let mut processed = 0;
        while let Ok(notification) = self.queue_rx.try_recv() {
            self.indicator.process(display, &notification);
            processed += 1;
        }
        processed
    }

    /// The underlying state machine.
    pub fn indicator(&self) -> &Indicator<H> {
        &self.indicator
    }

    /// Mutable access to the state machine, for redraws of the live overlay.
    pub fn indicator_mut(&mut self) -> &mut Indicator<H> {
        &mut self.indicator
    }

    /// Close any live overlay and end the session.
    #[instrument(skip_all)]
    pub fn unload<D>(mut self, display: &mut D)
    where
        D: OverlayDisplay<Handle = H>,
    {
        self.indicator.shutdown(display);

        let _ = self.shutdown_tx.send(true);

        if let Some(handle) = self.listener.take() {
            match self
                .runtime
                .block_on(async { tokio::time::timeout(UNLOAD_TIMEOUT, handle).await })
            {
                Ok(Ok(Ok(()))) => debug!("Listener stopped cleanly"),
                Ok(Ok(Err(e))) => warn!(error = %e, "Listener ended with error"),
                Ok(Err(e)) => warn!(error = ?e, "Listener task panicked"),
                Err(_) => debug!("Listener did not stop within timeout, dropping it"),
            }
        }

        self.runtime.shutdown_timeout(UNLOAD_TIMEOUT);

        info!("Embedded indicator unloaded");
    }
}
