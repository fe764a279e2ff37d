// Repair Lane - single sequential worker for repair chains

mod shutdown;

pub use shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};

use crate::application::repair::RepairEngine;
use crate::domain::RepairOutcome;
use crate::error::{CoreError, Result};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{info, warn};

struct RepairRequest {
    bundle_path: String,
    reply: oneshot::Sender<Result<RepairOutcome>>,
}

/// Pending outcome of a submitted repair. Resolves exactly once.
pub struct RepairTicket {
    rx: oneshot::Receiver<Result<RepairOutcome>>,
}

impl RepairTicket {
    /// Await the terminal outcome of the repair.
    ///
    /// # Errors
    /// - `CoreError::LaneClosed` if the lane shut down before this request ran
    /// - `CoreError::Validation` if the submitted path violated the contract
    pub async fn outcome(self) -> Result<RepairOutcome> {
        match self.rx.await {
            Ok(result) => result,
            Err(_) => Err(CoreError::LaneClosed),
        }
    }
}

/// One dedicated sequential worker consuming a queue of repair requests.
///
/// At most one strip -> assess -> probe chain is in flight at any time, so
/// concurrent submissions never interleave their external-process spawns.
/// Outcomes are delivered in completion order on the lane.
///
/// No cancellation mid-chain: once a chain starts it runs to a terminal
/// outcome. No timeout either, so a hung external process hangs the lane.
pub struct RepairLane {
    tx: mpsc::UnboundedSender<RepairRequest>,
    shutdown_tx: ShutdownSender,
    worker: JoinHandle<()>,
}

impl RepairLane {
    /// Spawn the lane worker on the current tokio runtime.
    pub fn new(engine: Arc<RepairEngine>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_token) = shutdown_channel();
        let worker = tokio::spawn(run_worker(engine, rx, shutdown_token));

        Self {
            tx,
            shutdown_tx,
            worker,
        }
    }

    /// Enqueue a repair and return immediately.
    ///
    /// The ticket resolves `CoreError::LaneClosed` if the lane is already
    /// shut down, or if it shuts down before this request is started.
    pub fn submit(&self, bundle_path: impl Into<String>) -> RepairTicket {
        let (reply, rx) = oneshot::channel();
        let request = RepairRequest {
            bundle_path: bundle_path.into(),
            reply,
        };

        // A send error means the worker is gone; dropping `request` (and its
        // reply sender with it) resolves the ticket as LaneClosed.
        if self.tx.send(request).is_err() {
            warn!("Repair submitted to a closed lane");
        }

        RepairTicket { rx }
    }

    /// Shut the lane down: the in-flight chain (if any) runs to completion,
    /// queued-but-not-started requests are abandoned and their tickets
    /// resolve as LaneClosed.
    pub async fn shutdown(self) {
        self.shutdown_tx.shutdown();
        drop(self.tx);
        if let Err(e) = self.worker.await {
            warn!(error = ?e, "Repair lane worker did not stop cleanly");
        }
    }
}

async fn run_worker(
    engine: Arc<RepairEngine>,
    mut rx: mpsc::UnboundedReceiver<RepairRequest>,
    mut shutdown: ShutdownToken,
) {
    info!("Repair lane started");

    loop {
        if shutdown.is_shutdown() {
            info!("Repair lane shutting down, abandoning queued requests");
            break;
        }

        let request = tokio::select! {
            req = rx.recv() => match req {
                Some(req) => req,
                None => break, // all senders dropped
            },
            _ = shutdown.wait() => {
                info!("Repair lane shutting down, abandoning queued requests");
                break;
            }
        };

        // The chain blocks the lane, not the caller, until it is terminal.
        let result = engine.repair(&request.bundle_path).await;

        // Receiver may have been dropped by an uninterested caller
        if request.reply.send(result).is_err() {
            info!(bundle_path = %request.bundle_path, "Repair outcome discarded by caller");
        }
    }

    info!("Repair lane stopped");
}
