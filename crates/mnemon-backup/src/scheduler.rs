use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::client::BackupClient;

/// Fire-and-forget backup queue.
///
/// One worker task drains the queue and runs `backup(include_code=false)`
/// for each submission. `schedule` never blocks and never reports remote
/// failures back to the caller — the triggering operation's response is
/// already finalized by the time the task runs. No ordering is guaranteed
/// between tasks scheduled from different requests beyond queue order;
/// each run captures the memory file as it is at that moment.
#[derive(Clone)]
pub struct BackupScheduler {
    tx: mpsc::Sender<()>,
}

impl BackupScheduler {
    /// Spawn the worker and return a handle for submitting tasks.
    pub fn spawn(client: Arc<BackupClient>) -> Self {
        let (tx, mut rx) = mpsc::channel::<()>(32);
        tokio::spawn(async move {
            while rx.recv().await.is_some() {
                match client.backup(false).await {
                    Ok(reports) => {
                        for report in reports {
                            if !report.outcome.is_ok() {
                                warn!(path = %report.path, "scheduled backup target failed");
                            }
                        }
                    }
                    Err(e) => warn!(error = %e, "scheduled backup failed"),
                }
            }
            debug!("backup worker stopped");
        });
        Self { tx }
    }

    /// Submit a backup task without waiting. A full queue or a stopped
    /// worker drops the task with a warning; the next append will schedule
    /// a fresh push of the whole file anyway.
    pub fn schedule(&self) {
        if let Err(e) = self.tx.try_send(()) {
            warn!(error = %e, "backup task dropped");
        }
    }
}
