use mnemon_core::{BackupOutcome, BackupReport, BackupTarget, Result};
use mnemon_memory::Journal;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::remote::RemoteStore;

/// Local files and remote blob paths one backup run works with.
#[derive(Debug, Clone)]
pub struct BackupPaths {
    /// Local primary memory file. Read at push time; absence is empty bytes.
    pub memory_file: PathBuf,
    /// Remote blob path for the memory log.
    pub remote_memory_path: String,
    /// Remote blob path for the code snapshot.
    pub remote_code_path: String,
    /// Local file pushed as the code snapshot, when configured.
    pub code_snapshot: Option<PathBuf>,
}

/// Orchestrates remote backups: read current bytes, fetch the remote
/// revision, push conditioned on it. Each target path is pushed
/// independently; one failing never rolls back or invalidates the other.
pub struct BackupClient {
    remote: Arc<dyn RemoteStore>,
    paths: BackupPaths,
    journal: Journal,
}

impl BackupClient {
    pub fn new(remote: Arc<dyn RemoteStore>, paths: BackupPaths, journal: Journal) -> Self {
        Self {
            remote,
            paths,
            journal,
        }
    }

    /// Run one backup: always the memory log, plus the code snapshot when
    /// `include_code` is set and a snapshot file is configured. Returns one
    /// report per path attempted. Only an unexpected local read fault is an
    /// `Err`; remote failures land inside the per-path outcome.
    pub async fn backup(&self, include_code: bool) -> Result<Vec<BackupReport>> {
        let mut reports = Vec::new();

        let memory_bytes = read_or_empty(&self.paths.memory_file)?;
        let outcome = self
            .push_one(
                &self.paths.remote_memory_path,
                &memory_bytes,
                "mnemon: memory backup",
            )
            .await;
        self.journal_outcome(&self.paths.remote_memory_path, &outcome);
        reports.push(BackupReport {
            target: BackupTarget::Memory,
            path: self.paths.remote_memory_path.clone(),
            outcome,
        });

        if include_code {
            if let Some(ref snapshot) = self.paths.code_snapshot {
                let code_bytes = read_or_empty(snapshot)?;
                let outcome = self
                    .push_one(
                        &self.paths.remote_code_path,
                        &code_bytes,
                        "mnemon: code snapshot",
                    )
                    .await;
                self.journal_outcome(&self.paths.remote_code_path, &outcome);
                reports.push(BackupReport {
                    target: BackupTarget::CodeSnapshot,
                    path: self.paths.remote_code_path.clone(),
                    outcome,
                });
            }
        }

        Ok(reports)
    }

    /// One get-then-conditional-put sequence. The read-then-write pair races
    /// with any concurrent backup; last writer wins, accepted because every
    /// push carries the full current content.
    async fn push_one(&self, path: &str, content: &[u8], message: &str) -> BackupOutcome {
        let revision = match self.remote.fetch_revision(path).await {
            Ok(rev) => rev,
            Err(e) => {
                warn!(%path, error = %e, "revision fetch failed");
                return BackupOutcome::Failed {
                    error: e.to_string(),
                };
            }
        };

        match self
            .remote
            .push(path, content, message, revision.as_deref())
            .await
        {
            Ok(new_revision) => {
                info!(%path, revision = %new_revision, "remote push succeeded");
                BackupOutcome::Ok {
                    revision: new_revision,
                }
            }
            Err(e) => {
                warn!(%path, error = %e, "remote push failed");
                BackupOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    fn journal_outcome(&self, path: &str, outcome: &BackupOutcome) {
        match outcome {
            BackupOutcome::Ok { revision } => self
                .journal
                .record(&format!("backup pushed {path} at {revision}")),
            BackupOutcome::Failed { error } => self
                .journal
                .record(&format!("backup failed for {path}: {error}")),
        }
    }
}

fn read_or_empty(path: &std::path::Path) -> Result<Vec<u8>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}
