use serde::{Deserialize, Serialize};

/// The service's self-description, loaded once at startup and immutable for
/// the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    pub identity: String,
    pub objective: String,
}

impl Default for Persona {
    fn default() -> Self {
        Self {
            identity: "Mnemon v0.1".into(),
            objective: "Preserve memory and remain available.".into(),
        }
    }
}

/// Which remote blob a backup push targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackupTarget {
    Memory,
    CodeSnapshot,
}

/// Outcome of a single remote push. The two pushes of a full backup are
/// independent, so each target carries its own outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum BackupOutcome {
    /// Push accepted; `revision` is the token the remote returned.
    Ok { revision: String },
    Failed { error: String },
}

impl BackupOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, BackupOutcome::Ok { .. })
    }
}

/// Per-path report for one backup run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupReport {
    pub target: BackupTarget,
    /// Remote blob path the push addressed.
    pub path: String,
    #[serde(flatten)]
    pub outcome: BackupOutcome,
}
