use thiserror::Error;

/// Unified error type for the entire Mnemon service.
#[derive(Error, Debug)]
pub enum MnemonError {
    // ── Client-side errors ─────────────────────────────────────
    #[error("invalid entry: {0}")]
    InvalidEntry(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    // ── Configuration errors ───────────────────────────────────
    #[error("config error: {0}")]
    Config(String),

    #[error("remote backup not configured: {0}")]
    BackupUnconfigured(String),

    // ── Remote backup errors ───────────────────────────────────
    #[error("remote backup failed: {0}")]
    RemoteBackup(String),

    #[error("remote revision conflict on {path}: {reason}")]
    RemoteConflict { path: String, reason: String },

    // ── Generic wrappers ───────────────────────────────────────
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, MnemonError>;
