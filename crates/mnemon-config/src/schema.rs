use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration — maps to `mnemon.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MnemonConfig {
    pub memory: MemoryPaths,
    pub persona: PersonaConfig,
    pub server: ServerConfig,
    pub backup: BackupConfig,
}

// ── Memory ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryPaths {
    /// The authoritative on-disk memory log.
    pub primary_path: PathBuf,
    /// Secondary local copy, refreshed after each successful write.
    pub mirror_path: PathBuf,
    /// Best-effort activity log (`[timestamp] message` lines).
    pub journal_path: PathBuf,
}

impl Default for MemoryPaths {
    fn default() -> Self {
        Self {
            primary_path: "memory_store.txt".into(),
            mirror_path: "memory_backup.txt".into(),
            journal_path: "activity_log.txt".into(),
        }
    }
}

// ── Persona ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaConfig {
    /// Optional file holding two lines: identity, objective.
    pub path: PathBuf,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            path: "persona.txt".into(),
        }
    }
}

// ── Server ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen: String,
    /// Shared secret for destructive/backup routes. `None` means those
    /// routes are always denied.
    pub secret: Option<String>,
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:8321".into(),
            secret: None,
            cors: false,
        }
    }
}

// ── Backup ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    /// Fire-and-forget remote push after each successful append.
    pub auto: bool,
    /// Remote API token. `GITHUB_TOKEN` is the env fallback.
    pub token: Option<String>,
    /// Remote repository, "owner/name".
    pub repo: Option<String>,
    /// Remote blob path for the memory log.
    pub memory_path: String,
    /// Remote blob path for the code snapshot.
    pub code_path: String,
    /// Local file pushed as the code snapshot, when set.
    pub code_snapshot: Option<PathBuf>,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            auto: false,
            token: None,
            repo: None,
            memory_path: "memory_store.txt".into(),
            code_path: "src/snapshot.rs".into(),
            code_snapshot: None,
        }
    }
}

impl BackupConfig {
    /// Whether enough is configured to talk to the remote store at all.
    pub fn credentials_present(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
            && self.repo.as_deref().is_some_and(|r| !r.is_empty())
    }
}
