use mnemon_core::{MnemonError, Result};
use parking_lot::Mutex;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::journal::Journal;

/// The authoritative append-only memory log.
///
/// Entries live in memory and on disk as a newline-delimited file; after any
/// completed operation the two are the same sequence. A secondary mirror
/// file is refreshed after every successful write and is the recovery source
/// when the primary file goes missing. Mutations are serialized by one lock
/// held across the file write plus mirror copy.
pub struct MemoryStore {
    primary: PathBuf,
    mirror: PathBuf,
    journal: Journal,
    entries: Mutex<Vec<String>>,
}

impl MemoryStore {
    /// Open the store, loading (or recovering) the current entries.
    pub fn open(
        primary: impl Into<PathBuf>,
        mirror: impl Into<PathBuf>,
        journal: Journal,
    ) -> Result<Self> {
        let store = Self {
            primary: primary.into(),
            mirror: mirror.into(),
            journal,
            entries: Mutex::new(Vec::new()),
        };
        let entries = store.load()?;
        info!(count = entries.len(), path = ?store.primary, "memory store opened");
        Ok(store)
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Read the primary file line by line, recovering from the mirror when
    /// the primary is absent. Absence of both is an empty store, never an
    /// error. The in-memory sequence is replaced with what was read.
    pub fn load(&self) -> Result<Vec<String>> {
        let mut guard = self.entries.lock();

        if !self.primary.exists() && self.mirror.exists() {
            warn!(primary = ?self.primary, mirror = ?self.mirror, "primary file missing, recovering from mirror");
            std::fs::copy(&self.mirror, &self.primary)?;
            self.journal.record("primary memory file recovered from mirror");
        }

        let loaded = match std::fs::read_to_string(&self.primary) {
            Ok(raw) => raw
                .lines()
                .map(str::trim_end)
                .filter(|l| !l.is_empty())
                .map(String::from)
                .collect(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        *guard = loaded.clone();
        Ok(loaded)
    }

    /// Append one entry. Whitespace-only input is a no-op (returns `false`);
    /// an embedded line terminator is a validation error because it would
    /// corrupt the newline-delimited file. On success the primary file, the
    /// in-memory sequence, and (best-effort) the mirror are all updated.
    pub fn append(&self, entry: &str) -> Result<bool> {
        if entry.contains('\n') || entry.contains('\r') {
            return Err(MnemonError::InvalidEntry(
                "entry must not contain a line terminator".into(),
            ));
        }
        let entry = entry.trim();
        if entry.is_empty() {
            return Ok(false);
        }

        let mut guard = self.entries.lock();

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.primary)?;
        writeln!(file, "{entry}")?;

        guard.push(entry.to_string());
        self.refresh_mirror();
        self.journal.record(&format!("memory appended: {entry}"));
        Ok(true)
    }

    /// Truncate primary, mirror, and the in-memory sequence. Idempotent.
    pub fn clear(&self) -> Result<()> {
        let mut guard = self.entries.lock();

        std::fs::write(&self.primary, "")?;
        if let Err(e) = std::fs::write(&self.mirror, "") {
            warn!(mirror = ?self.mirror, error = %e, "mirror truncate failed");
            self.journal.record(&format!("mirror truncate failed: {e}"));
        }
        guard.clear();
        self.journal.record("memory cleared");
        Ok(())
    }

    /// A defensive copy of the current entries, oldest first.
    pub fn list(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.entries.lock().len()
    }

    /// Copy the primary over the mirror. Best-effort: a failure is journaled
    /// and warned, never propagated.
    fn refresh_mirror(&self) {
        if let Err(e) = std::fs::copy(&self.primary, &self.mirror) {
            warn!(mirror = ?self.mirror, error = %e, "mirror update failed");
            self.journal.record(&format!("mirror update failed: {e}"));
        }
    }
}
