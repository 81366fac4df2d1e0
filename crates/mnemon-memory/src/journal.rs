use chrono::Utc;
use std::io::Write;
use std::path::PathBuf;
use tracing::warn;

/// Best-effort activity log. Appends `[timestamp] message` lines to a side
/// file; a write failure must never block or fail the operation that
/// triggered it.
#[derive(Debug, Clone)]
pub struct Journal {
    path: PathBuf,
}

impl Journal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Fallible append. `record` is the swallow point; this exists so the
    /// failure is observable where a caller wants it.
    pub fn try_record(&self, event: &str) -> std::io::Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "[{}] {}", Utc::now().to_rfc3339(), event)
    }

    /// Append an event line, swallowing any I/O failure.
    pub fn record(&self, event: &str) {
        if let Err(e) = self.try_record(event) {
            warn!(path = ?self.path, error = %e, "journal write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_appends_timestamped_lines() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::new(dir.path().join("activity_log.txt"));
        journal.record("first event");
        journal.record("second event");

        let raw = std::fs::read_to_string(journal.path()).unwrap();
        let lines: Vec<&str> = raw.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("first event"));
        assert!(lines[1].ends_with("second event"));
    }

    #[test]
    fn test_record_swallows_unwritable_path() {
        let journal = Journal::new("/nonexistent-dir/activity_log.txt");
        // Must not panic or propagate
        journal.record("dropped event");
        assert!(journal.try_record("dropped event").is_err());
    }
}
