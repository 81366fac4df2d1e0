//! Mock remote store for deterministic testing.
//!
//! Holds blobs in memory and enforces the same revision-conditioning rules
//! a real content-addressed remote would, without any HTTP.

use async_trait::async_trait;
use mnemon_core::{MnemonError, Result};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::remote::RemoteStore;

struct MockBlob {
    content: Vec<u8>,
    revision: String,
}

/// In-memory [`RemoteStore`] that records pushes for assertions and can be
/// told to fail pushes to specific paths.
#[derive(Default)]
pub struct MockRemote {
    blobs: Mutex<HashMap<String, MockBlob>>,
    failing_paths: Mutex<HashSet<String>>,
    /// Every accepted push, in order: (path, content, conditioned revision).
    pub pushes: Mutex<Vec<(String, Vec<u8>, Option<String>)>>,
    counter: AtomicU64,
}

impl MockRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every push to `path` fail with a remote-backup error.
    pub fn fail_pushes_to(self, path: &str) -> Self {
        self.failing_paths.lock().unwrap().insert(path.to_string());
        self
    }

    pub fn content_of(&self, path: &str) -> Option<Vec<u8>> {
        self.blobs
            .lock()
            .unwrap()
            .get(path)
            .map(|b| b.content.clone())
    }

    pub fn revision_of(&self, path: &str) -> Option<String> {
        self.blobs
            .lock()
            .unwrap()
            .get(path)
            .map(|b| b.revision.clone())
    }

    pub fn push_count(&self) -> usize {
        self.pushes.lock().unwrap().len()
    }

    fn next_revision(&self) -> String {
        format!("rev-{}", self.counter.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[async_trait]
impl RemoteStore for MockRemote {
    async fn fetch_revision(&self, path: &str) -> Result<Option<String>> {
        Ok(self.revision_of(path))
    }

    async fn push(
        &self,
        path: &str,
        content: &[u8],
        _message: &str,
        revision: Option<&str>,
    ) -> Result<String> {
        if self.failing_paths.lock().unwrap().contains(path) {
            return Err(MnemonError::RemoteBackup(format!(
                "injected failure for {path}"
            )));
        }

        let mut blobs = self.blobs.lock().unwrap();
        match (blobs.get(path), revision) {
            // Creating a blob that already exists, or updating with a stale
            // token, is a conflict — matching the remote contract.
            (Some(existing), None) => {
                return Err(MnemonError::RemoteConflict {
                    path: path.to_string(),
                    reason: format!("blob exists with revision {}", existing.revision),
                });
            }
            (Some(existing), Some(rev)) if existing.revision != rev => {
                return Err(MnemonError::RemoteConflict {
                    path: path.to_string(),
                    reason: format!(
                        "stale revision {rev}, current is {}",
                        existing.revision
                    ),
                });
            }
            (None, Some(rev)) => {
                return Err(MnemonError::RemoteConflict {
                    path: path.to_string(),
                    reason: format!("revision {rev} supplied for missing blob"),
                });
            }
            _ => {}
        }

        let new_revision = self.next_revision();
        blobs.insert(
            path.to_string(),
            MockBlob {
                content: content.to_vec(),
                revision: new_revision.clone(),
            },
        );
        self.pushes.lock().unwrap().push((
            path.to_string(),
            content.to_vec(),
            revision.map(String::from),
        ));
        Ok(new_revision)
    }
}
