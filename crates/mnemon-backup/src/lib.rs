//! # mnemon-backup
//!
//! Remote backup for the memory log: a [`RemoteStore`] trait over a
//! content-addressed store with revision-conditioned writes, a GitHub
//! contents-API implementation, an in-memory mock for tests, the
//! [`BackupClient`] orchestration (get-then-conditional-put per path), and
//! the fire-and-forget [`BackupScheduler`].
//!
//! Remote failures never roll back local state; local store operations
//! always commit before any remote interaction is attempted.

pub mod client;
pub mod github;
pub mod mock;
pub mod remote;
pub mod scheduler;

pub use client::{BackupClient, BackupPaths};
pub use github::GitHubRemote;
pub use mock::MockRemote;
pub use remote::RemoteStore;
pub use scheduler::BackupScheduler;
