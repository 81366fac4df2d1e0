//! # mnemon-core
//!
//! Core types and the unified error type for the Mnemon memory service.
//! This crate defines the shared vocabulary used by every other crate in
//! the workspace.

pub mod error;
pub mod types;

pub use error::{MnemonError, Result};
pub use types::{BackupOutcome, BackupReport, BackupTarget, Persona};
