//! # mnemon-memory
//!
//! The persistence core of Mnemon:
//!
//! - **Memory store**: the authoritative append-only log, held in memory and
//!   mirrored on disk as a newline-delimited file, with a secondary local
//!   mirror used for recovery when the primary goes missing.
//! - **Journal**: a best-effort side log of operational events. Journal
//!   failures never fail the operation that triggered them.

pub mod journal;
pub mod store;

pub use journal::Journal;
pub use store::MemoryStore;
