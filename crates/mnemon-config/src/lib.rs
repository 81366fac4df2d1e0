//! # mnemon-config
//!
//! Configuration system for the Mnemon service. Reads from `mnemon.toml`
//! and environment variables — file values take priority, env vars fill in
//! what the file leaves unset (and a handful of `MNEMON_*` vars override
//! outright for deployment convenience).

pub mod loader;
pub mod persona;
pub mod schema;

pub use loader::ConfigLoader;
pub use persona::load_persona;
pub use schema::{BackupConfig, MemoryPaths, MnemonConfig, ServerConfig};
