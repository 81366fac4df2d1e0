use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::schema::MnemonConfig;

/// Loads the Mnemon configuration from disk with env-var overrides.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Resolve the config path: explicit path > MNEMON_CONFIG env > ~/.mnemon/mnemon.toml
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(p) = explicit {
            return p.to_path_buf();
        }
        if let Ok(p) = std::env::var("MNEMON_CONFIG") {
            return PathBuf::from(p);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".mnemon")
            .join("mnemon.toml")
    }

    /// Load the config from disk, falling back to defaults.
    pub fn load(path: Option<&Path>) -> mnemon_core::Result<MnemonConfig> {
        let config_path = Self::resolve_path(path);
        let config = if config_path.exists() {
            info!(?config_path, "loading configuration");
            let raw = std::fs::read_to_string(&config_path)?;
            toml::from_str::<MnemonConfig>(&raw).map_err(|e| {
                mnemon_core::MnemonError::Config(format!(
                    "failed to parse {}: {}",
                    config_path.display(),
                    e
                ))
            })?
        } else {
            warn!(?config_path, "config file not found, using defaults");
            MnemonConfig::default()
        };

        Ok(Self::apply_env_overrides(config))
    }

    /// Apply env var overrides (MNEMON_LISTEN, MNEMON_SECRET, etc.)
    pub fn apply_env_overrides(mut config: MnemonConfig) -> MnemonConfig {
        if let Ok(v) = std::env::var("MNEMON_LISTEN") {
            config.server.listen = v;
        }
        if let Ok(v) = std::env::var("MNEMON_MEMORY_PATH") {
            config.memory.primary_path = v.into();
        }
        if let Ok(v) = std::env::var("MNEMON_MIRROR_PATH") {
            config.memory.mirror_path = v.into();
        }
        if let Ok(v) = std::env::var("MNEMON_JOURNAL_PATH") {
            config.memory.journal_path = v.into();
        }
        if let Ok(v) = std::env::var("MNEMON_PERSONA_PATH") {
            config.persona.path = v.into();
        }
        if let Ok(v) = std::env::var("MNEMON_SECRET") {
            config.server.secret = Some(v);
        }
        if let Ok(v) = std::env::var("MNEMON_AUTO_BACKUP") {
            if let Ok(flag) = v.parse::<bool>() {
                config.backup.auto = flag;
            }
        }
        if let Ok(v) = std::env::var("MNEMON_REPO") {
            config.backup.repo = Some(v);
        }
        // API token: env var fills in when the config file doesn't set one.
        // This means the config file takes priority, env is the fallback.
        if config.backup.token.is_none() {
            if let Ok(v) = std::env::var("GITHUB_TOKEN") {
                config.backup.token = Some(v);
            }
        }
        config
    }
}
