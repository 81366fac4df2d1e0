use mnemon_core::Persona;
use std::path::Path;
use tracing::{info, warn};

/// Load the persona from an optional two-line file: identity on the first
/// line, objective on the second. A missing file or missing line falls back
/// to the default. Loaded once at startup; immutable afterwards.
pub fn load_persona(path: &Path) -> Persona {
    let defaults = Persona::default();
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!(?path, "persona file not found, using defaults");
            return defaults;
        }
        Err(e) => {
            warn!(?path, error = %e, "failed to read persona file, using defaults");
            return defaults;
        }
    };

    let mut lines = raw.lines().map(str::trim).filter(|l| !l.is_empty());
    let identity = lines
        .next()
        .map(String::from)
        .unwrap_or(defaults.identity);
    let objective = lines
        .next()
        .map(String::from)
        .unwrap_or(defaults.objective);

    Persona {
        identity,
        objective,
    }
}
