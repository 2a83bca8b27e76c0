//! Service config loader (strict parsing).

pub mod schema;

use std::fs;

use feather_core::error::{FeatherError, Result};

pub use schema::{ClientSection, IngestConfig, ServerSection};

/// Environment variable naming an optional config file for the binaries.
pub const CONFIG_ENV: &str = "FEATHER_CONFIG";

pub fn load_from_file(path: &str) -> Result<IngestConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| FeatherError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<IngestConfig> {
    let cfg: IngestConfig = serde_yaml::from_str(s)
        .map_err(|e| FeatherError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load from `$FEATHER_CONFIG` when set, otherwise validated defaults.
pub fn load_from_env() -> Result<IngestConfig> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) if !path.is_empty() => load_from_file(&path),
        _ => {
            let cfg = IngestConfig::default();
            cfg.validate()?;
            Ok(cfg)
        }
    }
}
