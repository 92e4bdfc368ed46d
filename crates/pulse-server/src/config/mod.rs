//! Service config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use pulse_core::error::{PulseError, Result};

pub use schema::{ServerSection, ServiceConfig, SimulationSection};

/// Default config path, used when no explicit path is given.
pub const DEFAULT_PATH: &str = "pulse.yaml";

/// Load the startup config.
///
/// An explicit path must exist. Without one, `DEFAULT_PATH` is read if
/// present, otherwise built-in defaults apply.
pub fn load(explicit: Option<&str>) -> Result<ServiceConfig> {
    match explicit {
        Some(path) => load_from_file(path),
        None if Path::new(DEFAULT_PATH).exists() => load_from_file(DEFAULT_PATH),
        None => {
            tracing::info!(path = DEFAULT_PATH, "config file not found, using defaults");
            Ok(ServiceConfig::default())
        }
    }
}

pub fn load_from_file(path: &str) -> Result<ServiceConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| PulseError::BadConfig(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServiceConfig> {
    let cfg: ServiceConfig = serde_yaml::from_str(s)
        .map_err(|e| PulseError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
