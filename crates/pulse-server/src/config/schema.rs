use std::net::SocketAddr;

use serde::Deserialize;
use pulse_core::error::{PulseError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub simulation: SimulationSection,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            simulation: SimulationSection::default(),
        }
    }
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PulseError::UnsupportedVersion);
        }
        self.server.validate()?;
        self.simulation.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen.parse::<SocketAddr>().map_err(|e| {
            PulseError::BadConfig(format!("server.listen must be a valid SocketAddr: {e}"))
        })?;
        Ok(())
    }
}

/// Knobs for the synthetic workload behind the demo endpoints.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationSection {
    #[serde(default = "default_latency_min_ms")]
    pub latency_min_ms: u64,

    #[serde(default = "default_latency_max_ms")]
    pub latency_max_ms: u64,

    /// Probability that `/api/data` fails with a simulated timeout.
    #[serde(default = "default_error_rate")]
    pub error_rate: f64,

    #[serde(default = "default_users_min")]
    pub users_min: u64,

    #[serde(default = "default_users_max")]
    pub users_max: u64,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            latency_min_ms: default_latency_min_ms(),
            latency_max_ms: default_latency_max_ms(),
            error_rate: default_error_rate(),
            users_min: default_users_min(),
            users_max: default_users_max(),
        }
    }
}

impl SimulationSection {
    pub fn validate(&self) -> Result<()> {
        if self.latency_max_ms > 60_000 {
            return Err(PulseError::BadConfig(
                "simulation.latency_max_ms must be at most 60000".into(),
            ));
        }
        if self.latency_min_ms > self.latency_max_ms {
            return Err(PulseError::BadConfig(
                "simulation.latency_min_ms must not exceed latency_max_ms".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.error_rate) {
            return Err(PulseError::BadConfig(
                "simulation.error_rate must be between 0 and 1".into(),
            ));
        }
        if self.users_min > self.users_max {
            return Err(PulseError::BadConfig(
                "simulation.users_min must not exceed users_max".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:5000".into()
}
fn default_latency_min_ms() -> u64 {
    100
}
fn default_latency_max_ms() -> u64 {
    500
}
fn default_error_rate() -> f64 {
    0.1
}
fn default_users_min() -> u64 {
    50
}
fn default_users_max() -> u64 {
    200
}
