//! Synthetic workload values for the demo endpoints.

use std::time::Duration;

use rand::Rng;

use crate::config::SimulationSection;

const CPU_PERCENT: (f64, f64) = (20.0, 80.0);
const MEMORY_BYTES: (u64, u64) = (500_000_000, 2_000_000_000);

pub fn latency(cfg: &SimulationSection, rng: &mut impl Rng) -> Duration {
    Duration::from_millis(rng.random_range(cfg.latency_min_ms..=cfg.latency_max_ms))
}

/// Whether this request should fail with a simulated timeout.
pub fn should_fail(cfg: &SimulationSection, rng: &mut impl Rng) -> bool {
    rng.random_bool(cfg.error_rate)
}

pub fn active_users(cfg: &SimulationSection, rng: &mut impl Rng) -> u64 {
    rng.random_range(cfg.users_min..=cfg.users_max)
}

pub fn cpu_percent(rng: &mut impl Rng) -> f64 {
    rng.random_range(CPU_PERCENT.0..CPU_PERCENT.1)
}

pub fn memory_bytes(rng: &mut impl Rng) -> u64 {
    rng.random_range(MEMORY_BYTES.0..=MEMORY_BYTES.1)
}
