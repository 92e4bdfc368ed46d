use std::sync::Arc;

use crate::error::{PulseError, Result};

use super::atomic::AtomicF64;
use super::family::Family;
use super::{LabelSet, MetricDescriptor};

/// Monotonic counter. Cloning yields another handle to the same metric.
#[derive(Clone)]
pub struct Counter {
    pub(super) family: Arc<Family<AtomicF64>>,
}

impl Counter {
    pub(crate) fn new(descriptor: MetricDescriptor) -> Self {
        Self {
            family: Arc::new(Family::new(descriptor)),
        }
    }

    pub fn descriptor(&self) -> &MetricDescriptor {
        self.family.descriptor()
    }

    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) -> Result<()> {
        self.increment(labels, 1.0)
    }

    /// Increment by `delta`. Negative or NaN deltas are rejected and leave the
    /// series untouched.
    pub fn increment(&self, labels: &[(&str, &str)], delta: f64) -> Result<()> {
        let key = self.family.resolve(labels)?;
        if delta.is_nan() || delta < 0.0 {
            return Err(PulseError::InvalidValue {
                metric: self.descriptor().name().to_string(),
                detail: format!("counter delta must be non-negative, got {delta}"),
            });
        }
        self.family
            .cell_or_insert_with(key, AtomicF64::default)
            .add(delta);
        Ok(())
    }

    /// Current value, or `None` if the series was never incremented.
    pub fn get(&self, labels: &[(&str, &str)]) -> Result<Option<f64>> {
        let key = self.family.resolve(labels)?;
        Ok(self.family.lookup(&key).map(|c| c.get()))
    }

    pub(crate) fn samples(&self) -> Vec<(LabelSet, f64)> {
        self.family
            .series()
            .into_iter()
            .map(|(labels, cell)| (labels, cell.get()))
            .collect()
    }
}
