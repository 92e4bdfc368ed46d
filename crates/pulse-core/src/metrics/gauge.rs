use std::sync::Arc;

use crate::error::Result;

use super::atomic::AtomicF64;
use super::family::Family;
use super::{LabelSet, MetricDescriptor};

/// Freely settable gauge. Cloning yields another handle to the same metric.
#[derive(Clone)]
pub struct Gauge {
    pub(super) family: Arc<Family<AtomicF64>>,
}

impl Gauge {
    pub(crate) fn new(descriptor: MetricDescriptor) -> Self {
        Self {
            family: Arc::new(Family::new(descriptor)),
        }
    }

    pub fn descriptor(&self) -> &MetricDescriptor {
        self.family.descriptor()
    }

    pub fn set(&self, labels: &[(&str, &str)], value: f64) -> Result<()> {
        let key = self.family.resolve(labels)?;
        self.family
            .cell_or_insert_with(key, AtomicF64::default)
            .set(value);
        Ok(())
    }

    /// Add `delta` to the current value.
    pub fn increment(&self, labels: &[(&str, &str)], delta: f64) -> Result<()> {
        let key = self.family.resolve(labels)?;
        self.family
            .cell_or_insert_with(key, AtomicF64::default)
            .add(delta);
        Ok(())
    }

    /// Subtract `delta` from the current value.
    pub fn decrement(&self, labels: &[(&str, &str)], delta: f64) -> Result<()> {
        self.increment(labels, -delta)
    }

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
