use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{PulseError, Result};

use super::family::Family;
use super::{LabelSet, MetricDescriptor};

/// Default bucket upper bounds (seconds), `+Inf` appended on use.
pub const DEFAULT_BUCKETS: [f64; 14] = [
    0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

/// Point-in-time state of one histogram series.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSnapshot {
    /// `(upper bound, cumulative count)` pairs, last bound is `+Inf`.
    pub buckets: Vec<(f64, u64)>,
    pub sum: f64,
    pub count: u64,
}

#[derive(Debug)]
struct HistogramState {
    cumulative: Vec<u64>,
    sum: f64,
    count: u64,
}

/// One series. The mutex keeps buckets, sum and count mutually consistent for
/// readers: the `+Inf` bucket always equals `count`.
#[derive(Debug)]
pub(crate) struct HistogramCell {
    state: Mutex<HistogramState>,
}

impl HistogramCell {
    fn new(buckets: usize) -> Self {
        Self {
            state: Mutex::new(HistogramState {
                cumulative: vec![0; buckets],
                sum: 0.0,
                count: 0,
            }),
        }
    }

    fn observe(&self, bounds: &[f64], value: f64) {
        // First bound with value <= bound; every bucket from there on counts it.
        let first = bounds.partition_point(|b| *b < value);
        let mut st = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        for c in st.cumulative.iter_mut().skip(first) {
            *c += 1;
        }
        st.sum += value;
        st.count += 1;
    }

    fn snapshot(&self, bounds: &[f64]) -> HistogramSnapshot {
        let st = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        HistogramSnapshot {
            buckets: bounds.iter().copied().zip(st.cumulative.iter().copied()).collect(),
            sum: st.sum,
            count: st.count,
        }
    }
}

/// Histogram with fixed bucket bounds. Cloning yields another handle to the
/// same metric.
#[derive(Clone)]
pub struct Histogram {
    pub(super) family: Arc<Family<HistogramCell>>,
    bounds: Arc<[f64]>,
}

impl Histogram {
    pub(crate) fn new(descriptor: MetricDescriptor, buckets: &[f64]) -> Result<Self> {
        let bounds = normalize_bounds(descriptor.name(), buckets)?;
        Ok(Self {
            family: Arc::new(Family::new(descriptor)),
            bounds: bounds.into(),
        })
    }

    pub fn descriptor(&self) -> &MetricDescriptor {
        self.family.descriptor()
    }

    /// Bucket upper bounds, ending with `+Inf`.
    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }

    /// Record `value`: counts it in every bucket whose bound is `>= value`.
    pub fn observe(&self, labels: &[(&str, &str)], value: f64) -> Result<()> {
        let key = self.family.resolve(labels)?;
        if value.is_nan() {
            return Err(PulseError::InvalidValue {
                metric: self.descriptor().name().to_string(),
                detail: "cannot observe NaN".into(),
            });
        }
        let n = self.bounds.len();
        self.family
            .cell_or_insert_with(key, || HistogramCell::new(n))
            .observe(&self.bounds, value);
        Ok(())
    }

    pub fn snapshot(&self, labels: &[(&str, &str)]) -> Result<Option<HistogramSnapshot>> {
        let key = self.family.resolve(labels)?;
        Ok(self.family.lookup(&key).map(|c| c.snapshot(&self.bounds)))
    }

    pub(crate) fn samples(&self) -> Vec<(LabelSet, HistogramSnapshot)> {
        self.family
            .series()
            .into_iter()
            .map(|(labels, cell)| {
                let snap = cell.snapshot(&self.bounds);
                (labels, snap)
            })
            .collect()
    }
}

/// Validate user bounds and append `+Inf` when absent.
fn normalize_bounds(metric: &str, buckets: &[f64]) -> Result<Vec<f64>> {
    if buckets.is_empty() {
        return Err(PulseError::InvalidBuckets(format!("{metric}: no bucket bounds")));
    }
    if buckets.iter().any(|b| b.is_nan()) {
        return Err(PulseError::InvalidBuckets(format!("{metric}: NaN bucket bound")));
    }
    if buckets.windows(2).any(|w| w[0] >= w[1]) {
        return Err(PulseError::InvalidBuckets(format!(
            "{metric}: bounds must be strictly ascending, got {buckets:?}"
        )));
    }

    let mut bounds = buckets.to_vec();
    if bounds.last() != Some(&f64::INFINITY) {
        bounds.push(f64::INFINITY);
    }
    Ok(bounds)
}
