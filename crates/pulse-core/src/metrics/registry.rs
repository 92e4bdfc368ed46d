use std::io;
use std::sync::{Arc, PoisonError, RwLock};

use bytes::Bytes;

use crate::error::{PulseError, Result};

use super::exposition::{self, Exposition};
use super::{
    Counter, Gauge, Histogram, HistogramSnapshot, LabelSet, MetricDescriptor, MetricKind,
    DEFAULT_BUCKETS,
};

/// Handle to a registered metric of any kind.
#[derive(Clone)]
pub enum Metric {
    Counter(Counter),
    Gauge(Gauge),
    Histogram(Histogram),
}

impl Metric {
    pub fn descriptor(&self) -> &MetricDescriptor {
        match self {
            Metric::Counter(c) => c.descriptor(),
            Metric::Gauge(g) => g.descriptor(),
            Metric::Histogram(h) => h.descriptor(),
        }
    }

    pub fn as_counter(&self) -> Option<&Counter> {
        match self {
            Metric::Counter(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_gauge(&self) -> Option<&Gauge> {
        match self {
            Metric::Gauge(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_histogram(&self) -> Option<&Histogram> {
        match self {
            Metric::Histogram(h) => Some(h),
            _ => None,
        }
    }

    /// Snapshot every series of this metric, in first-seen order.
    pub fn family(&self) -> MetricFamily {
        match self {
            Metric::Counter(c) => MetricFamily {
                descriptor: Arc::clone(c.family.descriptor()),
                samples: c
                    .samples()
                    .into_iter()
                    .map(|(l, v)| (l, SampleValue::Counter(v)))
                    .collect(),
            },
            Metric::Gauge(g) => MetricFamily {
                descriptor: Arc::clone(g.family.descriptor()),
                samples: g
                    .samples()
                    .into_iter()
                    .map(|(l, v)| (l, SampleValue::Gauge(v)))
                    .collect(),
            },
            Metric::Histogram(h) => MetricFamily {
                descriptor: Arc::clone(h.family.descriptor()),
                samples: h
                    .samples()
                    .into_iter()
                    .map(|(l, s)| (l, SampleValue::Histogram(s)))
                    .collect(),
            },
        }
    }

    /// Why `other` cannot share this metric's name, or `None` if the two are
    /// structurally identical. Histogram bounds only count when the caller
    /// supplied them.
    fn conflict(&self, other: &Metric, explicit_bounds: bool) -> Option<String> {
        let (a, b) = (self.descriptor(), other.descriptor());
        if a.kind() != b.kind() {
            return Some(format!(
                "registered as {}, requested as {}",
                a.kind().as_str(),
                b.kind().as_str()
            ));
        }
        if a.help() != b.help() {
            return Some(format!("help text differs ({:?} vs {:?})", a.help(), b.help()));
        }
        if a.label_names() != b.label_names() {
            return Some(format!(
                "label names differ ({:?} vs {:?})",
                a.label_names(),
                b.label_names()
            ));
        }
        if let (Metric::Histogram(x), Metric::Histogram(y)) = (self, other) {
            if explicit_bounds && x.bounds() != y.bounds() {
                return Some(format!(
                    "bucket bounds differ ({:?} vs {:?})",
                    x.bounds(),
                    y.bounds()
                ));
            }
        }
        None
    }
}

/// Numeric state of one series at collection time.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleValue {
    Counter(f64),
    Gauge(f64),
    Histogram(HistogramSnapshot),
}

/// One metric with all of its series.
#[derive(Debug, Clone)]
pub struct MetricFamily {
    pub descriptor: Arc<MetricDescriptor>,
    pub samples: Vec<(LabelSet, SampleValue)>,
}

/// One `(descriptor, label set, state)` triple yielded by [`Registry::collect`].
#[derive(Debug, Clone, PartialEq)]
pub struct CollectedSample {
    pub descriptor: Arc<MetricDescriptor>,
    pub labels: LabelSet,
    pub value: SampleValue,
}

/// Owns every registered metric, in registration order.
///
/// Construct one at startup and share it behind an `Arc`.
#[derive(Default)]
pub struct Registry {
    metrics: RwLock<Vec<Metric>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `descriptor`. New histograms get [`DEFAULT_BUCKETS`].
    ///
    /// Registering a structurally identical descriptor again returns a handle
    /// to the existing metric (whatever bounds an existing histogram has);
    /// any other reuse of the name is [`PulseError::DuplicateMetric`].
    pub fn register(&self, descriptor: MetricDescriptor) -> Result<Metric> {
        self.register_inner(descriptor, None)
    }

    pub fn register_counter(
        &self,
        name: &str,
        help: &str,
        label_names: &[&str],
    ) -> Result<Counter> {
        let d = MetricDescriptor::new(name, help, MetricKind::Counter, label_names)?;
        match self.register(d)? {
            Metric::Counter(c) => Ok(c),
            _ => Err(PulseError::Internal(format!("{name} registered with wrong kind"))),
        }
    }

    pub fn register_gauge(&self, name: &str, help: &str, label_names: &[&str]) -> Result<Gauge> {
        let d = MetricDescriptor::new(name, help, MetricKind::Gauge, label_names)?;
        match self.register(d)? {
            Metric::Gauge(g) => Ok(g),
            _ => Err(PulseError::Internal(format!("{name} registered with wrong kind"))),
        }
    }

    pub fn register_histogram(
        &self,
        name: &str,
        help: &str,
        label_names: &[&str],
        buckets: &[f64],
    ) -> Result<Histogram> {
        let d = MetricDescriptor::new(name, help, MetricKind::Histogram, label_names)?;
        match self.register_with_buckets(d, buckets)? {
            Metric::Histogram(h) => Ok(h),
            _ => Err(PulseError::Internal(format!("{name} registered with wrong kind"))),
        }
    }

    /// `buckets` is ignored unless `descriptor` is a histogram, in which case
    /// an existing histogram of that name must have the same bounds.
    pub fn register_with_buckets(
        &self,
        descriptor: MetricDescriptor,
        buckets: &[f64],
    ) -> Result<Metric> {
        self.register_inner(descriptor, Some(buckets))
    }

    fn register_inner(
        &self,
        descriptor: MetricDescriptor,
        buckets: Option<&[f64]>,
    ) -> Result<Metric> {
        let candidate = match descriptor.kind() {
            MetricKind::Counter => Metric::Counter(Counter::new(descriptor)),
            MetricKind::Gauge => Metric::Gauge(Gauge::new(descriptor)),
            MetricKind::Histogram => Metric::Histogram(Histogram::new(
                descriptor,
                buckets.unwrap_or(&DEFAULT_BUCKETS[..]),
            )?),
        };
        let name = candidate.descriptor().name().to_string();

        let mut metrics = self.metrics.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = metrics.iter().find(|m| m.descriptor().name() == name) {
            return match existing.conflict(&candidate, buckets.is_some()) {
                None => Ok(existing.clone()),
                Some(detail) => Err(PulseError::DuplicateMetric { name, detail }),
            };
        }

        tracing::debug!(
            metric = %name,
            kind = candidate.descriptor().kind().as_str(),
            "metric registered"
        );
        metrics.push(candidate.clone());
        Ok(candidate)
    }

    /// Registered metric by name.
    pub fn get(&self, name: &str) -> Option<Metric> {
        self.metrics
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|m| m.descriptor().name() == name)
            .cloned()
    }

    fn snapshot(&self) -> Vec<Metric> {
        self.metrics
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Every metric with its series; metrics never mutated have no samples.
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.snapshot().iter().map(Metric::family).collect()
    }

    /// Lazy sequence of every observed series: metrics in registration order,
    /// then label sets in first-seen order. Each metric's series are read when
    /// the iterator reaches it.
    pub fn collect(&self) -> impl Iterator<Item = CollectedSample> {
        self.snapshot().into_iter().flat_map(|metric| {
            let MetricFamily { descriptor, samples } = metric.family();
            samples.into_iter().map(move |(labels, value)| CollectedSample {
                descriptor: Arc::clone(&descriptor),
                labels,
                value,
            })
        })
    }

    /// Stream the text exposition into `w`. Sink errors are returned unchanged.
    pub fn encode<W: io::Write>(&self, w: &mut W) -> io::Result<()> {
        exposition::encode(w, self.gather())
    }

    /// Render the text exposition with its content type.
    pub fn render(&self) -> Exposition {
        let mut buf = Vec::new();
        if let Err(e) = self.encode(&mut buf) {
            tracing::error!(error = %e, "metrics exposition failed");
        }
        Exposition {
            body: Bytes::from(buf),
            content_type: exposition::CONTENT_TYPE,
        }
    }
}
