//! Metrics registry with counter/gauge/histogram instruments.
//!
//! Each registered metric owns a family of series keyed by [`LabelSet`].
//! Series are created lazily on first mutation and live as long as the
//! registry; there is no eviction, so label cardinality is bounded only by the
//! instrumented code.

mod atomic;
mod counter;
mod descriptor;
pub mod exposition;
mod family;
mod gauge;
mod histogram;
mod labels;
mod registry;

pub use counter::Counter;
pub use descriptor::{MetricDescriptor, MetricKind};
pub use exposition::{Exposition, CONTENT_TYPE};
pub use gauge::Gauge;
pub use histogram::{Histogram, HistogramSnapshot, DEFAULT_BUCKETS};
pub use labels::LabelSet;
pub use registry::{CollectedSample, Metric, MetricFamily, Registry, SampleValue};
