//! Registry semantics: accumulation, ordering, idempotent registration.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use pulse_core::metrics::{
    CollectedSample, MetricDescriptor, MetricKind, Registry, SampleValue,
};

#[test]
fn counter_accumulates_per_label_set_only() {
    let registry = Registry::new();
    let c = registry.register_counter("bytes_total", "Bytes", &["dir"]).unwrap();

    let deltas = [0.5, 3.0, 0.0, 12.25, 1.0];
    for d in deltas {
        c.increment(&[("dir", "in")], d).unwrap();
    }
    c.increment(&[("dir", "out")], 99.0).unwrap();

    assert_eq!(c.get(&[("dir", "in")]).unwrap(), Some(deltas.iter().sum::<f64>()));
    assert_eq!(c.get(&[("dir", "out")]).unwrap(), Some(99.0));
}

#[test]
fn rejected_increment_leaves_value_unchanged() {
    let registry = Registry::new();
    let c = registry.register_counter("requests_total", "Requests", &["status"]).unwrap();
    c.inc(&[("status", "200")]).unwrap();

    let err = c.increment(&[("status", "200")], -1.0).unwrap_err();
    assert_eq!(err.code().as_str(), "INVALID_VALUE");
    assert_eq!(c.get(&[("status", "200")]).unwrap(), Some(1.0));
}

#[test]
fn histogram_buckets_track_observations() {
    let registry = Registry::new();
    let bounds = [0.25, 0.5, 1.0, 4.0];
    let h = registry.register_histogram("size", "Size", &[], &bounds).unwrap();

    let values = [0.1, 0.25, 0.3, 0.9, 1.0, 3.9, 4.0, 7.0, -2.0, 0.5];
    for v in values {
        h.observe(&[], v).unwrap();
    }

    let snap = h.snapshot(&[]).unwrap().unwrap();
    for (bound, count) in &snap.buckets {
        let expected = values.iter().filter(|v| **v <= *bound).count() as u64;
        assert_eq!(*count, expected, "bucket le={bound}");
    }
    assert_eq!(snap.buckets.last().map(|b| b.1), Some(snap.count));
    assert_eq!(snap.count, values.len() as u64);
    assert_eq!(snap.sum, values.iter().sum::<f64>());
}

#[test]
fn collect_is_stable_and_ordered() {
    let registry = Registry::new();
    let c = registry.register_counter("a_total", "A", &["k"]).unwrap();
    let g = registry.register_gauge("b", "B", &[]).unwrap();
    let h = registry.register_histogram("c", "C", &["k"], &[1.0]).unwrap();

    c.inc(&[("k", "z")]).unwrap();
    h.observe(&[("k", "y")], 0.5).unwrap();
    c.inc(&[("k", "a")]).unwrap();
    g.set(&[], 4.0).unwrap();
    c.inc(&[("k", "z")]).unwrap();

    let first: Vec<CollectedSample> = registry.collect().collect();
    let second: Vec<CollectedSample> = registry.collect().collect();
    assert_eq!(first, second);

    let order: Vec<(&str, Vec<String>)> = first
        .iter()
        .map(|s| (s.descriptor.name(), s.labels.values().to_vec()))
        .collect();
    assert_eq!(
        order,
        [
            ("a_total", vec!["z".to_string()]),
            ("a_total", vec!["a".to_string()]),
            ("b", vec![]),
            ("c", vec!["y".to_string()]),
        ]
    );
    assert_eq!(first[0].value, SampleValue::Counter(2.0));
    assert_eq!(first[2].value, SampleValue::Gauge(4.0));
}

#[test]
fn reregistration_is_idempotent_and_kind_clash_fails() {
    let registry = Registry::new();
    let d = || MetricDescriptor::new("jobs", "Jobs", MetricKind::Counter, &["queue"]).unwrap();

    let first = registry.register(d()).unwrap();
    let again = registry.register(d()).unwrap();
    first.as_counter().unwrap().inc(&[("queue", "q")]).unwrap();
    assert_eq!(again.as_counter().unwrap().get(&[("queue", "q")]).unwrap(), Some(1.0));

    let gauge = MetricDescriptor::new("jobs", "Jobs", MetricKind::Gauge, &["queue"]).unwrap();
    let err = registry.register(gauge).err().unwrap();
    assert_eq!(err.code().as_str(), "DUPLICATE_METRIC");
    assert_eq!(registry.gather().len(), 1);
}

#[test]
fn registries_are_independent() {
    let a = Registry::new();
    let b = Registry::new();
    a.register_counter("x_total", "X", &[]).unwrap().inc(&[]).unwrap();
    b.register_gauge("x_total", "X as gauge", &[]).unwrap();

    assert_eq!(a.collect().count(), 1);
    assert_eq!(b.collect().count(), 0);
}
