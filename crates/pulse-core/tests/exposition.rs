//! End-to-end rendering through the registry.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use pulse_core::metrics::{Registry, CONTENT_TYPE};

fn render(registry: &Registry) -> String {
    let out = registry.render();
    assert_eq!(out.content_type, CONTENT_TYPE);
    String::from_utf8(out.body.to_vec()).expect("exposition is utf-8")
}

fn value_of(text: &str, series: &str) -> f64 {
    let line = text
        .lines()
        .find(|l| l.starts_with(series) && l[series.len()..].starts_with(' '))
        .unwrap_or_else(|| panic!("no line for {series} in:\n{text}"));
    line[series.len() + 1..].parse().unwrap()
}

#[test]
fn counter_lines_with_help_and_type() {
    let registry = Registry::new();
    let requests = registry
        .register_counter("requests_total", "Total requests", &["status"])
        .unwrap();
    for _ in 0..3 {
        requests.inc(&[("status", "200")]).unwrap();
    }
    requests.inc(&[("status", "500")]).unwrap();

    let text = render(&registry);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        [
            "# HELP requests_total Total requests",
            "# TYPE requests_total counter",
            "requests_total{status=\"200\"} 3",
            "requests_total{status=\"500\"} 1",
        ]
    );
}

#[test]
fn histogram_buckets_sum_and_count() {
    let registry = Registry::new();
    let h = registry
        .register_histogram("op_seconds", "Op latency", &[], &[0.1, 0.5, 1.0])
        .unwrap();
    let observed = [0.05, 0.3, 0.3, 2.0];
    for v in observed {
        h.observe(&[], v).unwrap();
    }

    let text = render(&registry);
    assert!(text.contains("# TYPE op_seconds histogram\n"));
    assert_eq!(value_of(&text, "op_seconds_bucket{le=\"0.1\"}"), 1.0);
    assert_eq!(value_of(&text, "op_seconds_bucket{le=\"0.5\"}"), 3.0);
    assert_eq!(value_of(&text, "op_seconds_bucket{le=\"1.0\"}"), 3.0);
    assert_eq!(value_of(&text, "op_seconds_bucket{le=\"+Inf\"}"), 4.0);
    assert_eq!(value_of(&text, "op_seconds_count"), 4.0);

    let sum = value_of(&text, "op_seconds_sum");
    assert_eq!(sum, observed.iter().sum::<f64>());
    assert!((sum - 2.65).abs() < 1e-9);
}

#[test]
fn histogram_series_are_contiguous_per_label_set() {
    let registry = Registry::new();
    let h = registry
        .register_histogram("rpc_seconds", "RPC latency", &["method"], &[1.0])
        .unwrap();
    h.observe(&[("method", "get")], 0.5).unwrap();
    h.observe(&[("method", "put")], 3.0).unwrap();
    h.observe(&[("method", "get")], 2.0).unwrap();

    let text = render(&registry);
    let data: Vec<&str> = text.lines().filter(|l| !l.starts_with('#')).collect();
    assert_eq!(
        data,
        [
            "rpc_seconds_bucket{le=\"1.0\",method=\"get\"} 1",
            "rpc_seconds_bucket{le=\"+Inf\",method=\"get\"} 2",
            "rpc_seconds_sum{method=\"get\"} 2.5",
            "rpc_seconds_count{method=\"get\"} 2",
            "rpc_seconds_bucket{le=\"1.0\",method=\"put\"} 0",
            "rpc_seconds_bucket{le=\"+Inf\",method=\"put\"} 1",
            "rpc_seconds_sum{method=\"put\"} 3",
            "rpc_seconds_count{method=\"put\"} 1",
        ]
    );
}

#[test]
fn metrics_render_in_registration_order() {
    let registry = Registry::new();
    let users = registry.register_gauge("active_users", "Number of active users", &[]).unwrap();
    let errors = registry
        .register_counter("application_errors_total", "Total application errors", &["error_type"])
        .unwrap();
    registry.register_gauge("cpu_usage_percent", "Simulated CPU usage percentage", &[]).unwrap();

    errors.inc(&[("error_type", "timeout")]).unwrap();
    users.set(&[], 137.0).unwrap();

    let text = render(&registry);
    let expected = "\
# HELP active_users Number of active users
# TYPE active_users gauge
active_users 137
# HELP application_errors_total Total application errors
# TYPE application_errors_total counter
application_errors_total{error_type=\"timeout\"} 1
# HELP cpu_usage_percent Simulated CPU usage percentage
# TYPE cpu_usage_percent gauge
";
    assert_eq!(text, expected);
}

#[test]
fn label_values_and_help_are_escaped() {
    let registry = Registry::new();
    let c = registry
        .register_counter("paths_total", "Paths seen\nper route", &["path"])
        .unwrap();
    c.inc(&[("path", "/a\"b\\c")]).unwrap();

    let text = render(&registry);
    assert!(text.contains("# HELP paths_total Paths seen\\nper route\n"));
    assert!(text.contains("paths_total{path=\"/a\\\"b\\\\c\"} 1\n"));
}

#[test]
fn labels_follow_descriptor_order() {
    let registry = Registry::new();
    let c = registry
        .register_counter(
            "http_requests_total",
            "Total HTTP requests",
            &["method", "endpoint", "status"],
        )
        .unwrap();
    c.inc(&[("status", "200"), ("endpoint", "/"), ("method", "GET")])
        .unwrap();

    let text = render(&registry);
    assert!(text.contains(
        "http_requests_total{method=\"GET\",endpoint=\"/\",status=\"200\"} 1\n"
    ));
}
