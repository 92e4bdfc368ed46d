//! Prometheus text exposition format (version 0.0.4).
//!
//! Per metric: `# HELP`, `# TYPE`, then every series in first-seen order.
//! Histogram series expand to one `_bucket` line per bound plus `_sum` and
//! `_count`, all contiguous.

use std::io::{self, Write};

use bytes::Bytes;

use super::{HistogramSnapshot, LabelSet, MetricDescriptor, MetricFamily, SampleValue};

/// Content type of the rendered body.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Rendered exposition body plus its content type.
#[derive(Debug, Clone)]
pub struct Exposition {
    pub body: Bytes,
    pub content_type: &'static str,
}

/// Write `families` to `w`.
pub fn encode<W: Write>(
    w: &mut W,
    families: impl IntoIterator<Item = MetricFamily>,
) -> io::Result<()> {
    for family in families {
        let d = &family.descriptor;
        writeln!(w, "# HELP {} {}", d.name(), escape_help(d.help()))?;
        writeln!(w, "# TYPE {} {}", d.name(), d.kind().as_str())?;

        for (labels, value) in &family.samples {
            match value {
                SampleValue::Counter(v) | SampleValue::Gauge(v) => {
                    write_sample(w, "", None, d, labels, *v)?;
                }
                SampleValue::Histogram(snap) => write_histogram(w, d, labels, snap)?,
            }
        }
    }
    Ok(())
}

fn write_histogram<W: Write>(
    w: &mut W,
    d: &MetricDescriptor,
    labels: &LabelSet,
    snap: &HistogramSnapshot,
) -> io::Result<()> {
    for (bound, count) in &snap.buckets {
        let le = format_bound(*bound);
        write_sample(w, "_bucket", Some(&le), d, labels, *count as f64)?;
    }
    write_sample(w, "_sum", None, d, labels, snap.sum)?;
    write_sample(w, "_count", None, d, labels, snap.count as f64)
}

fn write_sample<W: Write>(
    w: &mut W,
    suffix: &str,
    le: Option<&str>,
    d: &MetricDescriptor,
    labels: &LabelSet,
    value: f64,
) -> io::Result<()> {
    write!(w, "{}{suffix}", d.name())?;

    let mut pairs: Vec<String> = Vec::with_capacity(labels.values().len() + 1);
    if let Some(le) = le {
        pairs.push(format!("le=\"{le}\""));
    }
    pairs.extend(
        labels
            .pairs(d)
            .map(|(k, v)| format!("{k}=\"{}\"", escape_label(v))),
    );
    if !pairs.is_empty() {
        write!(w, "{{{}}}", pairs.join(","))?;
    }

    writeln!(w, " {}", format_value(value))
}

/// Shortest round-trip decimal; integral values print without a fraction.
pub fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".into()
    } else if v == f64::INFINITY {
        "+Inf".into()
    } else if v == f64::NEG_INFINITY {
        "-Inf".into()
    } else {
        v.to_string()
    }
}

/// Bucket bounds always carry a fraction (`1.0`, not `1`).
pub fn format_bound(b: f64) -> String {
    let s = format_value(b);
    if b.is_finite() && !s.contains('.') {
        format!("{s}.0")
    } else {
        s
    }
}

fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn values() {
        assert_eq!(format_value(3.0), "3");
        assert_eq!(format_value(2.65), "2.65");
        assert_eq!(format_value(-0.5), "-0.5");
        assert_eq!(format_value(1e21), "1000000000000000000000");
        assert_eq!(format_value(f64::INFINITY), "+Inf");
        assert_eq!(format_value(f64::NEG_INFINITY), "-Inf");
        assert_eq!(format_value(f64::NAN), "NaN");
    }

    #[test]
    fn bounds() {
        assert_eq!(format_bound(0.1), "0.1");
        assert_eq!(format_bound(1.0), "1.0");
        assert_eq!(format_bound(10.0), "10.0");
        assert_eq!(format_bound(f64::INFINITY), "+Inf");
    }

    #[test]
    fn escaping() {
        assert_eq!(escape_label("a\"b\\c\nd"), "a\\\"b\\\\c\\nd");
        assert_eq!(escape_help("line1\nline2 \"q\""), "line1\\nline2 \"q\"");
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn sink_errors_propagate() {
        let registry = crate::metrics::Registry::new();
        registry.register_gauge("up", "h", &[]).unwrap();
        let err = registry.encode(&mut FailingSink).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
