use crate::error::{PulseError, Result};

/// Instrument type of a registered metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Counter,
    Gauge,
    Histogram,
}

impl MetricKind {
    /// Name used on the `# TYPE` line.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::Histogram => "histogram",
        }
    }
}

/// Immutable identity of a metric: name, help, kind and label names.
///
/// Label names are ordered; that order defines the [`LabelSet`](super::LabelSet)
/// tuple and the label order on exposition lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricDescriptor {
    name: String,
    help: String,
    kind: MetricKind,
    label_names: Vec<String>,
}

impl MetricDescriptor {
    /// Build a descriptor, validating the metric and label names.
    pub fn new(
        name: impl Into<String>,
        help: impl Into<String>,
        kind: MetricKind,
        label_names: &[&str],
    ) -> Result<Self> {
        let name = name.into();
        if !is_valid_metric_name(&name) {
            return Err(PulseError::InvalidName(format!("metric name {name:?}")));
        }

        let mut names: Vec<String> = Vec::with_capacity(label_names.len());
        for label in label_names {
            if !is_valid_label_name(label) || label.starts_with("__") {
                return Err(PulseError::InvalidName(format!(
                    "label name {label:?} on {name}"
                )));
            }
            if kind == MetricKind::Histogram && *label == "le" {
                return Err(PulseError::InvalidName(format!(
                    "label name \"le\" is reserved on histogram {name}"
                )));
            }
            if names.iter().any(|n| n == label) {
                return Err(PulseError::InvalidName(format!(
                    "label name {label:?} repeated on {name}"
                )));
            }
            names.push((*label).to_string());
        }

        Ok(Self {
            name,
            help: help.into(),
            kind,
            label_names: names,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    pub fn label_names(&self) -> &[String] {
        &self.label_names
    }
}

// [a-zA-Z_:][a-zA-Z0-9_:]*
fn is_valid_metric_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

// [a-zA-Z_][a-zA-Z0-9_]*
fn is_valid_label_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
