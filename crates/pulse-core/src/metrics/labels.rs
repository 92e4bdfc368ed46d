use crate::error::{PulseError, Result};

use super::MetricDescriptor;

/// Label values of one series, ordered by the descriptor's label names.
///
/// Equality and hashing are those of the ordered value tuple, so two lookups
/// that name the same values in a different order resolve to the same series.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct LabelSet(Vec<String>);

impl LabelSet {
    /// Resolve `(name, value)` pairs against `descriptor`.
    ///
    /// Keys must be exactly the descriptor's label names: none missing, none
    /// unknown, none repeated. Pair order does not matter.
    pub fn resolve(descriptor: &MetricDescriptor, labels: &[(&str, &str)]) -> Result<Self> {
        let names = descriptor.label_names();
        let mismatch = || PulseError::InvalidLabelSet {
            metric: descriptor.name().to_string(),
            expected: names.to_vec(),
            got: labels.iter().map(|(k, _)| (*k).to_string()).collect(),
        };

        if labels.len() != names.len() {
            return Err(mismatch());
        }

        let mut values: Vec<Option<&str>> = vec![None; names.len()];
        for (key, value) in labels {
            let idx = names.iter().position(|n| n == key).ok_or_else(mismatch)?;
            if values[idx].replace(*value).is_some() {
                return Err(mismatch());
            }
        }

        // Same length, no repeats, no unknowns: every slot is filled.
        Ok(Self(
            values
                .into_iter()
                .map(|v| v.unwrap_or_default().to_string())
                .collect(),
        ))
    }

    /// Values in label-name order.
    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pair each value with its name from `descriptor`.
    pub fn pairs<'a>(
        &'a self,
        descriptor: &'a MetricDescriptor,
    ) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        descriptor
            .label_names()
            .iter()
            .map(String::as_str)
            .zip(self.0.iter().map(String::as_str))
    }
}
