use std::sync::{Arc, Mutex, PoisonError};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::error::Result;

use super::{LabelSet, MetricDescriptor};

/// All series of one metric.
///
/// `index` serves lookups; `order` remembers first-seen order for collection.
/// A new series is appended to `order` while the vacant `index` entry is still
/// held, so a label set is inserted exactly once and `order` never lags a
/// series that a writer could already have mutated.
pub(crate) struct Family<C> {
    descriptor: Arc<MetricDescriptor>,
    index: DashMap<LabelSet, Arc<C>>,
    order: Mutex<Vec<(LabelSet, Arc<C>)>>,
}

impl<C> Family<C> {
    pub(crate) fn new(descriptor: MetricDescriptor) -> Self {
        Self {
            descriptor: Arc::new(descriptor),
            index: DashMap::new(),
            order: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn descriptor(&self) -> &Arc<MetricDescriptor> {
        &self.descriptor
    }

    pub(crate) fn resolve(&self, labels: &[(&str, &str)]) -> Result<LabelSet> {
        LabelSet::resolve(&self.descriptor, labels)
    }

    /// Existing series for `key`, or `None` if it was never mutated.
    pub(crate) fn lookup(&self, key: &LabelSet) -> Option<Arc<C>> {
        self.index.get(key).map(|c| Arc::clone(c.value()))
    }

    /// Series for `key`, creating it with `init` on first use.
    pub(crate) fn cell_or_insert_with(&self, key: LabelSet, init: impl FnOnce() -> C) -> Arc<C> {
        if let Some(cell) = self.lookup(&key) {
            return cell;
        }
        match self.index.entry(key) {
            Entry::Occupied(e) => Arc::clone(e.get()),
            Entry::Vacant(e) => {
                let cell = Arc::new(init());
                tracing::debug!(
                    metric = %self.descriptor.name(),
                    labels = ?e.key().values(),
                    "new series"
                );
                self.order
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push((e.key().clone(), Arc::clone(&cell)));
                e.insert(Arc::clone(&cell));
                cell
            }
        }
    }

    /// Snapshot of every series in first-seen order.
    pub(crate) fn series(&self) -> Vec<(LabelSet, Arc<C>)> {
        self.order
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
