//! Service instrumentation on top of the pulse-core registry.

pub mod metrics;
