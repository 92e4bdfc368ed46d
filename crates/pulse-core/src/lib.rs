//! pulse core: the in-process metrics registry, its instruments, and the
//! Prometheus text exposition renderer.
//!
//! This crate has no HTTP or runtime dependencies. A [`metrics::Registry`] is
//! built once at startup and handed (via `Arc`) to whatever needs to register
//! or mutate instruments; there is no process-wide default registry.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Instrumentation
//! mistakes (bad labels, negative counter deltas, NaN observations, name
//! clashes) surface as [`PulseError`] to the caller.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metrics;

/// Shared result type.
pub use error::{ErrorCode, PulseError, Result};
