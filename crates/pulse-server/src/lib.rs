//! pulse demo service library.
//!
//! Wires a handful of simulated business endpoints to the pulse-core metrics
//! registry and exposes the registry on `/metrics`. Consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
pub mod simulate;
