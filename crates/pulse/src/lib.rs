//! Top-level facade crate for pulse.
//!
//! Re-exports the metrics core and the demo service library so users can
//! depend on a single crate.

pub mod core {
    pub use pulse_core::*;
}

pub mod server {
    pub use pulse_server::*;
}
