//! # Service-Node Finality Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Deterministic keys, quorums and signed checkpoints
//! ├── integration/      # End-to-end flows per subsystem
//! │   ├── checkpoint_flows.rs
//! │   ├── blink_flows.rs
//! │   └── telemetry_flow.rs
//! └── properties/       # proptest invariants
//!     ├── checkpoint_props.rs
//!     └── blink_props.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p sn-tests
//!
//! # By category
//! cargo test -p sn-tests integration::
//! cargo test -p sn-tests properties::
//!
//! # Benchmarks
//! cargo bench -p sn-tests
//! ```

pub mod fixtures;
pub mod integration;
pub mod properties;
