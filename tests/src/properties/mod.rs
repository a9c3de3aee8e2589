//! # Property Tests
//!
//! Invariants checked over generated inputs with proptest.

pub mod blink_props;
