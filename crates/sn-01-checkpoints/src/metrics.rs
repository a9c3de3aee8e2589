//! # Checkpoint Metrics
//!
//! Prometheus metrics for the checkpoint store.
//!
//! Enable with the `metrics` feature:
//! ```toml
//! sn-01-checkpoints = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `checkpoints_stored_total` - Checkpoints written, labeled by kind
//! - `checkpoints_culled_total` - Checkpoints removed by cull or detach
//! - `checkpoints_cull_failures_total` - Removals the database refused
//! - `checkpoints_alt_blocks_rejected_total` - Alternative blocks refused below the immutable height
//! - `checkpoints_immutable_height` - Current immutable height

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_gauge, register_int_counter, register_int_counter_vec, Gauge, IntCounter,
    IntCounterVec,
};

#[cfg(feature = "metrics")]
lazy_static! {
    pub static ref CHECKPOINTS_STORED: IntCounterVec = register_int_counter_vec!(
        "checkpoints_stored_total",
        "Total number of checkpoints written",
        &["kind"]
    )
    .expect("Failed to create CHECKPOINTS_STORED metric");

    pub static ref CHECKPOINTS_CULLED: IntCounter = register_int_counter!(
        "checkpoints_culled_total",
        "Total number of checkpoints removed by cull or detach"
    )
    .expect("Failed to create CHECKPOINTS_CULLED metric");

    pub static ref CULL_FAILURES: IntCounter = register_int_counter!(
        "checkpoints_cull_failures_total",
        "Total number of checkpoint removals that failed"
    )
    .expect("Failed to create CULL_FAILURES metric");

    pub static ref ALT_BLOCKS_REJECTED: IntCounter = register_int_counter!(
        "checkpoints_alt_blocks_rejected_total",
        "Total number of alternative blocks refused below the immutable height"
    )
    .expect("Failed to create ALT_BLOCKS_REJECTED metric");

    pub static ref IMMUTABLE_HEIGHT: Gauge = register_gauge!(
        "checkpoints_immutable_height",
        "Current immutable height"
    )
    .expect("Failed to create IMMUTABLE_HEIGHT metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

#[cfg(feature = "metrics")]
pub fn record_checkpoint_stored(kind: &str) {
    CHECKPOINTS_STORED.with_label_values(&[kind]).inc();
}

#[cfg(feature = "metrics")]
pub fn record_cull(removed: usize, failed: usize) {
    CHECKPOINTS_CULLED.inc_by(removed as u64);
    CULL_FAILURES.inc_by(failed as u64);
}

#[cfg(feature = "metrics")]
pub fn record_alt_block_rejected() {
    ALT_BLOCKS_REJECTED.inc();
}

#[cfg(feature = "metrics")]
pub fn set_immutable_height(height: u64) {
    IMMUTABLE_HEIGHT.set(height as f64);
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_checkpoint_stored(_kind: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_cull(_removed: usize, _failed: usize) {}

#[cfg(not(feature = "metrics"))]
pub fn record_alt_block_rejected() {}

#[cfg(not(feature = "metrics"))]
pub fn set_immutable_height(_height: u64) {}
