//! # Blink Metrics
//!
//! Prometheus metrics for blink voting, enabled with the `metrics` feature.
//!
//! ## Metrics Exported
//!
//! - `blink_votes_accepted_total` - Votes recorded
//! - `blink_votes_duplicate_total` - Votes for an already filled slot
//! - `blink_signature_failures_total` - Votes whose signature did not verify
//! - `blink_tx_finalized_total` - Transactions reaching a verdict, labeled by outcome

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    pub static ref VOTES_ACCEPTED: IntCounter = register_int_counter!(
        "blink_votes_accepted_total",
        "Total number of blink votes recorded"
    )
    .expect("Failed to create VOTES_ACCEPTED metric");

    pub static ref VOTES_DUPLICATE: IntCounter = register_int_counter!(
        "blink_votes_duplicate_total",
        "Total number of blink votes for an already filled slot"
    )
    .expect("Failed to create VOTES_DUPLICATE metric");

    pub static ref SIGNATURE_FAILURES: IntCounter = register_int_counter!(
        "blink_signature_failures_total",
        "Total number of blink votes with invalid signatures"
    )
    .expect("Failed to create SIGNATURE_FAILURES metric");

    pub static ref TX_FINALIZED: IntCounterVec = register_int_counter_vec!(
        "blink_tx_finalized_total",
        "Total number of blink transactions reaching a verdict",
        &["outcome"]
    )
    .expect("Failed to create TX_FINALIZED metric");
}

#[cfg(feature = "metrics")]
pub fn record_vote(added: bool) {
    if added {
        VOTES_ACCEPTED.inc();
    } else {
        VOTES_DUPLICATE.inc();
    }
}

#[cfg(feature = "metrics")]
pub fn record_signature_failure() {
    SIGNATURE_FAILURES.inc();
}

#[cfg(feature = "metrics")]
pub fn record_tx_finalized(outcome: &str) {
    TX_FINALIZED.with_label_values(&[outcome]).inc();
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_vote(_added: bool) {}

#[cfg(not(feature = "metrics"))]
pub fn record_signature_failure() {}

#[cfg(not(feature = "metrics"))]
pub fn record_tx_finalized(_outcome: &str) {}
