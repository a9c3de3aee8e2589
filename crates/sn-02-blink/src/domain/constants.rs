//! Blink quorum constants
//!
//! These size fixed arrays, so they are compile-time constants rather than
//! configuration.

/// Validators per subquorum.
pub const BLINK_SUBQUORUM_SIZE: usize = 10;

/// Approvals each subquorum must reach.
pub const BLINK_MIN_VOTES: usize = 7;

/// Rejections after which a subquorum can no longer approve.
pub const BLINK_MAX_REJECTIONS: usize = BLINK_SUBQUORUM_SIZE - BLINK_MIN_VOTES;

/// Number of independent subquorums voting on a transaction.
pub const NUM_BLINK_SUBQUORUMS: usize = 2;

/// Blink quorums are generated every this many blocks.
pub const BLINK_QUORUM_INTERVAL: u64 = 5;

/// How far behind the transaction height the base quorum is taken from.
pub const BLINK_QUORUM_LAG: u64 = 7 * BLINK_QUORUM_INTERVAL;
