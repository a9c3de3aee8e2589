//! Checkpoint policy constants
//!
//! Spacing of service-node checkpoints, how long they are retained, and which
//! ones are kept forever.

use crate::error::{CheckpointError, CheckpointResult};
use serde::{Deserialize, Serialize};

/// Blocks between service-node checkpoints.
pub const CHECKPOINT_INTERVAL: u64 = 4;

/// Retention horizon; checkpoints at multiples of this are kept forever.
pub const CHECKPOINT_STORE_PERSISTENTLY_INTERVAL: u64 = 60;

/// Members of a checkpointing quorum.
pub const CHECKPOINT_QUORUM_SIZE: usize = 20;

/// Signatures required on a service-node checkpoint.
pub const CHECKPOINT_MIN_VOTES: usize = 13;

/// Service-node checkpoints needed before the older one becomes immutable.
pub const CHECKPOINT_NUM_CHECKPOINTS_FOR_CHAIN_FINALITY: usize = 2;

/// Block major version that activates service-node checkpointing.
pub const CHECKPOINTING_ACTIVATION_VERSION: u8 = 12;

/// Tunable checkpoint policy. `Default` is the mainnet policy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointPolicy {
    /// Spacing between service-node checkpoints.
    pub checkpoint_interval: u64,
    /// How far below the immutable checkpoint culling starts. Also the
    /// minimum height at which block-add processing does anything.
    pub retention_interval: u64,
    /// Checkpoints at multiples of this are never culled.
    pub persist_forever_interval: u64,
    /// Block major version from which checkpointing is active.
    pub activation_version: u8,
    pub quorum_size: usize,
    pub min_votes: usize,
}

impl Default for CheckpointPolicy {
    fn default() -> Self {
        Self {
            checkpoint_interval: CHECKPOINT_INTERVAL,
            retention_interval: CHECKPOINT_STORE_PERSISTENTLY_INTERVAL,
            persist_forever_interval: CHECKPOINT_STORE_PERSISTENTLY_INTERVAL,
            activation_version: CHECKPOINTING_ACTIVATION_VERSION,
            quorum_size: CHECKPOINT_QUORUM_SIZE,
            min_votes: CHECKPOINT_MIN_VOTES,
        }
    }
}

impl CheckpointPolicy {
    /// Reject policies the cull loop cannot run with.
    pub fn validate(&self) -> CheckpointResult<()> {
        if self.checkpoint_interval == 0 || self.persist_forever_interval == 0 {
            return Err(CheckpointError::InvalidPolicy {
                reason: "intervals must be non-zero".to_string(),
            });
        }
        if self.min_votes == 0 || self.min_votes > self.quorum_size {
            return Err(CheckpointError::InvalidPolicy {
                reason: format!(
                    "min_votes {} must be in 1..={}",
                    self.min_votes, self.quorum_size
                ),
            });
        }
        Ok(())
    }

    /// Round `height` up to the next multiple of the checkpoint interval.
    pub fn align_up(&self, height: u64) -> u64 {
        height
            .div_ceil(self.checkpoint_interval)
            .saturating_mul(self.checkpoint_interval)
    }

    /// Checkpoints at this height survive culling.
    pub fn is_persistent(&self, height: u64) -> bool {
        height % self.persist_forever_interval == 0
    }

    /// Is a service-node checkpoint expected at this height?
    pub fn is_checkpoint_height(&self, height: u64) -> bool {
        height % self.checkpoint_interval == 0
    }
}
