//! Driving Ports (API - Inbound)
//!
//! Called by the blockchain from its add/detach and fork-choice paths, always
//! under the blockchain lock. Storage failures never cross this boundary:
//! they are logged and reported as `false`, `None` or an empty result.

use crate::domain::{Checkpoint, CullReport};
use crate::error::CheckpointResult;
use shared_types::Hash;
use std::path::Path;

/// Result of checking a block against the checkpoint at its height
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockCheck {
    /// False only when a checkpoint exists and its hash differs
    pub valid: bool,
    pub is_checkpoint: bool,
    pub is_service_node_checkpoint: bool,
}

/// Result of the alternative-chain gate
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AltBlockDecision {
    pub allowed: bool,
    /// The immutable checkpoint that bounded the decision was signed by a quorum
    pub service_node_checkpoint: bool,
}

/// Result of processing a newly added block
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockAddOutcome {
    pub cull: CullReport,
    /// `None` when the block carried no checkpoint or checkpointing was inactive
    pub checkpoint_stored: Option<bool>,
}

/// Primary Checkpoint API
pub trait CheckpointApi {
    /// Stored checkpoint at `height`.
    fn get(&self, height: u64) -> Option<Checkpoint>;

    /// Add a hardcoded checkpoint. Succeeds as a no-op when the same hash is
    /// already stored, fails when a different one is.
    fn add(&self, height: u64, hash: Hash) -> bool;

    /// Write `checkpoint` inside a batch.
    fn update(&self, checkpoint: &Checkpoint) -> bool;

    /// Cull stale checkpoints and store the block's checkpoint, if any.
    fn on_block_add(
        &mut self,
        height: u64,
        major_version: u8,
        checkpoint: Option<&Checkpoint>,
    ) -> BlockAddOutcome;

    /// Remove every checkpoint at or above `height` (genesis excluded).
    fn on_block_detach(&mut self, height: u64) -> CullReport;

    fn is_in_checkpoint_zone(&self, height: u64) -> bool;

    fn check_block(&self, height: u64, hash: &Hash) -> BlockCheck;

    /// May a block at `candidate_height` replace the main chain's block?
    fn is_alternative_block_allowed(&mut self, chain_height: u64, candidate_height: u64) -> bool {
        self.alternative_block_decision(chain_height, candidate_height)
            .allowed
    }

    fn alternative_block_decision(
        &mut self,
        chain_height: u64,
        candidate_height: u64,
    ) -> AltBlockDecision;

    /// Height of the top checkpoint, or 0.
    fn max_height(&self) -> u64;

    fn checkpoints_in_range(&self, start: u64, end: u64, limit: usize) -> Vec<Checkpoint>;

    /// Merge a checkpoint hash file. Returns the number of checkpoints added.
    fn load_checkpoints_from_json(&self, path: &Path) -> CheckpointResult<usize>;
}
