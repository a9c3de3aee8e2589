//! Service-node checkpoint verification
//!
//! Checks a checkpoint against the checkpointing quorum for its height before
//! it is handed to the store.

use super::{Checkpoint, CheckpointKind, CheckpointPolicy};
use crate::error::{CheckpointError, CheckpointResult};
use shared_crypto::verify_signature;
use shared_types::Quorum;

/// Verify `checkpoint` against `quorum` under `policy`.
///
/// Service-node checkpoints need a checkpoint height, between `min_votes`
/// and `quorum_size` signatures, voter indices strictly ascending and inside
/// the quorum, and every signature valid over the block hash. Hardcoded
/// checkpoints must carry no signatures.
pub fn verify_checkpoint(
    checkpoint: &Checkpoint,
    quorum: &Quorum,
    policy: &CheckpointPolicy,
) -> CheckpointResult<()> {
    let height = checkpoint.height;

    if checkpoint.kind == CheckpointKind::Hardcoded {
        if !checkpoint.signatures.is_empty() {
            return Err(CheckpointError::UnexpectedSignatures { height });
        }
        return Ok(());
    }

    if !policy.is_checkpoint_height(height) {
        return Err(CheckpointError::UnexpectedHeight {
            height,
            interval: policy.checkpoint_interval,
        });
    }

    let count = checkpoint.signatures.len();
    if count < policy.min_votes {
        return Err(CheckpointError::InsufficientSignatures {
            height,
            have: count,
            need: policy.min_votes,
        });
    }
    if count > policy.quorum_size {
        return Err(CheckpointError::TooManySignatures {
            height,
            have: count,
            max: policy.quorum_size,
        });
    }

    let mut previous: Option<u16> = None;
    for vote in &checkpoint.signatures {
        if previous.is_some_and(|prev| vote.voter_index <= prev) {
            return Err(CheckpointError::VotersNotAscending { height });
        }
        previous = Some(vote.voter_index);

        let key = quorum.validator(vote.voter_index as usize).ok_or(
            CheckpointError::VoterIndexOutOfRange {
                voter_index: vote.voter_index,
                quorum_size: quorum.len(),
            },
        )?;

        if !verify_signature(&checkpoint.block_hash, key, &vote.signature) {
            return Err(CheckpointError::InvalidSignature {
                height,
                voter_index: vote.voter_index,
            });
        }
    }

    Ok(())
}
