//! Driving Ports (API - Inbound)
//!
//! Called from the vote-dispatch path. Each `BlinkTx` has a single mutator.

use crate::domain::{BlinkStatus, BlinkTx, BlinkWirePayload, Subquorum};
use crate::error::BlinkResult;
use shared_types::{PublicKey, Signature};

/// Result of one vote
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoteOutcome {
    /// False when the slot already held a vote
    pub added: bool,
    pub status: BlinkStatus,
    /// The vote moved the tx out of `Pending`
    pub status_changed: bool,
}

/// Primary Blink API
pub trait BlinkVotingApi {
    /// Key of the validator at `position` in `subquorum` for this tx.
    ///
    /// `None` when the quorum is unknown or smaller than `position`.
    fn validator_pubkey(&self, tx: &BlinkTx, subquorum: Subquorum, position: usize)
        -> Option<PublicKey>;

    /// Reject the slots of validators that do not exist.
    fn prepare(&self, tx: &mut BlinkTx) -> BlinkResult<()>;

    /// Verify and record one vote.
    fn receive_vote(
        &self,
        tx: &mut BlinkTx,
        subquorum: Subquorum,
        position: usize,
        approved: bool,
        signature: Signature,
    ) -> BlinkResult<VoteOutcome>;

    /// Verify and record every approval in a relayed payload. Returns how
    /// many were new.
    fn apply_wire_payload(&self, tx: &mut BlinkTx, payload: &BlinkWirePayload)
        -> BlinkResult<usize>;
}
