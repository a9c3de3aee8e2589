//! Blink Voting Engine
//!
//! Resolves validator keys through the quorum provider and drives votes into
//! a [`BlinkTx`]. Holds no per-transaction state.

use crate::domain::{BlinkStatus, BlinkTx, BlinkWirePayload, Subquorum, BLINK_SUBQUORUM_SIZE};
use crate::error::{BlinkError, BlinkResult};
use crate::metrics;
use crate::ports::inbound::{BlinkVotingApi, VoteOutcome};
use crate::ports::outbound::{Quorum, QuorumProvider, QuorumType};
use shared_types::{short_hex, PublicKey, Signature};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct BlinkVotingEngine<Q: QuorumProvider> {
    quorums: Arc<Q>,
}

impl<Q: QuorumProvider> BlinkVotingEngine<Q> {
    pub fn new(quorums: Arc<Q>) -> Self {
        Self { quorums }
    }

    fn quorum_for(&self, tx: &BlinkTx, subquorum: Subquorum) -> Option<Arc<Quorum>> {
        let height = tx.quorum_height(subquorum)?;
        self.quorums.get_quorum(QuorumType::Blink, height)
    }

    fn note_transition(tx: &BlinkTx, before: BlinkStatus) -> bool {
        let after = tx.status();
        if before == after {
            return false;
        }
        match after {
            BlinkStatus::Approved => {
                metrics::record_tx_finalized("approved");
                info!(tx_hash = %short_hex(tx.tx_hash()), height = tx.height(), "[sn-02] Blink tx approved");
            }
            BlinkStatus::Rejected => {
                metrics::record_tx_finalized("rejected");
                info!(tx_hash = %short_hex(tx.tx_hash()), height = tx.height(), "[sn-02] Blink tx rejected");
            }
            BlinkStatus::Pending => {}
        }
        true
    }

    /// Resolve the voter's key and check the signature. Records nothing.
    fn verify_vote(
        &self,
        tx: &BlinkTx,
        subquorum: Subquorum,
        position: usize,
        approved: bool,
        signature: &Signature,
    ) -> BlinkResult<()> {
        let pubkey = self
            .validator_pubkey(tx, subquorum, position)
            .ok_or(BlinkError::UnknownVoter {
                subquorum,
                position,
            })?;

        let result = tx.verify_vote(subquorum, position, approved, signature, &pubkey);
        if matches!(result, Err(BlinkError::SignatureVerification { .. })) {
            metrics::record_signature_failure();
            warn!(
                tx_hash = %short_hex(tx.tx_hash()),
                subquorum = %subquorum,
                position,
                "[sn-02] Blink signature failed verification"
            );
        }
        result
    }

    fn record_verified(
        tx: &mut BlinkTx,
        subquorum: Subquorum,
        position: usize,
        approved: bool,
        signature: Signature,
    ) -> BlinkResult<bool> {
        let added = tx.add_prechecked_signature(subquorum, position, approved, signature)?;
        metrics::record_vote(added);
        Ok(added)
    }
}

impl<Q: QuorumProvider> BlinkVotingApi for BlinkVotingEngine<Q> {
    fn validator_pubkey(
        &self,
        tx: &BlinkTx,
        subquorum: Subquorum,
        position: usize,
    ) -> Option<PublicKey> {
        if position >= BLINK_SUBQUORUM_SIZE {
            return None;
        }
        let Some(quorum) = self.quorum_for(tx, subquorum) else {
            warn!(
                height = tx.height(),
                subquorum = %subquorum,
                "[sn-02] No blink quorum for transaction height"
            );
            return None;
        };
        let key = quorum.validator(position).copied();
        if key.is_none() {
            debug!(
                subquorum = %subquorum,
                position,
                quorum_size = quorum.len(),
                "[sn-02] Position beyond live blink quorum"
            );
        }
        key
    }

    fn prepare(&self, tx: &mut BlinkTx) -> BlinkResult<()> {
        for subquorum in Subquorum::ALL {
            let live = self.quorum_for(tx, subquorum).map_or(0, |q| q.len());
            if live < BLINK_SUBQUORUM_SIZE {
                debug!(subquorum = %subquorum, live, "[sn-02] Short blink quorum");
                tx.limit_signatures(subquorum, live)?;
            }
        }
        Ok(())
    }

    fn receive_vote(
        &self,
        tx: &mut BlinkTx,
        subquorum: Subquorum,
        position: usize,
        approved: bool,
        signature: Signature,
    ) -> BlinkResult<VoteOutcome> {
        if position >= BLINK_SUBQUORUM_SIZE {
            return Err(BlinkError::InvalidPosition { position });
        }
        self.verify_vote(tx, subquorum, position, approved, &signature)?;
        let before = tx.status();
        let added = Self::record_verified(tx, subquorum, position, approved, signature)?;
        let status_changed = Self::note_transition(tx, before);

        Ok(VoteOutcome {
            added,
            status: tx.status(),
            status_changed,
        })
    }

    fn apply_wire_payload(
        &self,
        tx: &mut BlinkTx,
        payload: &BlinkWirePayload,
    ) -> BlinkResult<usize> {
        if payload.tx_hash != *tx.tx_hash() || payload.height != tx.height() {
            return Err(BlinkError::MalformedPayload {
                reason: format!(
                    "payload for {} at {} does not match {} at {}",
                    short_hex(&payload.tx_hash),
                    payload.height,
                    short_hex(tx.tx_hash()),
                    tx.height()
                ),
            });
        }

        // All or nothing: one bad entry leaves the tx untouched.
        let entries = payload.entries()?;
        for (subquorum, position, signature) in &entries {
            self.verify_vote(tx, *subquorum, *position, true, signature)?;
        }

        let before = tx.status();
        let mut added = 0;
        for (subquorum, position, signature) in entries {
            if Self::record_verified(tx, subquorum, position, true, signature)? {
                added += 1;
            }
        }
        if Self::note_transition(tx, before) {
            debug!(
                tx_hash = %short_hex(tx.tx_hash()),
                added,
                "[sn-02] Relayed approvals finalised blink tx"
            );
        }
        Ok(added)
    }
}
