//! Blink transaction vote state
//!
//! Votes from the two subquorums are held in fixed arrays indexed by
//! [`Subquorum`] and position; nothing here allocates on the vote path.

use super::{
    BlinkWirePayload, SignatureSlot, SignatureStatus, Subquorum, BLINK_MAX_REJECTIONS,
    BLINK_MIN_VOTES, BLINK_QUORUM_INTERVAL, BLINK_QUORUM_LAG, BLINK_SUBQUORUM_SIZE,
    NUM_BLINK_SUBQUORUMS,
};
use crate::error::{BlinkError, BlinkResult};
use serde::{Deserialize, Serialize};
use shared_crypto::{keccak256_many, verify_signature};
use shared_types::{Hash, PublicKey, Signature};

/// Digest a validator signs to approve or reject `tx_hash` at `height`:
/// `keccak256(height as u64 LE || tx_hash || approved as u8)`.
pub fn canonical_digest(height: u64, tx_hash: &Hash, approved: bool) -> Hash {
    keccak256_many(&[
        &height.to_le_bytes()[..],
        &tx_hash[..],
        &[u8::from(approved)][..],
    ])
}

/// Height of the quorum that forms `subquorum` for a tx at `height`.
///
/// `None` when the chain is too short for that quorum to exist.
pub fn quorum_height(height: u64, subquorum: Subquorum) -> Option<u64> {
    let offset = subquorum.index() as u64 * BLINK_QUORUM_INTERVAL;
    (height - height % BLINK_QUORUM_INTERVAL)
        .checked_add(offset)?
        .checked_sub(BLINK_QUORUM_LAG)
}

/// Where a blink transaction stands. Rejection takes precedence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlinkStatus {
    Pending,
    Approved,
    Rejected,
}

/// Vote state for one blink transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlinkTx {
    tx_hash: Hash,
    height: u64,
    signatures: [[SignatureSlot; BLINK_SUBQUORUM_SIZE]; NUM_BLINK_SUBQUORUMS],
}

fn check_position(position: usize) -> BlinkResult<()> {
    if position >= BLINK_SUBQUORUM_SIZE {
        return Err(BlinkError::InvalidPosition { position });
    }
    Ok(())
}

impl BlinkTx {
    pub fn new(tx_hash: Hash, height: u64) -> Self {
        Self {
            tx_hash,
            height,
            signatures: [[SignatureSlot::EMPTY; BLINK_SUBQUORUM_SIZE]; NUM_BLINK_SUBQUORUMS],
        }
    }

    pub fn tx_hash(&self) -> &Hash {
        &self.tx_hash
    }

    pub fn height(&self) -> u64 {
        self.height
    }

    pub fn digest(&self, approved: bool) -> Hash {
        canonical_digest(self.height, &self.tx_hash, approved)
    }

    pub fn quorum_height(&self, subquorum: Subquorum) -> Option<u64> {
        quorum_height(self.height, subquorum)
    }

    /// Verify `signature` by `pubkey` and record it.
    ///
    /// A bad signature is an error, never a silent no-op. Returns `false`
    /// when the slot already held a vote.
    pub fn add_signature(
        &mut self,
        subquorum: Subquorum,
        position: usize,
        approved: bool,
        signature: Signature,
        pubkey: &PublicKey,
    ) -> BlinkResult<bool> {
        self.verify_vote(subquorum, position, approved, &signature, pubkey)?;
        self.add_prechecked_signature(subquorum, position, approved, signature)
    }

    /// Check a vote signature without recording it.
    pub fn verify_vote(
        &self,
        subquorum: Subquorum,
        position: usize,
        approved: bool,
        signature: &Signature,
        pubkey: &PublicKey,
    ) -> BlinkResult<()> {
        check_position(position)?;
        if !verify_signature(&self.digest(approved), pubkey, signature) {
            return Err(BlinkError::SignatureVerification {
                subquorum,
                position,
            });
        }
        Ok(())
    }

    /// Record an already verified vote. First vote wins.
    pub fn add_prechecked_signature(
        &mut self,
        subquorum: Subquorum,
        position: usize,
        approved: bool,
        signature: Signature,
    ) -> BlinkResult<bool> {
        check_position(position)?;
        Ok(self.signatures[subquorum.index()][position].set(approved, signature))
    }

    /// Mark positions at or beyond `max_size` as rejected; a quorum smaller
    /// than the subquorum size has nobody to vote there.
    ///
    /// Slots that already hold a vote keep it, so every slot stays
    /// write-once. Run it before votes arrive and the two readings agree.
    pub fn limit_signatures(&mut self, subquorum: Subquorum, max_size: usize) -> BlinkResult<()> {
        if max_size > BLINK_SUBQUORUM_SIZE {
            return Err(BlinkError::InvalidSignatureLimit { max_size });
        }
        for slot in &mut self.signatures[subquorum.index()][max_size..] {
            slot.set(false, [0u8; 64]);
        }
        Ok(())
    }

    pub fn signature_status(
        &self,
        subquorum: Subquorum,
        position: usize,
    ) -> BlinkResult<SignatureStatus> {
        check_position(position)?;
        Ok(self.signatures[subquorum.index()][position].status)
    }

    fn count(&self, subquorum: Subquorum, status: SignatureStatus) -> usize {
        self.signatures[subquorum.index()]
            .iter()
            .filter(|slot| slot.status == status)
            .count()
    }

    pub fn approvals(&self, subquorum: Subquorum) -> usize {
        self.count(subquorum, SignatureStatus::Approved)
    }

    pub fn rejections(&self, subquorum: Subquorum) -> usize {
        self.count(subquorum, SignatureStatus::Rejected)
    }

    /// Every subquorum reached `BLINK_MIN_VOTES` approvals.
    pub fn approved(&self) -> bool {
        Subquorum::ALL
            .iter()
            .all(|&q| self.approvals(q) >= BLINK_MIN_VOTES)
    }

    /// Some subquorum can no longer reach `BLINK_MIN_VOTES` approvals.
    pub fn rejected(&self) -> bool {
        Subquorum::ALL
            .iter()
            .any(|&q| self.rejections(q) > BLINK_MAX_REJECTIONS)
    }

    /// Rejection is checked first, so a rejected tx never reports `Approved`.
    pub fn status(&self) -> BlinkStatus {
        if self.rejected() {
            BlinkStatus::Rejected
        } else if self.approved() {
            BlinkStatus::Approved
        } else {
            BlinkStatus::Pending
        }
    }

    /// Approved signatures in subquorum-then-position order.
    pub fn serialize_approved(&self) -> BlinkWirePayload {
        let mut payload = BlinkWirePayload::new(self.tx_hash, self.height);
        for q in Subquorum::ALL {
            for (position, slot) in self.signatures[q.index()].iter().enumerate() {
                if slot.status == SignatureStatus::Approved {
                    payload.push(q, position as u8, slot.signature);
                }
            }
        }
        payload
    }
}
