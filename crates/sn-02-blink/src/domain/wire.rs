//! Blink wire payload
//!
//! Approved signatures as parallel arrays, one entry per approved slot.

use super::{Subquorum, BLINK_SUBQUORUM_SIZE};
use crate::error::{BlinkError, BlinkResult};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use shared_types::{Hash, Signature};

#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlinkWirePayload {
    pub tx_hash: Hash,
    pub height: u64,
    /// Subquorum index of each entry.
    pub quorum: Vec<u8>,
    /// Position within the subquorum of each entry.
    pub position: Vec<u8>,
    #[serde_as(as = "Vec<Bytes>")]
    pub signature: Vec<Signature>,
}

impl BlinkWirePayload {
    pub fn new(tx_hash: Hash, height: u64) -> Self {
        Self {
            tx_hash,
            height,
            quorum: Vec::new(),
            position: Vec::new(),
            signature: Vec::new(),
        }
    }

    pub fn push(&mut self, subquorum: Subquorum, position: u8, signature: Signature) {
        self.quorum.push(subquorum.index() as u8);
        self.position.push(position);
        self.signature.push(signature);
    }

    pub fn len(&self) -> usize {
        self.signature.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signature.is_empty()
    }

    /// Check the parallel arrays line up and every entry is in range.
    pub fn validate(&self) -> BlinkResult<()> {
        if self.quorum.len() != self.signature.len() || self.position.len() != self.signature.len()
        {
            return Err(BlinkError::MalformedPayload {
                reason: format!(
                    "array lengths differ: quorum {}, position {}, signature {}",
                    self.quorum.len(),
                    self.position.len(),
                    self.signature.len()
                ),
            });
        }
        for (&q, &pos) in self.quorum.iter().zip(&self.position) {
            if Subquorum::from_index(q).is_none() {
                return Err(BlinkError::MalformedPayload {
                    reason: format!("invalid subquorum {}", q),
                });
            }
            if pos as usize >= BLINK_SUBQUORUM_SIZE {
                return Err(BlinkError::MalformedPayload {
                    reason: format!("invalid position {}", pos),
                });
            }
        }
        Ok(())
    }

    /// Validated entries as (subquorum, position, signature).
    pub fn entries(&self) -> BlinkResult<Vec<(Subquorum, usize, Signature)>> {
        self.validate()?;
        Ok(self
            .quorum
            .iter()
            .zip(&self.position)
            .zip(&self.signature)
            .filter_map(|((&q, &pos), sig)| {
                Subquorum::from_index(q).map(|q| (q, pos as usize, *sig))
            })
            .collect())
    }

    pub fn to_bytes(&self) -> BlinkResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| BlinkError::MalformedPayload {
            reason: e.to_string(),
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> BlinkResult<Self> {
        bincode::deserialize(bytes).map_err(|e| BlinkError::MalformedPayload {
            reason: e.to_string(),
        })
    }
}
