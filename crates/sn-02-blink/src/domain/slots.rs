//! Signature slots
//!
//! One slot per (subquorum, position). A slot is written once: the first
//! vote that lands in it wins.

use serde::{Deserialize, Serialize};
use shared_types::Signature;
use std::fmt;

/// One of the two independent validator groups voting on a blink tx.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Subquorum {
    /// Quorum at the lagged height.
    Base = 0,
    /// The next quorum after `Base`.
    Future = 1,
}

impl Subquorum {
    pub const ALL: [Subquorum; 2] = [Subquorum::Base, Subquorum::Future];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Subquorum::Base),
            1 => Some(Subquorum::Future),
            _ => None,
        }
    }
}

impl fmt::Display for Subquorum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subquorum::Base => f.write_str("base"),
            Subquorum::Future => f.write_str("future"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureStatus {
    #[default]
    None,
    Approved,
    Rejected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignatureSlot {
    pub status: SignatureStatus,
    pub signature: Signature,
}

impl SignatureSlot {
    pub const EMPTY: SignatureSlot = SignatureSlot {
        status: SignatureStatus::None,
        signature: [0u8; 64],
    };

    pub fn is_empty(&self) -> bool {
        self.status == SignatureStatus::None
    }

    /// Record a vote if the slot is still empty. Returns whether it was.
    pub fn set(&mut self, approved: bool, signature: Signature) -> bool {
        if !self.is_empty() {
            return false;
        }
        self.status = if approved {
            SignatureStatus::Approved
        } else {
            SignatureStatus::Rejected
        };
        self.signature = signature;
        true
    }
}

impl Default for SignatureSlot {
    fn default() -> Self {
        Self::EMPTY
    }
}
