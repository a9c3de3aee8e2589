//! # sn-02-blink
//!
//! Blink fast finality: a transaction is approved or rejected by signed votes
//! from two independent service-node subquorums before it is mined.
//!
//! ## Thresholds
//!
//! ```text
//!   Base   [A A A A A A A . . .]  7/10 approvals  ─┐
//!   Future [A A A A A A A R . .]  7/10 approvals  ─┴─→ Approved
//!
//!   any subquorum with 4 rejections ──────────────────→ Rejected
//! ```
//!
//! Subquorum votes are signed over
//! `keccak256(height LE || tx_hash || approved)` with the validator's
//! Ed25519 key; the keys come from the blink quorums at
//! [`quorum_height`](domain::quorum_height).
//!
//! ## Example
//!
//! ```rust,ignore
//! use sn_02_blink::{BlinkTx, BlinkVotingApi, BlinkVotingEngine, Subquorum};
//!
//! let engine = BlinkVotingEngine::new(quorum_provider);
//! let mut tx = BlinkTx::new(tx_hash, height);
//! engine.prepare(&mut tx)?;
//!
//! let outcome = engine.receive_vote(&mut tx, Subquorum::Base, 3, true, signature)?;
//! if outcome.status_changed { /* relay tx.serialize_approved() */ }
//! ```

pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

pub use domain::{
    canonical_digest, quorum_height, BlinkStatus, BlinkTx, BlinkWirePayload, SignatureSlot,
    SignatureStatus, Subquorum, BLINK_MIN_VOTES, BLINK_QUORUM_INTERVAL, BLINK_QUORUM_LAG,
    BLINK_SUBQUORUM_SIZE,
};
pub use error::{BlinkError, BlinkResult};
pub use ports::{BlinkVotingApi, QuorumProvider, VoteOutcome};
pub use service::BlinkVotingEngine;
