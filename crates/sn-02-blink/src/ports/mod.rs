//! Ports (hexagonal architecture)

pub mod inbound;
pub mod outbound;

pub use inbound::{BlinkVotingApi, VoteOutcome};
pub use outbound::{Quorum, QuorumProvider, QuorumType};
