//! # Connection Context
//!
//! Per-connection peer state as an immutable value. Updates produce a new
//! value; "resetting" a context means building a fresh one for the same peer.

use crate::address::NetworkAddress;
use serde::{Deserialize, Serialize};

/// Snapshot of what we know about a connected peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionContext {
    address: NetworkAddress,
    inbound: bool,
    peer_id: Option<u64>,
    remote_height: u64,
    support_flags: u32,
}

impl ConnectionContext {
    /// Fresh context for an outbound connection to `address`.
    pub fn new(address: NetworkAddress) -> Self {
        Self {
            address,
            inbound: false,
            peer_id: None,
            remote_height: 0,
            support_flags: 0,
        }
    }

    pub fn with_inbound(self, inbound: bool) -> Self {
        Self { inbound, ..self }
    }

    pub fn with_peer_id(self, peer_id: u64) -> Self {
        Self {
            peer_id: Some(peer_id),
            ..self
        }
    }

    pub fn with_remote_height(self, remote_height: u64) -> Self {
        Self {
            remote_height,
            ..self
        }
    }

    pub fn with_support_flags(self, support_flags: u32) -> Self {
        Self {
            support_flags,
            ..self
        }
    }

    /// Context for the same endpoint with all handshake-derived state cleared.
    pub fn reset(&self) -> Self {
        Self::new(self.address.clone()).with_inbound(self.inbound)
    }

    pub fn address(&self) -> &NetworkAddress {
        &self.address
    }

    pub fn is_inbound(&self) -> bool {
        self.inbound
    }

    pub fn peer_id(&self) -> Option<u64> {
        self.peer_id
    }

    pub fn remote_height(&self) -> u64 {
        self.remote_height
    }

    pub fn support_flags(&self) -> u32 {
        self.support_flags
    }
}
