//! # Integration Flows
//!
//! Each flow drives a subsystem the way the blockchain does: blocks are
//! added and detached in order, votes arrive one by one or relayed in bulk.

pub mod blink_flows;
pub mod checkpoint_flows;
pub mod telemetry_flow;
