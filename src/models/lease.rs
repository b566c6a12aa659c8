//! DHCPv4 lease data model.

use super::SubnetId;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Lease state as reported by the lease database.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LeaseState {
    #[default]
    Default,
    /// The client declined the address; it stays unavailable until reclaimed.
    Declined,
    ExpiredReclaimed,
}

/// An address assigned to a client.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Lease {
    pub subnet_id: SubnetId,
    pub ip_address: IpAddr,
    #[serde(default)]
    pub hw_address: Option<String>,
    /// Valid lifetime in seconds.
    #[serde(default)]
    pub valid_lft: u32,
    /// Client last transmission time (unix seconds).
    #[serde(default)]
    pub cltt: i64,
    #[serde(default)]
    pub state: LeaseState,
}

impl Lease {
    pub fn new(subnet_id: u32, ip_address: IpAddr) -> Lease {
        Lease {
            subnet_id: SubnetId(subnet_id),
            ip_address,
            hw_address: None,
            valid_lft: 0,
            cltt: 0,
            state: LeaseState::Default,
        }
    }

    /// Active leases hold their address; reclaimed ones have released it.
    pub fn is_active(&self) -> bool {
        self.state != LeaseState::ExpiredReclaimed
    }
}
