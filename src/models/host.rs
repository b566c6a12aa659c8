//! Host reservation data model.

use super::SubnetId;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// A static binding of an address to a client.
///
/// Hosts may be reserved by hostname or options only, in which case they
/// carry no address and never count against a pool.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Reservation {
    pub subnet_id: SubnetId,
    #[serde(default)]
    pub ip_address: Option<IpAddr>,
    #[serde(default)]
    pub hw_address: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
}

impl Reservation {
    pub fn new(subnet_id: u32, ip_address: IpAddr) -> Reservation {
        Reservation {
            subnet_id: SubnetId(subnet_id),
            ip_address: Some(ip_address),
            hw_address: None,
            hostname: None,
        }
    }
}
