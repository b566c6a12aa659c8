//! DHCPv4 subnet data model.

use super::{Ipv4, Pool};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;

/// Stable subnet identifier, the join key for statistics, hosts and leases.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct SubnetId(pub u32);

impl fmt::Display for SubnetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SubnetId {
    fn from(id: u32) -> Self {
        SubnetId(id)
    }
}

/// A configured subnet with its dynamic address pools.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Subnet {
    pub id: SubnetId,
    /// Prefix of the subnet, e.g. `192.0.2.0/24`.
    pub subnet: Ipv4,
    #[serde(default)]
    pub pools: Vec<Pool>,
}

impl Subnet {
    pub fn new(id: u32, subnet: Ipv4, pools: Vec<Pool>) -> Subnet {
        Subnet {
            id: SubnetId(id),
            subnet,
            pools,
        }
    }

    /// True when the address lies within one of the subnet's pools.
    ///
    /// IPv6 addresses never belong to an IPv4 pool.
    pub fn in_pool(&self, addr: &IpAddr) -> bool {
        match addr {
            IpAddr::V4(v4) => self.pools.iter().any(|pool| pool.contains(*v4)),
            IpAddr::V6(_) => false,
        }
    }

    /// Check that every pool lies inside the subnet prefix and that no two
    /// pools overlap. Overlapping pools would be counted twice by
    /// [`Subnet::pool_capacity`].
    pub fn validate_pools(&self) -> Result<()> {
        for pool in &self.pools {
            if !self.subnet.contains(pool.lo) || !self.subnet.contains(pool.hi) {
                return Err(Error::InvalidPool(format!(
                    "{pool} is outside subnet[{}] {}",
                    self.id, self.subnet
                )));
            }
        }

        let mut sorted: Vec<&Pool> = self.pools.iter().collect();
        sorted.sort_by_key(|pool| pool.lo);
        for pair in sorted.windows(2) {
            if pair[0].hi >= pair[1].lo {
                return Err(Error::InvalidPool(format!(
                    "{} overlaps {} in subnet[{}]",
                    pair[1], pair[0], self.id
                )));
            }
        }
        Ok(())
    }

    /// Sum of pool sizes, the value the server records as `total-addresses`.
    pub fn pool_capacity(&self) -> u64 {
        self.pools.iter().map(Pool::size).sum()
    }
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "subnet[{}] {} ({} pools)",
            self.id,
            self.subnet,
            self.pools.len()
        )
    }
}
