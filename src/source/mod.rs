//! Read access to the DHCP server's state.
//!
//! This module holds the collaborator interfaces the reconciler reads from:
//! - [`SubnetSource`] - Configured subnets and pool membership
//! - [`CapacitySource`] - Pre-maintained `total-addresses` statistic
//! - [`ReservationSource`] - Host reservations per subnet
//! - [`LeaseSource`] - Active leases per subnet
//!
//! [`Snapshot`] implements all of them over a JSON export of the server.

mod snapshot;
mod stats;

use crate::error::Result;
use crate::models::{Lease, Reservation, Subnet, SubnetId};

pub use snapshot::{check_for_duplicate_subnets, read_snapshot, Snapshot};
pub use stats::{generate_name, parse_subnet_name, StatsStore, TOTAL_ADDRESSES};

pub trait SubnetSource {
    /// All configured subnets, ordered by subnet id.
    fn subnets(&self) -> Result<Vec<Subnet>>;
}

pub trait CapacitySource {
    /// Fails with [`crate::Error::MissingCapacity`] when no value was recorded.
    fn total_addresses(&self, subnet_id: SubnetId) -> Result<u64>;
}

pub trait ReservationSource {
    fn reservations(&self, subnet_id: SubnetId) -> Result<Vec<Reservation>>;
}

pub trait LeaseSource {
    /// Leases currently holding an address in the subnet.
    fn leases(&self, subnet_id: SubnetId) -> Result<Vec<Lease>>;
}

/// Everything the free-addresses driver reads.
pub trait ServerState: SubnetSource + CapacitySource + ReservationSource + LeaseSource {}

impl<T> ServerState for T where
    T: SubnetSource + CapacitySource + ReservationSource + LeaseSource
{
}
