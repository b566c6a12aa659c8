//! Domain models for free-address computation.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Ipv4`] - IPv4 prefix with CIDR notation support
//! - [`Pool`] - Range of dynamically assignable addresses
//! - [`Subnet`] - Configured subnet and its pools
//! - [`Reservation`] and [`Lease`] - Addresses held by clients
//! - [`UtilizationResult`] - Free-address count for one subnet

mod host;
mod ipv4;
mod lease;
mod pool;
mod subnet;
mod utilization;

// Re-export public types
pub use host::Reservation;
pub use ipv4::{broadcast_addr, cut_addr, get_cidr_mask, Ipv4, MAX_LENGTH};
pub use lease::{Lease, LeaseState};
pub use pool::Pool;
pub use subnet::{Subnet, SubnetId};
pub use utilization::UtilizationResult;
