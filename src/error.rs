//! Error types for free-address computation.

use crate::models::SubnetId;
use std::net::IpAddr;

/// Errors raised while loading server state or computing free addresses.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No `total-addresses` statistic has been recorded for the subnet.
    #[error("no total-addresses statistic recorded for subnet {subnet_id}")]
    MissingCapacity { subnet_id: SubnetId },

    /// A reservation or lease address is not in the subnet's address family.
    #[error("subnet {subnet_id}: {kind} address {address} is not an IPv4 address")]
    MalformedInput {
        subnet_id: SubnetId,
        kind: &'static str,
        address: IpAddr,
    },

    #[error("Bad process name: {actual}, expected {expected}")]
    WrongProcess { actual: String, expected: String },

    #[error("'{0}' command not supported.")]
    UnknownCommand(String),

    #[error("invalid statistic {name}: {reason}")]
    InvalidStatistic { name: String, reason: String },

    #[error("Duplicate subnet id found: {0}")]
    DuplicateSubnet(SubnetId),

    #[error("invalid pool '{0}'")]
    InvalidPool(String),

    #[error("invalid prefix '{0}'")]
    InvalidPrefix(String),

    /// Capacity does not fit the signed range used for free counts.
    #[error("capacity {capacity} of subnet {subnet_id} is out of range")]
    CapacityOverflow { subnet_id: SubnetId, capacity: u64 },

    #[error("invalid configuration {key}={value}")]
    InvalidConfig { key: String, value: String },

    #[error("error parsing snapshot: path={path} error={message}")]
    Snapshot { path: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
