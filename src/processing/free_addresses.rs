//! Per-subnet iteration over the server state.

use super::reconcile;
use crate::config::ENV_ON_MISSING_CAPACITY;
use crate::error::{Error, Result};
use crate::models::{SubnetId, UtilizationResult};
use crate::source::ServerState;
use std::str::FromStr;

/// What to do with a subnet that has no `total-addresses` statistic.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum MissingCapacityPolicy {
    /// Fail the whole command.
    #[default]
    Abort,
    /// Leave the subnet out of the rows and list it in the report.
    Skip,
}

impl FromStr for MissingCapacityPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(MissingCapacityPolicy::Abort),
            "skip" => Ok(MissingCapacityPolicy::Skip),
            _ => Err(Error::InvalidConfig {
                key: ENV_ON_MISSING_CAPACITY.to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Free-address counts for every subnet, in subnet id order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub rows: Vec<UtilizationResult>,
    /// Subnets left out because no capacity was recorded.
    pub skipped: Vec<SubnetId>,
}

impl Report {
    /// Rows with a negative free count.
    pub fn inconsistent(&self) -> impl Iterator<Item = &UtilizationResult> {
        self.rows.iter().filter(|r| !r.is_consistent())
    }
}

/// Refuse to run inside any daemon other than `expected`.
pub fn ensure_process(actual: &str, expected: &str) -> Result<()> {
    if actual != expected {
        return Err(Error::WrongProcess {
            actual: actual.to_string(),
            expected: expected.to_string(),
        });
    }
    Ok(())
}

/// Compute free addresses for every configured subnet.
///
/// # Arguments
/// * `state` - Subnets, statistics, hosts and leases to read from
/// * `policy` - Handling of subnets without a recorded capacity
///
/// # Returns
/// * `Ok(Report)` - One row per subnet, plus skipped subnets
/// * `Err` - First failure from a lookup or the reconciliation
pub fn free_addresses<S>(state: &S, policy: MissingCapacityPolicy) -> Result<Report>
where
    S: ServerState + ?Sized,
{
    let subnets = state.subnets()?;
    log::info!("#Start free_addresses() over {} subnets", subnets.len());

    let mut report = Report::default();
    for subnet in &subnets {
        let capacity = match state.total_addresses(subnet.id) {
            Ok(capacity) => capacity,
            Err(Error::MissingCapacity { subnet_id }) if policy == MissingCapacityPolicy::Skip => {
                log::warn!("skipping subnet {subnet_id}: no total-addresses recorded");
                report.skipped.push(subnet_id);
                continue;
            }
            Err(e) => return Err(e),
        };

        let reservations = state.reservations(subnet.id)?;
        let leases = state.leases(subnet.id)?;
        let row = reconcile(subnet, capacity, &reservations, &leases)?;

        if !row.is_consistent() {
            log::warn!(
                "subnet {} reports {} free addresses: more in use than capacity {capacity}",
                row.subnet_id,
                row.free
            );
        }
        report.rows.push(row);
    }

    log::info!(
        "free_addresses() done: {} rows, {} skipped",
        report.rows.len(),
        report.skipped.len()
    );
    Ok(report)
}
