//! Per-subnet utilization result.

use super::SubnetId;
use serde::Serialize;

/// Free-address count for one subnet at query time.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct UtilizationResult {
    pub subnet_id: SubnetId,
    /// Capacity minus addresses held by in-pool reservations or leases.
    ///
    /// Negative when more addresses are in use than the pools hold.
    pub free: i64,
}

impl UtilizationResult {
    /// A negative count means capacity, pools and leases disagree upstream.
    pub fn is_consistent(&self) -> bool {
        self.free >= 0
    }
}
