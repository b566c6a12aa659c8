//! In-memory server state loaded from a JSON export.

use super::{CapacitySource, LeaseSource, ReservationSource, StatsStore, SubnetSource};
use crate::error::{Error, Result};
use crate::models::{Lease, Reservation, Subnet, SubnetId};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// On-disk layout of a server state export.
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
struct SnapshotFile {
    /// Name of the daemon the export was taken from.
    process: String,
    subnets: Vec<Subnet>,
    #[serde(default)]
    statistics: StatsStore,
    #[serde(default)]
    reservations: Vec<Reservation>,
    #[serde(default)]
    leases: Vec<Lease>,
}

/// Point-in-time copy of subnets, statistics, hosts and leases.
#[derive(Debug, Default)]
pub struct Snapshot {
    process: String,
    subnets: Vec<Subnet>,
    statistics: StatsStore,
    reservations: HashMap<SubnetId, Vec<Reservation>>,
    leases: HashMap<SubnetId, Vec<Lease>>,
}

/// Return error if two subnets share an id.
pub fn check_for_duplicate_subnets(subnets: &[Subnet]) -> Result<()> {
    let mut seen = HashSet::new();

    for subnet in subnets.iter() {
        if !seen.insert(subnet.id) {
            return Err(Error::DuplicateSubnet(subnet.id));
        }
    }
    Ok(())
}

impl Snapshot {
    pub fn new(
        process: impl Into<String>,
        mut subnets: Vec<Subnet>,
        statistics: StatsStore,
        reservations: Vec<Reservation>,
        leases: Vec<Lease>,
    ) -> Result<Snapshot> {
        check_for_duplicate_subnets(&subnets)?;
        for subnet in &subnets {
            subnet.validate_pools()?;
        }
        // Enumerate in subnet id order
        subnets.sort_by_key(|s| s.id);

        let known: HashSet<SubnetId> = subnets.iter().map(|s| s.id).collect();
        for id in statistics.subnet_ids() {
            if !known.contains(&id) {
                log::warn!("statistics recorded for unknown subnet {id}");
            }
        }

        Ok(Snapshot {
            process: process.into(),
            subnets,
            statistics,
            reservations: reservations.into_iter().into_group_map_by(|r| r.subnet_id),
            leases: leases.into_iter().into_group_map_by(|l| l.subnet_id),
        })
    }

    /// Parse an export, reporting the JSON path of the first bad field.
    pub fn from_json(json: &str) -> Result<Snapshot> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        let file: SnapshotFile =
            serde_path_to_error::deserialize(&mut deserializer).map_err(|e| Error::Snapshot {
                path: e.path().to_string(),
                message: e.inner().to_string(),
            })?;

        log::info!(
            "snapshot from {} has {} subnets, {} statistics, {} hosts, {} leases",
            file.process,
            file.subnets.len(),
            file.statistics.len(),
            file.reservations.len(),
            file.leases.len()
        );

        Snapshot::new(
            file.process,
            file.subnets,
            file.statistics,
            file.reservations,
            file.leases,
        )
    }

    /// Name of the daemon the state was exported from.
    pub fn process(&self) -> &str {
        &self.process
    }

    /// Record `total-addresses` from pool sizes for subnets that lack it.
    ///
    /// Returns the number of subnets updated.
    pub fn derive_missing_capacity(&mut self) -> Result<usize> {
        let mut derived = 0;
        for subnet in &self.subnets {
            if let Err(Error::MissingCapacity { .. }) = self.statistics.total_addresses(subnet.id)
            {
                let total = subnet.pool_capacity();
                log::info!("deriving total-addresses={total} for {subnet}");
                self.statistics.set_total_addresses(subnet.id, total)?;
                derived += 1;
            }
        }
        Ok(derived)
    }
}

/// Read a server state export from disk.
pub fn read_snapshot(path: impl AsRef<Path>) -> Result<Snapshot> {
    let path = path.as_ref();
    log::info!("Reading snapshot file: {}", path.display());
    let json = std::fs::read_to_string(path)?;
    Snapshot::from_json(&json)
}

impl SubnetSource for Snapshot {
    fn subnets(&self) -> Result<Vec<Subnet>> {
        Ok(self.subnets.clone())
    }
}

impl CapacitySource for Snapshot {
    fn total_addresses(&self, subnet_id: SubnetId) -> Result<u64> {
        self.statistics.total_addresses(subnet_id)
    }
}

impl ReservationSource for Snapshot {
    fn reservations(&self, subnet_id: SubnetId) -> Result<Vec<Reservation>> {
        Ok(self.reservations.get(&subnet_id).cloned().unwrap_or_default())
    }
}

impl LeaseSource for Snapshot {
    fn leases(&self, subnet_id: SubnetId) -> Result<Vec<Lease>> {
        Ok(self
            .leases
            .get(&subnet_id)
            .map(|leases| leases.iter().filter(|l| l.is_active()).cloned().collect())
            .unwrap_or_default())
    }
}
