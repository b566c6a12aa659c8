//! Statistic observations keyed by server statistic names.
//!
//! Subnet-scoped statistics are named `subnet[<id>].<statistic>`, e.g.
//! `subnet[1].total-addresses`.

use crate::error::{Error, Result};
use crate::models::SubnetId;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Name of the pre-maintained per-subnet capacity statistic.
pub const TOTAL_ADDRESSES: &str = "total-addresses";

static SUBNET_STAT_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_subnet_stat_regex() -> &'static Regex {
    SUBNET_STAT_REGEX
        .get_or_init(|| Regex::new(r"^subnet\[(\d+)\]\.(.+)$").expect("Invalid Regex"))
}

/// Build a scoped statistic name, `subnet[1].total-addresses`.
pub fn generate_name(context: &str, id: SubnetId, statistic: &str) -> String {
    format!("{context}[{id}].{statistic}")
}

/// Split a subnet-scoped statistic name into subnet id and statistic.
pub fn parse_subnet_name(name: &str) -> Option<(SubnetId, &str)> {
    let caps = get_subnet_stat_regex().captures(name)?;
    let id = caps.get(1)?.as_str().parse::<u32>().ok()?;
    Some((SubnetId(id), caps.get(2)?.as_str()))
}

/// Integer observations as exported by the statistics manager.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct StatsStore {
    observations: BTreeMap<String, i64>,
}

impl StatsStore {
    pub fn new() -> StatsStore {
        StatsStore::default()
    }

    pub fn set_value(&mut self, name: impl Into<String>, value: i64) {
        self.observations.insert(name.into(), value);
    }

    pub fn get_integer(&self, name: &str) -> Option<i64> {
        self.observations.get(name).copied()
    }

    /// Capacity of a subnet's pools from its `total-addresses` statistic.
    ///
    /// A missing observation is reported, never defaulted.
    pub fn total_addresses(&self, subnet_id: SubnetId) -> Result<u64> {
        let name = generate_name("subnet", subnet_id, TOTAL_ADDRESSES);
        let value = self
            .get_integer(&name)
            .ok_or(Error::MissingCapacity { subnet_id })?;
        u64::try_from(value).map_err(|_| Error::InvalidStatistic {
            name,
            reason: format!("negative value {value}"),
        })
    }

    pub fn set_total_addresses(&mut self, subnet_id: SubnetId, total: u64) -> Result<()> {
        let name = generate_name("subnet", subnet_id, TOTAL_ADDRESSES);
        let value = i64::try_from(total).map_err(|_| Error::InvalidStatistic {
            name: name.clone(),
            reason: format!("value {total} out of range"),
        })?;
        self.set_value(name, value);
        Ok(())
    }

    /// Subnet ids that have at least one subnet-scoped statistic.
    pub fn subnet_ids(&self) -> Vec<SubnetId> {
        let mut ids: Vec<SubnetId> = self
            .observations
            .keys()
            .filter_map(|name| parse_subnet_name(name).map(|(id, _)| id))
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_name() {
        assert_eq!(
            generate_name("subnet", SubnetId(12), TOTAL_ADDRESSES),
            "subnet[12].total-addresses"
        );
    }

    #[test]
    fn test_parse_subnet_name() {
        assert_eq!(
            parse_subnet_name("subnet[3].assigned-addresses"),
            Some((SubnetId(3), "assigned-addresses"))
        );
        assert_eq!(parse_subnet_name("pkt4-received"), None);
        assert_eq!(parse_subnet_name("subnet[x].total-addresses"), None);
        assert_eq!(parse_subnet_name("subnet[99999999999].total-addresses"), None);
    }

    #[test]
    fn test_total_addresses() {
        let mut stats = StatsStore::new();
        stats.set_total_addresses(SubnetId(1), 200).unwrap();
        assert_eq!(stats.total_addresses(SubnetId(1)).unwrap(), 200);
        assert!(matches!(
            stats.total_addresses(SubnetId(2)),
            Err(Error::MissingCapacity { subnet_id }) if subnet_id == SubnetId(2)
        ));

        stats.set_value("subnet[3].total-addresses", -4);
        assert!(matches!(
            stats.total_addresses(SubnetId(3)),
            Err(Error::InvalidStatistic { .. })
        ));
    }

    #[test]
    fn test_subnet_ids() {
        let stats: StatsStore = serde_json::from_str(
            r#"{"pkt4-received": 10, "subnet[1].total-addresses": 5, "subnet[1].assigned-addresses": 2, "subnet[4].total-addresses": 9}"#,
        )
        .unwrap();
        assert_eq!(stats.len(), 4);
        assert_eq!(stats.subnet_ids(), vec![SubnetId(1), SubnetId(4)]);
    }
}
