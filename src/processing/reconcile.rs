//! Free-address reconciliation for a single subnet.
//!
//! Addresses in use are the union of in-pool reservations and active leases.
//! A reservation and a lease on the same address count once.

use crate::error::{Error, Result};
use crate::models::{Lease, Reservation, Subnet, SubnetId, UtilizationResult};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};

fn ipv4_of(subnet_id: SubnetId, kind: &'static str, address: IpAddr) -> Result<Ipv4Addr> {
    match address {
        IpAddr::V4(v4) => Ok(v4),
        IpAddr::V6(_) => Err(Error::MalformedInput {
            subnet_id,
            kind,
            address,
        }),
    }
}

/// Compute the free-address count of one subnet.
///
/// # Arguments
/// * `subnet` - The subnet and its pools
/// * `capacity` - Total addresses across the subnet's pools
/// * `reservations` - Host reservations of the subnet, in or out of pool
/// * `leases` - Active leases of the subnet
///
/// # Returns
/// * `Ok(UtilizationResult)` - `capacity - |in-pool reservations ∪ leases|`, possibly negative
/// * `Err(Error::MalformedInput)` - A reservation or lease is not an IPv4 address
pub fn reconcile(
    subnet: &Subnet,
    capacity: u64,
    reservations: &[Reservation],
    leases: &[Lease],
) -> Result<UtilizationResult> {
    // Unmatched in-pool reservations per address
    let mut reserved: HashMap<Ipv4Addr, u64> = HashMap::with_capacity(reservations.len());
    let mut in_pool: u64 = 0;
    for reservation in reservations {
        let Some(address) = reservation.ip_address else {
            continue;
        };
        let v4 = ipv4_of(subnet.id, "reservation", address)?;
        if subnet.in_pool(&address) {
            *reserved.entry(v4).or_default() += 1;
            in_pool += 1;
        } else {
            log::trace!("subnet {}: reservation {v4} outside pools", subnet.id);
        }
    }

    let mut used = in_pool + leases.len() as u64;
    for lease in leases {
        let v4 = ipv4_of(subnet.id, "lease", lease.ip_address)?;
        if let Some(remaining) = reserved.get_mut(&v4) {
            if *remaining > 0 {
                *remaining -= 1;
                used -= 1;
            }
        }
    }

    let total = i64::try_from(capacity).map_err(|_| Error::CapacityOverflow {
        subnet_id: subnet.id,
        capacity,
    })?;
    let free = i64::try_from(used)
        .ok()
        .and_then(|used| total.checked_sub(used))
        .ok_or(Error::CapacityOverflow {
            subnet_id: subnet.id,
            capacity,
        })?;

    log::debug!(
        "subnet {}: capacity={capacity} reserved_in_pool={in_pool} leases={} used={used} \
         free={free}",
        subnet.id,
        leases.len()
    );

    Ok(UtilizationResult {
        subnet_id: subnet.id,
        free,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ipv4;
    use proptest::prelude::*;
    use std::collections::HashSet;
    use std::net::Ipv6Addr;

    const A: [u8; 4] = [10, 0, 0, 10];
    const B: [u8; 4] = [10, 0, 0, 11];
    const C: [u8; 4] = [10, 0, 0, 12];
    const D: [u8; 4] = [10, 0, 0, 13];
    const E: [u8; 4] = [10, 0, 0, 14];

    fn addr(octets: [u8; 4]) -> IpAddr {
        IpAddr::from(octets)
    }

    /// Subnet 10.0.0.0/24 with a single pool 10.0.0.10 - 10.0.0.99.
    fn subnet(id: u32) -> Subnet {
        Subnet::new(
            id,
            Ipv4::new("10.0.0.0/24").unwrap(),
            vec!["10.0.0.10 - 10.0.0.99".parse().unwrap()],
        )
    }

    fn hosts(id: u32, addrs: &[[u8; 4]]) -> Vec<Reservation> {
        addrs.iter().map(|a| Reservation::new(id, addr(*a))).collect()
    }

    fn leases(id: u32, addrs: &[[u8; 4]]) -> Vec<Lease> {
        addrs.iter().map(|a| Lease::new(id, addr(*a))).collect()
    }

    #[test]
    fn test_empty_subnet() {
        let result = reconcile(&subnet(1), 100, &[], &[]).unwrap();
        assert_eq!(result.subnet_id, SubnetId(1));
        assert_eq!(result.free, 100);
        assert!(result.is_consistent());
    }

    #[test]
    fn test_reservation_and_lease_on_same_address() {
        let result = reconcile(&subnet(1), 10, &hosts(1, &[A]), &leases(1, &[A])).unwrap();
        assert_eq!(result.free, 9);
    }

    #[test]
    fn test_disjoint() {
        let result = reconcile(&subnet(1), 50, &hosts(1, &[A, B]), &leases(1, &[C, D, E])).unwrap();
        assert_eq!(result.free, 45);
    }

    #[test]
    fn test_over_subscription_not_clamped() {
        let result = reconcile(&subnet(1), 2, &hosts(1, &[A]), &leases(1, &[B, C])).unwrap();
        assert_eq!(result.free, -1);
        assert!(!result.is_consistent());
    }

    #[test]
    fn test_zero_capacity() {
        let no_pools = Subnet::new(1, Ipv4::new("10.0.0.0/24").unwrap(), vec![]);
        let result = reconcile(&no_pools, 0, &hosts(1, &[A]), &leases(1, &[B])).unwrap();
        // the reservation is outside every pool, the lease is counted regardless
        assert_eq!(result.free, -1);
    }

    #[test]
    fn test_out_of_pool_reservation_ignored() {
        let outside = [10, 0, 0, 200];
        let with = reconcile(&subnet(1), 20, &hosts(1, &[A, outside]), &leases(1, &[B])).unwrap();
        let without = reconcile(&subnet(1), 20, &hosts(1, &[A]), &leases(1, &[B])).unwrap();
        assert_eq!(with, without);
        assert_eq!(with.free, 18);
    }

    #[test]
    fn test_reservation_without_address_ignored() {
        let mut named = Reservation::new(1, addr(A));
        named.ip_address = None;
        let result = reconcile(&subnet(1), 5, &[named], &[]).unwrap();
        assert_eq!(result.free, 5);
    }

    #[test]
    fn test_reservation_matched_at_most_once() {
        // The same address leased twice must not consume one reservation twice.
        let result = reconcile(&subnet(1), 10, &hosts(1, &[A]), &leases(1, &[A, A])).unwrap();
        assert_eq!(result.free, 8);

        // Two reservations on one address (non-unique reservations) count
        // twice; a single lease cancels only one of them.
        let result = reconcile(&subnet(1), 10, &hosts(1, &[A, A]), &leases(1, &[A])).unwrap();
        assert_eq!(result.free, 8);
    }

    #[test]
    fn test_idempotent() {
        let s = subnet(1);
        let r = hosts(1, &[A, B, [10, 0, 0, 250]]);
        let l = leases(1, &[B, C]);
        let first = reconcile(&s, 90, &r, &l).unwrap();
        let second = reconcile(&s, 90, &r, &l).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.free, 87);
    }

    #[test]
    fn test_ipv6_reservation_rejected() {
        let r = vec![Reservation::new(1, IpAddr::V6(Ipv6Addr::LOCALHOST))];
        let result = reconcile(&subnet(1), 10, &r, &[]);
        assert!(matches!(
            result,
            Err(Error::MalformedInput {
                kind: "reservation",
                ..
            })
        ));
    }

    #[test]
    fn test_ipv6_lease_rejected() {
        let l = vec![Lease::new(1, IpAddr::V6(Ipv6Addr::LOCALHOST))];
        let result = reconcile(&subnet(1), 10, &hosts(1, &[A]), &l);
        assert!(matches!(
            result,
            Err(Error::MalformedInput { kind: "lease", .. })
        ));
    }

    #[test]
    fn test_capacity_overflow() {
        let result = reconcile(&subnet(1), u64::MAX, &[], &[]);
        assert!(matches!(result, Err(Error::CapacityOverflow { .. })));
    }

    proptest! {
        #[test]
        fn prop_used_is_union_cardinality(
            reserved in proptest::collection::hash_set(10u8..100, 0..60),
            leased in proptest::collection::hash_set(10u8..100, 0..60),
        ) {
            let r: Vec<Reservation> = reserved
                .iter()
                .map(|o| Reservation::new(1, addr([10, 0, 0, *o])))
                .collect();
            let l: Vec<Lease> = leased
                .iter()
                .map(|o| Lease::new(1, addr([10, 0, 0, *o])))
                .collect();
            let union: HashSet<u8> = reserved.union(&leased).copied().collect();

            let result = reconcile(&subnet(1), 90, &r, &l).unwrap();
            prop_assert_eq!(result.free, 90 - union.len() as i64);
        }

        #[test]
        fn prop_out_of_pool_reservations_never_count(
            inside in proptest::collection::hash_set(10u8..100, 0..30),
            outside in proptest::collection::hash_set(100u8..=255, 0..30),
            leased in proptest::collection::hash_set(10u8..100, 0..30),
        ) {
            let l: Vec<Lease> = leased
                .iter()
                .map(|o| Lease::new(1, addr([10, 0, 0, *o])))
                .collect();
            let only_inside: Vec<Reservation> = inside
                .iter()
                .map(|o| Reservation::new(1, addr([10, 0, 0, *o])))
                .collect();
            let mut mixed = only_inside.clone();
            mixed.extend(outside.iter().map(|o| Reservation::new(1, addr([10, 0, 0, *o]))));

            prop_assert_eq!(
                reconcile(&subnet(1), 90, &mixed, &l).unwrap(),
                reconcile(&subnet(1), 90, &only_inside, &l).unwrap()
            );
        }
    }
}
