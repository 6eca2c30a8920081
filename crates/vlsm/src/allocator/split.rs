//! Halving networks and fitting a single request

use crate::address::{bits_of, Address, ADDRESS_BITS};
use crate::network::{Network, RESERVED_ADDRESSES};
use crate::{Error, Result};
use tracing::{debug, trace};

/// Smallest network that can still be split: its halves would have no hosts
const MIN_SPLITTABLE_SIZE: u64 = 4;

/// Usable host capacity of a network
pub fn usable_capacity(net: &Network) -> u64 {
    net.usable_hosts()
}

/// Split a network into its two equal halves
///
/// The first half keeps the parent address; the second starts one child
/// size further on. Both halves come back unallocated.
pub fn split_in_half(net: &Network) -> Result<(Network, Network)> {
    if net.size() <= MIN_SPLITTABLE_SIZE {
        return Err(Error::DegenerateSplit {
            network: net.to_string(),
        });
    }

    let prefix_len = net.prefix_len() + 1;
    let mask = Address::mask(prefix_len).with_format(net.mask().format());
    let child_size = 1u64 << (ADDRESS_BITS as u8 - prefix_len);

    let first = Network::new(net.address(), mask);
    let second = Network::new(net.address().add(&bits_of(child_size)), mask);

    trace!(parent = %net, first = %first, second = %second, "Split network");
    Ok((first, second))
}

/// Smallest power-of-two network size that holds `host_count` hosts
///
/// Fails when the request needs more addresses than `root` has at all.
pub fn best_fit_size_for(root: &Network, host_count: u32) -> Result<u64> {
    let required = u64::from(host_count) + RESERVED_ADDRESSES;

    if required > root.size() {
        return Err(Error::UnsatisfiableSingleRequest {
            hosts: u64::from(host_count),
            max_hosts: (root.size() / 2).saturating_sub(RESERVED_ADDRESSES),
        });
    }

    Ok(required.next_power_of_two())
}

/// Carve one subnet of `target_size` addresses out of `net`
///
/// Keeps halving while the target fits a further four-way subdivision,
/// always descending into the first half. At the last split the first half
/// is marked allocated. The returned list holds every leaf produced: the
/// allocated subnet plus the free halves left behind on the way down.
pub fn allocate_single(net: Network, target_size: u64) -> Result<Vec<Network>> {
    let (mut first, second) = split_in_half(&net)?;

    if target_size > net.size() / 4 {
        if target_size > first.size() {
            return Err(Error::UnsatisfiableSingleRequest {
                hosts: target_size.saturating_sub(RESERVED_ADDRESSES),
                max_hosts: usable_capacity(&first),
            });
        }

        first.mark_allocated();
        debug!(subnet = %first, free = %second, "Allocated subnet");
        return Ok(vec![first, second]);
    }

    let mut subnets = vec![second];
    subnets.extend(allocate_single(first, target_size)?);
    Ok(subnets)
}

/// Fit a single host-count request into `net`
///
/// The allocated leaf records `host_count` as its request.
pub fn allocate_hosts(net: Network, host_count: u32) -> Result<Vec<Network>> {
    let target_size = best_fit_size_for(&net, host_count)?;
    let mut subnets = allocate_single(net, target_size).map_err(|e| match e {
        Error::UnsatisfiableSingleRequest { max_hosts, .. } => Error::UnsatisfiableSingleRequest {
            hosts: u64::from(host_count),
            max_hosts,
        },
        other => other,
    })?;

    if let Some(leaf) = subnets
        .iter_mut()
        .find(|n| n.is_allocated() && n.requested_hosts().is_none())
    {
        leaf.assign(host_count);
    }

    Ok(subnets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net(address: &str, prefix_len: u8) -> Network {
        Network::with_prefix(Address::parse(address).unwrap(), prefix_len)
    }

    #[test]
    fn test_split_in_half() {
        let (first, second) = split_in_half(&net("192.168.1.0", 24)).unwrap();
        assert_eq!(first.to_string(), "192.168.1.0/25");
        assert_eq!(second.to_string(), "192.168.1.128/25");
        assert!(!first.is_allocated());
        assert!(!second.is_allocated());
    }

    #[test]
    fn test_split_carries_into_upper_octets() {
        let (_, second) = split_in_half(&net("10.0.0.0", 15)).unwrap();
        assert_eq!(second.to_string(), "10.1.0.0/16");
    }

    #[test]
    fn test_split_keeps_unaligned_base() {
        let (first, second) = split_in_half(&net("192.168.1.5", 24)).unwrap();
        assert_eq!(first.address().to_string(), "192.168.1.5");
        assert_eq!(second.address().to_string(), "192.168.1.133");
    }

    #[test]
    fn test_split_size_four_is_degenerate() {
        let result = split_in_half(&net("10.0.0.0", 30));
        assert!(matches!(result, Err(Error::DegenerateSplit { .. })));
        assert!(split_in_half(&net("10.0.0.8", 29)).is_ok());
    }

    #[test]
    fn test_usable_capacity() {
        assert_eq!(usable_capacity(&net("10.0.0.0", 24)), 254);
        assert_eq!(usable_capacity(&net("10.0.0.0", 30)), 2);
    }

    #[test]
    fn test_best_fit_size() {
        let root = net("192.168.1.0", 24);
        assert_eq!(best_fit_size_for(&root, 1).unwrap(), 4);
        assert_eq!(best_fit_size_for(&root, 2).unwrap(), 4);
        assert_eq!(best_fit_size_for(&root, 3).unwrap(), 8);
        assert_eq!(best_fit_size_for(&root, 14).unwrap(), 16);
        assert_eq!(best_fit_size_for(&root, 15).unwrap(), 32);
        assert_eq!(best_fit_size_for(&root, 100).unwrap(), 128);
        assert_eq!(best_fit_size_for(&root, 254).unwrap(), 256);
    }

    #[test]
    fn test_best_fit_exceeding_root() {
        let root = net("192.168.1.0", 24);
        let err = best_fit_size_for(&root, 255).unwrap_err();
        assert_eq!(
            err,
            Error::UnsatisfiableSingleRequest {
                hosts: 255,
                max_hosts: 126
            }
        );
    }

    #[test]
    fn test_allocate_single_takes_first_half() {
        let subnets = allocate_single(net("192.168.1.0", 24), 128).unwrap();
        assert_eq!(subnets.len(), 2);
        assert_eq!(subnets[0].to_string(), "192.168.1.0/25");
        assert!(subnets[0].is_allocated());
        assert_eq!(subnets[1].to_string(), "192.168.1.128/25");
        assert!(!subnets[1].is_allocated());
    }

    #[test]
    fn test_allocate_single_descends() {
        let subnets = allocate_single(net("192.168.1.0", 24), 16).unwrap();
        let rendered: Vec<(String, bool)> = subnets
            .iter()
            .map(|n| (n.to_string(), n.is_allocated()))
            .collect();
        assert_eq!(
            rendered,
            vec![
                ("192.168.1.128/25".to_string(), false),
                ("192.168.1.64/26".to_string(), false),
                ("192.168.1.32/27".to_string(), false),
                ("192.168.1.0/28".to_string(), true),
                ("192.168.1.16/28".to_string(), false),
            ]
        );
    }

    #[test]
    fn test_allocate_single_whole_network_does_not_fit() {
        let result = allocate_single(net("192.168.1.0", 24), 256);
        assert!(matches!(
            result,
            Err(Error::UnsatisfiableSingleRequest { hosts: 254, max_hosts: 126 })
        ));
    }

    #[test]
    fn test_allocate_single_on_size_four() {
        let result = allocate_single(net("10.0.0.0", 30), 4);
        assert!(matches!(result, Err(Error::DegenerateSplit { .. })));
    }

    #[test]
    fn test_allocate_hosts_reports_requested_count() {
        for hosts in [130u32, 200, 254] {
            let err = allocate_hosts(net("192.168.1.0", 24), hosts).unwrap_err();
            assert_eq!(
                err,
                Error::UnsatisfiableSingleRequest {
                    hosts: u64::from(hosts),
                    max_hosts: 126
                }
            );
        }
    }

    #[test]
    fn test_allocate_hosts_records_request() {
        let subnets = allocate_hosts(net("192.168.1.0", 24), 100).unwrap();
        let leaf = subnets.iter().find(|n| n.is_allocated()).unwrap();
        assert_eq!(leaf.requested_hosts(), Some(100));
        assert_eq!(leaf.usable_hosts(), 126);
    }
}
