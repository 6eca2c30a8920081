//! Networks: a base address plus a mask
//!
//! A mask is an ordinary [`Address`] whose leading ones give the prefix
//! length. The mask shape is not validated: `255.0.255.0` counts as /8
//! because scanning stops at the first zero bit.

use crate::address::{Address, AddressFormat, ADDRESS_BITS};
use ipnet::Ipv4Net;
use serde::Serialize;
use std::fmt;

/// Addresses reserved in every network (network and broadcast)
pub const RESERVED_ADDRESSES: u64 = 2;

/// A network or subnet in the allocation tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Network {
    /// Base address
    address: Address,
    /// Subnet mask
    mask: Address,
    /// Terminal leaf already assigned to a request
    allocated: bool,
    /// Host count this leaf was assigned to, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    requested_hosts: Option<u32>,
}

impl Network {
    /// Create an unallocated network
    pub fn new(address: Address, mask: Address) -> Self {
        Self {
            address,
            mask,
            allocated: false,
            requested_hosts: None,
        }
    }

    /// Create a network from an address and a prefix length
    pub fn with_prefix(address: Address, prefix_len: u8) -> Self {
        Self::new(address, Address::mask(prefix_len))
    }

    /// Base address
    pub fn address(&self) -> Address {
        self.address
    }

    /// Subnet mask
    pub fn mask(&self) -> Address {
        self.mask
    }

    /// Number of leading one bits in the mask
    pub fn prefix_len(&self) -> u8 {
        self.mask.leading_ones()
    }

    /// Bits left for hosts
    pub fn host_bits(&self) -> u8 {
        ADDRESS_BITS as u8 - self.prefix_len()
    }

    /// Total number of addresses
    pub fn size(&self) -> u64 {
        1u64 << self.host_bits()
    }

    /// Addresses left after reserving network and broadcast
    ///
    /// Saturates at zero for /31 and /32.
    pub fn usable_hosts(&self) -> u64 {
        self.size().saturating_sub(RESERVED_ADDRESSES)
    }

    pub fn is_allocated(&self) -> bool {
        self.allocated
    }

    /// Host count this subnet was allocated for
    pub fn requested_hosts(&self) -> Option<u32> {
        self.requested_hosts
    }

    /// Mark as a terminal leaf
    pub fn mark_allocated(&mut self) {
        self.allocated = true;
    }

    /// Mark as a terminal leaf serving `hosts`
    pub fn assign(&mut self, hosts: u32) {
        self.allocated = true;
        self.requested_hosts = Some(hosts);
    }

    /// Copy with both address and mask rendered in `format`
    pub fn with_format(mut self, format: AddressFormat) -> Self {
        self.address = self.address.with_format(format);
        self.mask = self.mask.with_format(format);
        self
    }

    /// First address as an integer
    pub fn first(&self) -> u64 {
        u64::from(u32::from(self.address.to_ipv4()))
    }

    /// Last address as an integer
    ///
    /// Not clamped: an unaligned base near the top of the address space can
    /// run past `u32::MAX`.
    pub fn last(&self) -> u64 {
        self.first() + self.size() - 1
    }

    /// Whether `other` lies entirely inside this network
    pub fn contains(&self, other: &Network) -> bool {
        self.first() <= other.first() && other.last() <= self.last()
    }

    /// Whether the two address ranges share any address
    pub fn overlaps(&self, other: &Network) -> bool {
        self.first() <= other.last() && other.first() <= self.last()
    }

    /// CIDR view of this network
    ///
    /// Used for the `cidr` column of reports. Together with the
    /// `From<Ipv4Net>` impl below it lets callers holding `ipnet` values
    /// feed them straight into the allocator.
    pub fn to_ipnet(&self) -> Ipv4Net {
        Ipv4Net::new_assert(self.address.to_ipv4(), self.prefix_len())
    }
}

impl From<Ipv4Net> for Network {
    fn from(net: Ipv4Net) -> Self {
        Self::with_prefix(Address::from(net.addr()), net.prefix_len())
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_len())
    }
}
