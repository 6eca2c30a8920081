//! VLSM Subnet Allocator
//!
//! Partitions one IPv4 network into variable-length subnets sized to a set
//! of host-count requests:
//! - Bit-exact 32-bit addresses with ripple-carry addition
//! - Dotted-decimal and dotted-binary input and output
//! - Best-fit power-of-two sizing with two reserved addresses per subnet
//! - Deterministic, non-overlapping, size-ordered results
//!
//! ```
//! use vlsm::{allocate_set, Address, Network};
//!
//! let base = Network::new(
//!     Address::parse("192.168.1.0").unwrap(),
//!     Address::parse("255.255.255.0").unwrap(),
//! );
//! let subnets = allocate_set(base, &[50, 20, 10]).unwrap();
//!
//! assert_eq!(subnets[0].to_string(), "192.168.1.64/26");
//! assert_eq!(subnets[0].usable_hosts(), 62);
//! ```

pub mod address;
pub mod allocator;
pub mod error;
pub mod network;
pub mod report;
pub mod request;

// Re-export core types
pub use address::{bits_of, Address, AddressFormat, AddressParseError};
pub use allocator::{
    allocate_hosts, allocate_set, allocate_single, best_fit_size_for, plan, sort_by_size,
    split_in_half, usable_capacity, AllocationPlan, SortDirection,
};
pub use error::{Error, InputField, Result};
pub use network::{Network, RESERVED_ADDRESSES};
pub use report::{AllocationReport, SubnetView};
pub use request::{parse_address, parse_host_counts, VlsmRequest};
