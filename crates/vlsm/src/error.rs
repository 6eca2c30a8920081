//! Error types for VLSM allocation

use crate::address::AddressParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type for allocation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Input field a parsing failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    /// Base network address text
    NetworkAddress,
    /// Subnet mask text
    SubnetMask,
    /// Whitespace-separated host counts
    HostCounts,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputField::NetworkAddress => "network address",
            InputField::SubnetMask => "subnet mask",
            InputField::HostCounts => "host counts",
        };
        f.write_str(name)
    }
}

/// VLSM errors
///
/// Every variant is a deterministic function of the input: retrying with the
/// same input fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    // Input errors
    #[error("Invalid {field} '{input}': {source}")]
    InvalidAddressFormat {
        field: InputField,
        input: String,
        #[source]
        source: AddressParseError,
    },

    #[error("Invalid host count '{token}': {reason}")]
    InvalidHostRequest { token: String, reason: &'static str },

    // Allocation errors
    #[error("Cannot subnet for {hosts} hosts, max subnet size is {max_hosts} hosts")]
    UnsatisfiableSingleRequest { hosts: u64, max_hosts: u64 },

    #[error("No free subnet available for {hosts} hosts")]
    UnsatisfiableSetAllocation { hosts: u32 },

    #[error("Network {network} is too small to have any subnets")]
    DegenerateSplit { network: String },
}

impl Error {
    /// Input field this error was raised for, if it came from parsing
    pub fn field(&self) -> Option<InputField> {
        match self {
            Error::InvalidAddressFormat { field, .. } => Some(*field),
            Error::InvalidHostRequest { .. } => Some(InputField::HostCounts),
            _ => None,
        }
    }

    /// Whether the error was raised while allocating rather than parsing
    pub fn is_allocation_error(&self) -> bool {
        self.field().is_none()
    }
}
