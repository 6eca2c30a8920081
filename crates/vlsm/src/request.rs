//! Parsing of the textual inputs for one allocation run
//!
//! All three fields are validated before any allocation work begins, in the
//! order address, mask, host counts. The first failing field is reported.

use crate::address::Address;
use crate::allocator;
use crate::error::InputField;
use crate::network::Network;
use crate::report::AllocationReport;
use crate::{Error, Result};
use tracing::debug;

/// Parse whitespace-separated, non-zero, base-10 host counts
///
/// One bad token rejects the whole batch.
pub fn parse_host_counts(text: &str) -> Result<Vec<u32>> {
    let counts = text
        .split_whitespace()
        .map(|token| -> Result<u32> {
            let count: u32 = token.parse().map_err(|_| Error::InvalidHostRequest {
                token: token.to_string(),
                reason: "not a positive base-10 integer",
            })?;
            if count == 0 {
                return Err(Error::InvalidHostRequest {
                    token: token.to_string(),
                    reason: "host count must be non-zero",
                });
            }
            Ok(count)
        })
        .collect::<Result<Vec<u32>>>()?;

    if counts.is_empty() {
        return Err(Error::InvalidHostRequest {
            token: text.to_string(),
            reason: "no host counts given",
        });
    }

    Ok(counts)
}

/// Parse one address field, tagging failures with the field
pub fn parse_address(text: &str, field: InputField) -> Result<Address> {
    Address::parse(text).map_err(|source| Error::InvalidAddressFormat {
        field,
        input: text.trim().to_string(),
        source,
    })
}

/// A validated allocation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VlsmRequest {
    /// Base network to partition
    pub network: Network,
    /// Host counts in the order given
    pub host_counts: Vec<u32>,
}

impl VlsmRequest {
    /// Create a request from already parsed parts
    pub fn new(network: Network, host_counts: Vec<u32>) -> Self {
        Self {
            network,
            host_counts,
        }
    }

    /// Validate the three input texts
    pub fn parse(address_text: &str, mask_text: &str, hosts_text: &str) -> Result<Self> {
        let address = parse_address(address_text, InputField::NetworkAddress)?;
        let mask = parse_address(mask_text, InputField::SubnetMask)?;
        let host_counts = parse_host_counts(hosts_text)?;

        let network = Network::new(address, mask);
        debug!(network = %network, requests = host_counts.len(), "Parsed allocation request");

        Ok(Self::new(network, host_counts))
    }

    /// Run the allocation
    pub fn allocate(&self) -> Result<AllocationReport> {
        let plan = allocator::plan(self.network.clone(), &self.host_counts)?;
        Ok(AllocationReport::from(plan))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_host_counts() {
        assert_eq!(parse_host_counts("50 20 10").unwrap(), vec![50, 20, 10]);
        assert_eq!(parse_host_counts(" 7\t3\n\n12 ").unwrap(), vec![7, 3, 12]);
    }

    #[test]
    fn test_zero_host_count_rejected() {
        let err = parse_host_counts("10 0 5").unwrap_err();
        assert_eq!(
            err,
            Error::InvalidHostRequest {
                token: "0".to_string(),
                reason: "host count must be non-zero",
            }
        );
    }

    #[test]
    fn test_non_numeric_host_count_rejected() {
        for text in ["10 ten", "-4", "3.5", "1e3", "99999999999"] {
            let err = parse_host_counts(text).unwrap_err();
            assert_eq!(err.field(), Some(InputField::HostCounts), "{text}");
        }
    }

    #[test]
    fn test_empty_host_counts_rejected() {
        assert!(parse_host_counts("").is_err());
        assert!(parse_host_counts("   ").is_err());
    }

    #[test]
    fn test_request_reports_first_bad_field() {
        let err = VlsmRequest::parse("256.1.1.1", "bogus", "0").unwrap_err();
        assert_eq!(err.field(), Some(InputField::NetworkAddress));

        let err = VlsmRequest::parse("10.0.0.0", "255.255", "0").unwrap_err();
        assert_eq!(err.field(), Some(InputField::SubnetMask));

        let err = VlsmRequest::parse("10.0.0.0", "255.255.255.0", "0").unwrap_err();
        assert_eq!(err.field(), Some(InputField::HostCounts));
    }

    #[test]
    fn test_request_parses_binary_mask() {
        let request = VlsmRequest::parse(
            "192.168.1.0",
            "11111111.11111111.11111111.00000000",
            "100",
        )
        .unwrap();
        assert_eq!(request.network.prefix_len(), 24);
        assert_eq!(request.host_counts, vec![100]);
    }

    #[test]
    fn test_request_allocate() {
        let request = VlsmRequest::parse("192.168.1.0", "255.255.255.0", "50 20 10").unwrap();
        let report = request.allocate().unwrap();
        assert_eq!(report.subnets.len(), 3);
        assert_eq!(report.subnets[0].network, "192.168.1.64");
        assert_eq!(report.subnets[0].prefix_len, 26);
    }
}
