//! End-to-end allocation scenarios
//!
//! Drives the public API from raw input text through to the final report,
//! the way a presentation layer would.

use vlsm::{AddressFormat, Error, InputField, VlsmRequest};

// ============================================================================
// Successful Runs
// ============================================================================

#[test]
fn test_single_request_takes_half() {
    let request = VlsmRequest::parse("192.168.1.0", "255.255.255.0", "100").unwrap();
    let report = request.allocate().unwrap();

    assert_eq!(report.subnets.len(), 1);
    let subnet = &report.subnets[0];
    assert_eq!(subnet.network, "192.168.1.0");
    assert_eq!(subnet.prefix_len, 25);
    assert_eq!(subnet.size, 128);
    assert_eq!(subnet.usable_hosts, 126);
}

#[test]
fn test_three_requests_descending() {
    let request = VlsmRequest::parse("192.168.1.0", "255.255.255.0", "50 20 10").unwrap();
    let report = request.allocate().unwrap();

    let rows: Vec<(&str, u8, u64)> = report
        .subnets
        .iter()
        .map(|v| (v.network.as_str(), v.prefix_len, v.size))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("192.168.1.64", 26, 64),
            ("192.168.1.32", 27, 32),
            ("192.168.1.0", 28, 16),
        ]
    );
}

#[test]
fn test_binary_input_matches_decimal_input() {
    let decimal = VlsmRequest::parse("172.16.0.0", "255.255.0.0", "1000 200 30")
        .unwrap()
        .allocate()
        .unwrap();
    let binary = VlsmRequest::parse(
        "10101100.00010000.00000000.00000000",
        "11111111.11111111.00000000.00000000",
        "30 1000 200",
    )
    .unwrap()
    .allocate()
    .unwrap();

    assert_eq!(decimal, binary);
}

#[test]
fn test_large_campus_layout() {
    let request =
        VlsmRequest::parse("10.0.0.0", "255.255.0.0", "4000 2000 1000 500 250 120 60 2 2").unwrap();
    let report = request.allocate().unwrap();

    let prefixes: Vec<u8> = report.subnets.iter().map(|v| v.prefix_len).collect();
    assert_eq!(prefixes, vec![20, 21, 22, 23, 24, 25, 26, 30, 30]);
    for view in &report.subnets {
        assert!(view.usable_hosts >= u64::from(view.requested_hosts.unwrap()));
    }
}

#[test]
fn test_binary_rendering() {
    let report = VlsmRequest::parse("192.168.1.0", "255.255.255.0", "100")
        .unwrap()
        .allocate()
        .unwrap();
    let text = report.render_text(AddressFormat::Binary, false);

    assert!(text.contains("Network Address: 11000000.10101000.00000001.00000000"));
    assert!(text.contains("Subnet Mask: 11111111.11111111.11111111.10000000"));
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_request_larger_than_network() {
    let request = VlsmRequest::parse("192.168.1.0", "255.255.255.0", "255").unwrap();
    let err = request.allocate().unwrap_err();

    assert!(matches!(err, Error::UnsatisfiableSingleRequest { hosts: 255, .. }));
    assert!(err.is_allocation_error());
}

#[test]
fn test_request_over_half_reports_requested_count() {
    for hosts in ["130", "200", "254"] {
        let request = VlsmRequest::parse("192.168.1.0", "255.255.255.0", hosts).unwrap();
        let err = request.allocate().unwrap_err();

        assert_eq!(
            err,
            Error::UnsatisfiableSingleRequest {
                hosts: hosts.parse().unwrap(),
                max_hosts: 126,
            }
        );
        assert!(err.to_string().starts_with(&format!("Cannot subnet for {} hosts", hosts)));
    }
}

#[test]
fn test_slash_30_cannot_split() {
    let request =
        VlsmRequest::parse("10.0.0.0", "11111111.11111111.11111111.11111100", "1").unwrap();
    let err = request.allocate().unwrap_err();

    assert!(matches!(err, Error::DegenerateSplit { .. }));
}

#[test]
fn test_out_of_range_octet() {
    let err = VlsmRequest::parse("256.1.1.1", "255.255.255.0", "10").unwrap_err();

    assert!(matches!(
        err,
        Error::InvalidAddressFormat {
            field: InputField::NetworkAddress,
            ..
        }
    ));
}

#[test]
fn test_zero_host_count() {
    let err = VlsmRequest::parse("10.0.0.0", "255.255.255.0", "10 0 5").unwrap_err();

    assert!(matches!(err, Error::InvalidHostRequest { .. }));
    assert_eq!(err.field(), Some(InputField::HostCounts));
}

#[test]
fn test_set_does_not_fit() {
    let request = VlsmRequest::parse("192.168.1.0", "255.255.255.0", "60 60 60 60 60").unwrap();
    let err = request.allocate().unwrap_err();

    assert_eq!(err, Error::UnsatisfiableSetAllocation { hosts: 60 });
}
