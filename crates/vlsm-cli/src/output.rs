//! Rendering of allocation reports and network summaries

use crate::cli::OutputFormat;
use anyhow::{Context, Result};
use std::fmt::Write;
use vlsm::{AddressFormat, AllocationReport, SubnetView};

/// Render an allocation report
pub fn render_report(
    report: &AllocationReport,
    format: OutputFormat,
    address_format: AddressFormat,
    show_free: bool,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(report.render_text(address_format, show_free)),
        OutputFormat::Table => {
            let mut out = table_header();
            for view in &report.subnets {
                out.push_str(&table_row(view, address_format));
            }
            if show_free {
                for view in &report.free {
                    out.push_str(&table_row(view, address_format));
                }
            }
            Ok(out)
        }
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).context("Failed to serialize report")
        }
    }
}

/// Render a single network summary
pub fn render_network(
    view: &SubnetView,
    format: OutputFormat,
    address_format: AddressFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let (network, mask) = view.address_pair(address_format);
            let mut out = String::new();
            let _ = writeln!(out, "Network Address: {}", network);
            let _ = writeln!(out, "Subnet Mask:     {}", mask);
            let _ = writeln!(out, "Prefix Length:   /{}", view.prefix_len);
            let _ = writeln!(out, "Size:            {}", view.size);
            let _ = write!(out, "Hosts:           {}", view.usable_hosts);
            Ok(out)
        }
        OutputFormat::Table => Ok(format!("{}{}", table_header(), table_row(view, address_format))),
        OutputFormat::Json => serde_json::to_string_pretty(view).context("Failed to serialize network"),
    }
}

fn table_header() -> String {
    format!(
        "{:<4} {:<36} {:<36} {:>10} {:>10} {:>10} {:<6}\n",
        "#", "NETWORK", "MASK", "SIZE", "HOSTS", "REQUESTED", "IN USE"
    )
}

fn table_row(view: &SubnetView, address_format: AddressFormat) -> String {
    let (network, mask) = view.address_pair(address_format);
    let cidr = match address_format {
        AddressFormat::Decimal => view.cidr.clone(),
        AddressFormat::Binary => format!("{}/{}", network, view.prefix_len),
    };
    let requested = view
        .requested_hosts
        .map(|hosts| hosts.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{:<4} {:<36} {:<36} {:>10} {:>10} {:>10} {:<6}\n",
        view.position,
        cidr,
        mask,
        view.size,
        view.usable_hosts,
        requested,
        if view.allocated { "yes" } else { "no" },
    )
}
