//! Presentation view of an allocation run

use crate::address::AddressFormat;
use crate::allocator::AllocationPlan;
use crate::network::Network;
use serde::Serialize;
use std::fmt::Write;

/// One subnet as shown to a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubnetView {
    /// 1-based position in descending size order
    pub position: usize,
    /// CIDR notation, e.g. `192.168.1.64/26`
    pub cidr: String,
    pub network: String,
    pub network_binary: String,
    pub mask: String,
    pub mask_binary: String,
    pub prefix_len: u8,
    pub size: u64,
    pub usable_hosts: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_hosts: Option<u32>,
    pub allocated: bool,
}

impl SubnetView {
    /// Build the view of `net` at `position`
    pub fn new(position: usize, net: &Network) -> Self {
        Self {
            position,
            cidr: net.to_ipnet().to_string(),
            network: net.address().render(AddressFormat::Decimal),
            network_binary: net.address().render(AddressFormat::Binary),
            mask: net.mask().render(AddressFormat::Decimal),
            mask_binary: net.mask().render(AddressFormat::Binary),
            prefix_len: net.prefix_len(),
            size: net.size(),
            usable_hosts: net.usable_hosts(),
            requested_hosts: net.requested_hosts(),
            allocated: net.is_allocated(),
        }
    }

    /// Address and mask in the requested rendering
    pub fn address_pair(&self, format: AddressFormat) -> (&str, &str) {
        match format {
            AddressFormat::Decimal => (self.network.as_str(), self.mask.as_str()),
            AddressFormat::Binary => (self.network_binary.as_str(), self.mask_binary.as_str()),
        }
    }

    /// Multi-line text block for this subnet
    pub fn render_text(&self, format: AddressFormat) -> String {
        let (network, mask) = self.address_pair(format);
        let mut out = String::new();
        let _ = writeln!(out, "Network Address: {}", network);
        let _ = writeln!(out, "Subnet Mask: {}", mask);
        let _ = writeln!(out, "Size: {}", self.size);
        let _ = writeln!(out, "Hosts: {}", self.usable_hosts);
        if let Some(requested) = self.requested_hosts {
            let _ = writeln!(out, "Requested: {}", requested);
        }
        let _ = write!(out, "In use: {}", self.allocated);
        out
    }
}

/// Allocation result ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationReport {
    /// Network that was partitioned
    pub base: SubnetView,
    /// Allocated subnets, largest first
    pub subnets: Vec<SubnetView>,
    /// Free remainder, largest first
    pub free: Vec<SubnetView>,
}

impl AllocationReport {
    /// Text blocks for every allocated subnet, optionally followed by the
    /// free remainder, separated by blank lines
    pub fn render_text(&self, format: AddressFormat, show_free: bool) -> String {
        let rows = self.subnets.iter();
        let blocks: Vec<String> = if show_free {
            rows.chain(self.free.iter())
                .map(|view| view.render_text(format))
                .collect()
        } else {
            rows.map(|view| view.render_text(format)).collect()
        };
        blocks.join("\n\n")
    }
}

impl From<AllocationPlan> for AllocationReport {
    fn from(plan: AllocationPlan) -> Self {
        let views = |nets: &[Network]| -> Vec<SubnetView> {
            nets.iter()
                .enumerate()
                .map(|(i, net)| SubnetView::new(i + 1, net))
                .collect()
        };

        Self {
            base: SubnetView::new(0, &plan.base),
            subnets: views(&plan.subnets),
            free: views(&plan.free),
        }
    }
}
