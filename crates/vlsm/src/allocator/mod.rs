//! VLSM allocation
//!
//! Partitions a base network into best-fit subnets, one per host-count
//! request, by repeatedly halving:
//! - A single request descends into first halves until the next split
//!   would make the subnet too small, leaving the second halves free
//! - A set of requests is placed largest last: the smaller requests are
//!   allocated first, then each larger one takes the smallest free leaf
//!   that can hold it
//!
//! Every leaf is owned by exactly one `Vec` at a time; splitting a leaf
//! removes it and extends the list with its children.

mod order;
mod split;

pub use order::{sort_by_size, SortDirection};
pub use split::{allocate_hosts, allocate_single, best_fit_size_for, split_in_half, usable_capacity};

use crate::network::{Network, RESERVED_ADDRESSES};
use crate::{Error, Result};
use serde::Serialize;
use tracing::{debug, instrument, warn};

/// Outcome of one allocation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationPlan {
    /// Base network the run started from
    pub base: Network,
    /// Allocated leaves, largest first
    pub subnets: Vec<Network>,
    /// Leaves left free, largest first
    pub free: Vec<Network>,
}

impl AllocationPlan {
    /// Total addresses handed out to requests
    pub fn allocated_size(&self) -> u64 {
        self.subnets.iter().map(Network::size).sum()
    }

    /// Total addresses left in free leaves
    pub fn free_size(&self) -> u64 {
        self.free.iter().map(Network::size).sum()
    }
}

/// Allocate one subnet per host count and return the allocated leaves,
/// largest first
pub fn allocate_set(net: Network, host_counts: &[u32]) -> Result<Vec<Network>> {
    plan(net, host_counts).map(|plan| plan.subnets)
}

/// Allocate one subnet per host count, keeping the free remainder too
///
/// The caller's order of `host_counts` does not matter. Any failure aborts
/// the whole run.
#[instrument(skip_all, fields(base = %net, requests = host_counts.len()))]
pub fn plan(net: Network, host_counts: &[u32]) -> Result<AllocationPlan> {
    let base = net.clone();

    let mut sorted = host_counts.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let leaves = if sorted.is_empty() {
        vec![net]
    } else {
        place(net, &sorted).map_err(|e| {
            warn!(error = %e, "Allocation failed");
            e
        })?
    };

    let (mut subnets, mut free): (Vec<Network>, Vec<Network>) =
        leaves.into_iter().partition(Network::is_allocated);
    sort_by_size(&mut subnets, SortDirection::Descending);
    sort_by_size(&mut free, SortDirection::Descending);

    debug!(
        allocated = subnets.len(),
        free = free.len(),
        "Allocation complete"
    );

    Ok(AllocationPlan {
        base,
        subnets,
        free,
    })
}

/// Place requests sorted largest first; returns every leaf
fn place(net: Network, host_counts: &[u32]) -> Result<Vec<Network>> {
    let (&largest, rest) = match host_counts.split_first() {
        Some(split) => split,
        None => return Ok(vec![net]),
    };

    if rest.is_empty() {
        return allocate_hosts(net, largest);
    }

    let mut subnets = place(net, rest)?;
    sort_by_size(&mut subnets, SortDirection::Ascending);

    let index = subnets
        .iter()
        .position(|n| !n.is_allocated() && usable_capacity(n) >= u64::from(largest))
        .ok_or(Error::UnsatisfiableSetAllocation { hosts: largest })?;

    // Halving would leave too little room, so the whole leaf is the best fit
    if subnets[index].size() / 2 < u64::from(largest) + RESERVED_ADDRESSES {
        subnets[index].assign(largest);
        debug!(subnet = %subnets[index], hosts = largest, "Assigned free subnet");
    } else {
        let chosen = subnets.remove(index);
        debug!(subnet = %chosen, hosts = largest, "Splitting free subnet");
        subnets.extend(allocate_hosts(chosen, largest)?);
    }

    Ok(subnets)
}
