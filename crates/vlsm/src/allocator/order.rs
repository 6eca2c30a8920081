//! Size ordering for subnet lists

use crate::network::Network;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Direction for [`sort_by_size`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest first
    Ascending,
    /// Largest first
    Descending,
}

/// Stable sort by network size
///
/// Networks of equal size keep their relative order, which makes the
/// best-fit scan deterministic.
pub fn sort_by_size(networks: &mut [Network], direction: SortDirection) {
    match direction {
        SortDirection::Ascending => networks.sort_by_key(Network::size),
        SortDirection::Descending => networks.sort_by_key(|n| Reverse(n.size())),
    }
}
