//! Host enumeration for IPv4 subnets.

use crate::config::MAX_HOST_LIST_LIMIT;
use crate::models::{HostList, Ipv4};
use std::net::Ipv4Addr;

/// List every address from network to broadcast, or only count them when
/// the subnet is larger than `limit`.
///
/// `limit` is capped at [`MAX_HOST_LIST_LIMIT`].
pub fn enumerate_hosts(subnet: &Ipv4, limit: u64) -> HostList {
    let limit = limit.min(MAX_HOST_LIST_LIMIT);
    let count = subnet.size();
    if count > limit {
        log::debug!("{subnet}: {count} addresses over limit {limit}, not listed");
        return HostList::Omitted { count, limit };
    }
    let lo = u32::from(subnet.lo());
    let hi = u32::from(subnet.hi());
    HostList::Listed {
        addresses: (lo..=hi).map(Ipv4Addr::from).collect(),
    }
}
