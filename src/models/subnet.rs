//! Subnet descriptors produced by the calculators.

use super::class::{AddressType, Ipv4Class, Ipv6Category};
use super::count::AddressCount;
use serde::Serialize;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Addresses of a subnet, or just their count when over the display ceiling.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HostList {
    Listed { addresses: Vec<Ipv4Addr> },
    Omitted { count: u64, limit: u64 },
}

impl HostList {
    /// The listed addresses, if they were materialised.
    pub fn addresses(&self) -> Option<&[Ipv4Addr]> {
        match self {
            HostList::Listed { addresses } => Some(addresses),
            HostList::Omitted { .. } => None,
        }
    }
}

/// Everything derived from an IPv4 address and mask.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Ipv4SubnetInfo {
    pub network_address: Ipv4Addr,
    pub broadcast_address: Ipv4Addr,
    pub subnet_mask: Ipv4Addr,
    pub wildcard_mask: Ipv4Addr,
    /// Prefix length (0-32).
    pub cidr: u8,
    /// All addresses in the subnet, network and broadcast included.
    pub total_hosts: u64,
    pub usable_hosts: u64,
    pub first_usable_ip: Ipv4Addr,
    pub last_usable_ip: Ipv4Addr,
    pub ip_class: Ipv4Class,
    /// RFC 1918 membership of the address as entered.
    pub is_private: bool,
    pub address_type: AddressType,
    pub hosts: HostList,
}

/// Everything derived from an IPv6 address and prefix length.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Ipv6SubnetInfo {
    /// Abbreviated network with prefix, e.g. `2001:db8::/32`.
    pub network_address: String,
    pub network: Ipv6Addr,
    /// Abbreviated highest address covered by the prefix.
    pub last_address: String,
    pub prefix_length: u8,
    /// The address as entered, eight groups of four hex digits.
    pub expanded_form: String,
    pub address_category: Ipv6Category,
    pub total_addresses: AddressCount,
}

/// Outcome of one calculation.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SubnetResult {
    Ipv4(Ipv4SubnetInfo),
    Ipv6(Ipv6SubnetInfo),
    /// The input could not be parsed or was out of range.
    Invalid,
}

impl SubnetResult {
    pub fn is_invalid(&self) -> bool {
        matches!(self, SubnetResult::Invalid)
    }

    pub fn ipv4(&self) -> Option<&Ipv4SubnetInfo> {
        match self {
            SubnetResult::Ipv4(info) => Some(info),
            _ => None,
        }
    }

    pub fn ipv6(&self) -> Option<&Ipv6SubnetInfo> {
        match self {
            SubnetResult::Ipv6(info) => Some(info),
            _ => None,
        }
    }
}

impl From<Option<Ipv4SubnetInfo>> for SubnetResult {
    fn from(info: Option<Ipv4SubnetInfo>) -> Self {
        info.map_or(SubnetResult::Invalid, SubnetResult::Ipv4)
    }
}

impl From<Option<Ipv6SubnetInfo>> for SubnetResult {
    fn from(info: Option<Ipv6SubnetInfo>) -> Self {
        info.map_or(SubnetResult::Invalid, SubnetResult::Ipv6)
    }
}
