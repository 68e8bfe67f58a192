//! Domain models for the subnet calculator.
//!
//! This module contains the core data structures used throughout the crate:
//! - [`Ipv4`] - IPv4 address with CIDR notation support
//! - [`Ipv6Prefix`] - IPv6 address with a prefix length
//! - [`Ipv4SubnetInfo`], [`Ipv6SubnetInfo`] and [`SubnetResult`] - calculator output
//! - classification enums and [`AddressCount`]

mod class;
mod count;
mod ipv4;
mod ipv6;
mod subnet;

// Re-export public types
pub use class::{is_rfc1918, AddressType, ClassSuggestion, Ipv4Class, Ipv6Category};
pub use count::{group_digits, AddressCount};
pub use ipv4::{
    broadcast_addr, cut_addr, get_cidr_mask, mask_to_cidr, parse_cidr_len, parse_dotted,
    parse_dotted_mask, Ipv4, MaskMode, MAX_LENGTH,
};
pub use ipv6::{
    abbreviated, expanded, last_addr, network_addr, parse_colon_hex, parse_prefix, Ipv6Prefix,
    MAX_PREFIX,
};
pub use subnet::{HostList, Ipv4SubnetInfo, Ipv6SubnetInfo, SubnetResult};
