//! IPv4 subnet calculation.
//!
//! Derives network, broadcast, usable range, host counts and classification
//! from an address and a mask given either as prefix length or dotted mask.

use super::hosts::enumerate_hosts;
use crate::models::{
    broadcast_addr, cut_addr, is_rfc1918, parse_dotted, AddressType, Ipv4, Ipv4Class,
    Ipv4SubnetInfo, MaskMode,
};
use std::error::Error;
use std::net::Ipv4Addr;

/// Usable host count and range for a subnet.
///
/// `/32` is a host route (one usable address), `/31` a point-to-point link
/// where both addresses are usable (RFC 3021).
fn usable_range(
    network: Ipv4Addr,
    broadcast: Ipv4Addr,
    cidr: u8,
    total: u64,
) -> (u64, Ipv4Addr, Ipv4Addr) {
    match cidr {
        32 => (1, network, network),
        31 => (2, network, broadcast),
        _ => (
            total.saturating_sub(2),
            Ipv4Addr::from(u32::from(network) + 1),
            Ipv4Addr::from(u32::from(broadcast) - 1),
        ),
    }
}

/// Build the descriptor for an already validated subnet.
pub fn describe_ipv4(subnet: &Ipv4, host_limit: u64) -> Result<Ipv4SubnetInfo, Box<dyn Error>> {
    let network = cut_addr(subnet.addr, subnet.mask)?;
    let broadcast = broadcast_addr(subnet.addr, subnet.mask)?;
    let total_hosts = subnet.size();
    let (usable_hosts, first, last) = usable_range(network, broadcast, subnet.mask, total_hosts);

    log::trace!("{subnet}: network={network} broadcast={broadcast} usable={usable_hosts}");

    Ok(Ipv4SubnetInfo {
        network_address: network,
        broadcast_address: broadcast,
        subnet_mask: subnet.netmask(),
        wildcard_mask: subnet.wildcard(),
        cidr: subnet.mask,
        total_hosts,
        usable_hosts,
        first_usable_ip: first,
        last_usable_ip: last,
        ip_class: Ipv4Class::of(subnet.addr),
        is_private: is_rfc1918(subnet.addr),
        address_type: AddressType::of(subnet.addr),
        hosts: enumerate_hosts(subnet, host_limit),
    })
}

fn try_calculate_ipv4(
    address: &str,
    mask: &str,
    mode: MaskMode,
    host_limit: u64,
) -> Result<Ipv4SubnetInfo, Box<dyn Error>> {
    let addr = parse_dotted(address)?;
    let (_, cidr) = mode.resolve(mask)?;
    describe_ipv4(&Ipv4 { addr, mask: cidr }, host_limit)
}

/// Calculate an IPv4 subnet.
///
/// Returns `None` for any malformed address or mask; the reason is logged at
/// debug level.
///
/// # Examples
/// ```
/// use ip_subnet_calc::models::MaskMode;
/// use ip_subnet_calc::processing::calculate_ipv4;
/// let info = calculate_ipv4("192.168.1.100", "24", MaskMode::Cidr, 1000).unwrap();
/// assert_eq!(info.usable_hosts, 254);
/// assert!(calculate_ipv4("192.168.1.256", "24", MaskMode::Cidr, 1000).is_none());
/// ```
pub fn calculate_ipv4(
    address: &str,
    mask: &str,
    mode: MaskMode,
    host_limit: u64,
) -> Option<Ipv4SubnetInfo> {
    try_calculate_ipv4(address, mask, mode, host_limit)
        .map_err(|e| log::debug!("Rejected IPv4 input {address:?} mask {mask:?} ({mode}): {e}"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{get_cidr_mask, HostList};

    fn calc(address: &str, mask: &str) -> Option<Ipv4SubnetInfo> {
        calculate_ipv4(address, mask, MaskMode::detect(mask), 1000)
    }

    #[test]
    fn test_class_c_private() {
        let info = calc("192.168.1.100", "24").unwrap();
        assert_eq!(info.network_address, Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(info.broadcast_address, Ipv4Addr::new(192, 168, 1, 255));
        assert_eq!(info.first_usable_ip, Ipv4Addr::new(192, 168, 1, 1));
        assert_eq!(info.last_usable_ip, Ipv4Addr::new(192, 168, 1, 254));
        assert_eq!(info.subnet_mask, Ipv4Addr::new(255, 255, 255, 0));
        assert_eq!(info.wildcard_mask, Ipv4Addr::new(0, 0, 0, 255));
        assert_eq!(info.total_hosts, 256);
        assert_eq!(info.usable_hosts, 254);
        assert_eq!(info.ip_class, Ipv4Class::C);
        assert!(info.is_private);
        assert_eq!(info.address_type, AddressType::Private);
        assert_eq!(info.hosts.addresses().map(|a| a.len()), Some(256));
    }

    #[test]
    fn test_class_a_private() {
        let info = calc("10.0.0.1", "8").unwrap();
        assert_eq!(info.network_address, Ipv4Addr::new(10, 0, 0, 0));
        assert_eq!(info.broadcast_address, Ipv4Addr::new(10, 255, 255, 255));
        assert_eq!(info.usable_hosts, 16_777_214);
        assert_eq!(info.ip_class, Ipv4Class::A);
        assert!(info.is_private);
        assert!(matches!(info.hosts, HostList::Omitted { count: 16_777_216, .. }));
    }

    #[test]
    fn test_dotted_mask_matches_cidr() {
        let dotted = calc("172.20.3.4", "255.255.240.0").unwrap();
        let cidr = calc("172.20.3.4", "20").unwrap();
        assert_eq!(dotted, cidr);
        assert_eq!(dotted.cidr, 20);
        assert_eq!(dotted.network_address, Ipv4Addr::new(172, 20, 0, 0));
    }

    #[test]
    fn test_usable_hosts_all_prefixes() {
        for p in 0..=30u8 {
            let info = calc("203.0.113.77", &p.to_string()).unwrap();
            assert_eq!(info.usable_hosts, (1u64 << (32 - p)) - 2, "prefix /{p}");
            assert_eq!(
                u32::from(info.first_usable_ip),
                u32::from(info.network_address) + 1
            );
            assert_eq!(
                u32::from(info.last_usable_ip),
                u32::from(info.broadcast_address) - 1
            );
            assert!(info.network_address <= info.first_usable_ip);
            assert!(info.last_usable_ip <= info.broadcast_address);
        }
    }

    #[test]
    fn test_point_to_point() {
        let info = calc("198.51.100.7", "31").unwrap();
        assert_eq!(info.usable_hosts, 2);
        assert_eq!(info.total_hosts, 2);
        assert_eq!(info.first_usable_ip, info.network_address);
        assert_eq!(info.last_usable_ip, info.broadcast_address);
        assert_eq!(info.network_address, Ipv4Addr::new(198, 51, 100, 6));
        assert_eq!(info.broadcast_address, Ipv4Addr::new(198, 51, 100, 7));
    }

    #[test]
    fn test_host_route() {
        let info = calc("198.51.100.7", "255.255.255.255").unwrap();
        assert_eq!(info.cidr, 32);
        assert_eq!(info.usable_hosts, 1);
        assert_eq!(info.total_hosts, 1);
        assert_eq!(info.network_address, Ipv4Addr::new(198, 51, 100, 7));
        assert_eq!(info.broadcast_address, info.network_address);
        assert_eq!(info.first_usable_ip, info.network_address);
        assert_eq!(info.last_usable_ip, info.network_address);
    }

    #[test]
    fn test_whole_space() {
        let info = calc("8.8.8.8", "0").unwrap();
        assert_eq!(info.network_address, Ipv4Addr::new(0, 0, 0, 0));
        assert_eq!(info.broadcast_address, Ipv4Addr::new(255, 255, 255, 255));
        assert_eq!(info.total_hosts, 1u64 << 32);
        assert_eq!(info.usable_hosts, (1u64 << 32) - 2);
        assert_eq!(info.ip_class, Ipv4Class::A);
        assert_eq!(info.address_type, AddressType::Public);
        assert!(!info.is_private);
    }

    #[test]
    fn test_classification_uses_input_address() {
        // masking to 0.0.0.0 must not turn the address into "This Network"
        let info = calc("127.0.0.1", "0").unwrap();
        assert_eq!(info.ip_class, Ipv4Class::Loopback);
        assert_eq!(info.address_type, AddressType::Loopback);
    }

    #[test]
    fn test_cidr_dotted_round_trip() {
        for p in 0..=32u8 {
            let dotted = std::net::Ipv4Addr::from(get_cidr_mask(p).unwrap()).to_string();
            let info = calc("10.1.2.3", &dotted).unwrap();
            assert_eq!(info.cidr, p);
            assert_eq!(info.subnet_mask.to_string(), dotted);
        }
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(calc("192.168.1.256", "24").is_none());
        assert!(calc("192.168.1", "24").is_none());
        assert!(calc("192.168.1.1", "33").is_none());
        assert!(calc("192.168.1.1", "-1").is_none());
        assert!(calc("192.168.1.1", "").is_none());
        assert!(calc("192.168.1.1", "255.0.255.0").is_none());
        assert!(calc("192.168.1.1", "255.255.255.256").is_none());
        assert!(calculate_ipv4("192.168.1.1", "24", MaskMode::Dotted, 1000).is_none());
    }
}
