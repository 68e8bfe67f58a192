//! IPv6 subnet calculation.

use crate::models::{abbreviated, expanded, Ipv6Category, Ipv6Prefix, Ipv6SubnetInfo};
use std::error::Error;

/// Build the descriptor for an already validated prefix.
pub fn describe_ipv6(prefix: &Ipv6Prefix) -> Ipv6SubnetInfo {
    let network = prefix.network();
    Ipv6SubnetInfo {
        network_address: format!("{}/{}", abbreviated(network), prefix.prefix),
        network,
        last_address: abbreviated(prefix.last()),
        prefix_length: prefix.prefix,
        expanded_form: expanded(prefix.addr),
        address_category: Ipv6Category::of(prefix.addr),
        total_addresses: prefix.size(),
    }
}

fn try_calculate_ipv6(address: &str, prefix: &str) -> Result<Ipv6SubnetInfo, Box<dyn Error>> {
    let prefix = Ipv6Prefix::from_parts(address, prefix)?;
    Ok(describe_ipv6(&prefix))
}

/// Calculate an IPv6 subnet. Returns `None` for malformed input.
///
/// # Examples
/// ```
/// use ip_subnet_calc::processing::calculate_ipv6;
/// let info = calculate_ipv6("2001:db8::1", "32").unwrap();
/// assert_eq!(info.network_address, "2001:db8::/32");
/// ```
pub fn calculate_ipv6(address: &str, prefix: &str) -> Option<Ipv6SubnetInfo> {
    try_calculate_ipv6(address, prefix)
        .map_err(|e| log::debug!("Rejected IPv6 input {address:?} prefix {prefix:?}: {e}"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AddressCount;

    #[test]
    fn test_loopback() {
        let info = calculate_ipv6("::1", "128").unwrap();
        assert_eq!(info.address_category, Ipv6Category::Loopback);
        assert_eq!(
            info.expanded_form,
            "0000:0000:0000:0000:0000:0000:0000:0001"
        );
        assert_eq!(info.network_address, "::1/128");
        assert_eq!(info.total_addresses, AddressCount::Exact(1));
    }

    #[test]
    fn test_documentation() {
        let info = calculate_ipv6("2001:db8::1", "32").unwrap();
        assert_eq!(info.address_category, Ipv6Category::Documentation);
        assert_eq!(info.network_address, "2001:db8::/32");
        assert_eq!(abbreviated(info.network), "2001:db8::");
        assert_eq!(info.last_address, "2001:db8:ffff:ffff:ffff:ffff:ffff:ffff");
        assert_eq!(info.total_addresses, AddressCount::Exact(1u128 << 96));
    }

    #[test]
    fn test_straddling_prefix() {
        let info = calculate_ipv6("fe80::abcd:1234:5678:9abc", "/64").unwrap();
        assert_eq!(info.address_category, Ipv6Category::LinkLocal);
        assert_eq!(info.network_address, "fe80::/64");
        // 0xabcd keeps its top 6 bits, both zero runs are 3 long
        let info = calculate_ipv6("fe80::abcd:1234:5678:9abc", "/70").unwrap();
        assert_eq!(info.network_address, "fe80::a800:0:0:0/70");
        let info = calculate_ipv6("2001:db8:1234:ffff::", "60").unwrap();
        assert_eq!(info.network_address, "2001:db8:1234:fff0::/60");
    }

    #[test]
    fn test_expanded_form_shape() {
        for text in ["::", "1::", "ff02::1:ff00:1", "2002:c000:204::", "a:b:c:d:e:f:0:1"] {
            let info = calculate_ipv6(text, "64").unwrap();
            let groups: Vec<&str> = info.expanded_form.split(':').collect();
            assert_eq!(groups.len(), 8, "{text}");
            assert!(groups.iter().all(|g| g.len() == 4), "{text}");
        }
    }

    #[test]
    fn test_full_space() {
        let info = calculate_ipv6("::", "0").unwrap();
        assert_eq!(info.address_category, Ipv6Category::Unspecified);
        assert_eq!(info.network_address, "::/0");
        assert!(info.total_addresses.exact().is_none());
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(calculate_ipv6("2001:db8::1::2", "64").is_none());
        assert!(calculate_ipv6("2001:db8::1", "129").is_none());
        assert!(calculate_ipv6("2001:db8::xyz", "64").is_none());
        assert!(calculate_ipv6("2001:db8:0:0:0:0:0:0:1", "64").is_none());
        assert!(calculate_ipv6("", "64").is_none());
        assert!(calculate_ipv6("::1", "").is_none());
    }
}
