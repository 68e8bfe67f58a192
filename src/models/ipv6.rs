//! IPv6 text handling and prefix arithmetic.
//!
//! Expansion and abbreviation are done by hand rather than through
//! [`Ipv6Addr`]'s `FromStr`/`Display`, which accept embedded IPv4 notation and
//! print IPv4-mapped addresses in dotted form.

use itertools::Itertools;
use regex::Regex;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt;
use std::net::Ipv6Addr;
use std::sync::OnceLock;

use super::count::AddressCount;

/// Maximum prefix length for IPv6 (128 bits).
pub const MAX_PREFIX: u8 = 128;

const GROUPS: usize = 8;

static HEX_COLON_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_hex_colon_regex() -> &'static Regex {
    HEX_COLON_REGEX.get_or_init(|| Regex::new(r"^[0-9a-fA-F:]+$").expect("Invalid Regex"))
}

/// Split one side of a `::` into its groups. Empty groups are an error.
fn split_groups(part: &str) -> Result<Vec<&str>, Box<dyn Error>> {
    if part.is_empty() {
        return Ok(Vec::new());
    }
    let groups: Vec<&str> = part.split(':').collect();
    if groups.iter().any(|g| g.is_empty()) {
        return Err(format!("Empty group in {part:?}").into());
    }
    Ok(groups)
}

/// Parse colon-hex text into an address.
///
/// At most one `::` is allowed and it stands for at least one zero group.
///
/// # Examples
/// ```
/// use ip_subnet_calc::models::parse_colon_hex;
/// assert_eq!(parse_colon_hex("::1").unwrap(), std::net::Ipv6Addr::LOCALHOST);
/// assert!(parse_colon_hex("1::2::3").is_err());
/// ```
pub fn parse_colon_hex(input: &str) -> Result<Ipv6Addr, Box<dyn Error>> {
    let input = input.trim();
    if !get_hex_colon_regex().is_match(input) {
        return Err(format!("Invalid characters in {input:?}").into());
    }

    let groups: Vec<&str> = match input.matches("::").count() {
        0 => {
            let groups = split_groups(input)?;
            if groups.len() != GROUPS {
                return Err(format!("Expected 8 groups, got {}", groups.len()).into());
            }
            groups
        }
        1 => {
            let (left, right) = input.split_once("::").ok_or("Missing ::")?;
            let left = split_groups(left)?;
            let right = split_groups(right)?;
            if left.len() + right.len() >= GROUPS {
                return Err(format!("No room for :: in {input:?}").into());
            }
            let missing = GROUPS - left.len() - right.len();
            log::trace!("expand {input:?}: {missing} zero group(s)");
            left.into_iter()
                .chain(std::iter::repeat("0").take(missing))
                .chain(right)
                .collect()
        }
        _ => return Err(format!("More than one :: in {input:?}").into()),
    };

    let mut segments = [0u16; GROUPS];
    for (segment, group) in segments.iter_mut().zip(groups) {
        if group.len() > 4 {
            return Err(format!("Group {group:?} longer than 4 digits").into());
        }
        *segment = u16::from_str_radix(group, 16)
            .map_err(|e| format!("Invalid group {group:?}: {e}"))?;
    }
    Ok(Ipv6Addr::from(segments))
}

/// Parse a prefix length such as `64` or `/64`.
pub fn parse_prefix(input: &str) -> Result<u8, Box<dyn Error>> {
    let input = input.trim();
    let digits = input.strip_prefix('/').unwrap_or(input);
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("Invalid prefix length {input:?}").into());
    }
    let len: u8 = digits
        .parse()
        .map_err(|_| format!("Invalid prefix length {input:?}"))?;
    if len > MAX_PREFIX {
        return Err("Prefix length is too long".into());
    }
    Ok(len)
}

/// Eight groups of four lowercase hex digits.
pub fn expanded(addr: Ipv6Addr) -> String {
    addr.segments().iter().map(|s| format!("{s:04x}")).join(":")
}

/// Shortest form: leading zeros stripped, longest zero run (2+ groups) as `::`.
///
/// Ties go to the first run.
pub fn abbreviated(addr: Ipv6Addr) -> String {
    let seg = addr.segments();

    let (mut best_start, mut best_len) = (0, 0);
    let mut i = 0;
    while i < GROUPS {
        if seg[i] != 0 {
            i += 1;
            continue;
        }
        let start = i;
        while i < GROUPS && seg[i] == 0 {
            i += 1;
        }
        if i - start > best_len {
            best_start = start;
            best_len = i - start;
        }
    }

    let hex = |groups: &[u16]| groups.iter().map(|g| format!("{g:x}")).join(":");
    if best_len < 2 {
        return hex(&seg[..]);
    }
    format!(
        "{}::{}",
        hex(&seg[..best_start]),
        hex(&seg[best_start + best_len..])
    )
}

/// Clear every bit past `prefix`.
pub fn network_addr(addr: Ipv6Addr, prefix: u8) -> Result<Ipv6Addr, Box<dyn Error>> {
    if prefix > MAX_PREFIX {
        return Err("Prefix length is too long".into());
    }
    let prefix = u32::from(prefix);
    let mut seg = addr.segments();
    for (i, group) in seg.iter_mut().enumerate() {
        let start = i as u32 * 16;
        if prefix >= start + 16 {
            continue;
        }
        if prefix <= start {
            *group = 0;
        } else {
            let keep = prefix - start;
            *group &= ((0xFFFFu32 << (16 - keep)) & 0xFFFF) as u16;
        }
    }
    Ok(Ipv6Addr::from(seg))
}

/// Set every bit past `prefix`.
pub fn last_addr(addr: Ipv6Addr, prefix: u8) -> Result<Ipv6Addr, Box<dyn Error>> {
    let network = u128::from(network_addr(addr, prefix)?);
    let host_bits = u128::MAX.checked_shr(u32::from(prefix)).unwrap_or(0);
    Ok(Ipv6Addr::from(network | host_bits))
}

/// IPv6 address with a prefix length.
#[derive(Eq, Ord, PartialEq, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Ipv6Prefix {
    /// The address as entered.
    pub addr: Ipv6Addr,
    /// Prefix length (0-128).
    pub prefix: u8,
}

impl Ipv6Prefix {
    /// Create from `addr/prefix` text.
    pub fn new(addr_prefix: &str) -> Result<Ipv6Prefix, Box<dyn Error>> {
        let (addr, prefix) = addr_prefix
            .trim()
            .split_once('/')
            .ok_or("Invalid address/prefix")?;
        Ipv6Prefix::from_parts(addr, prefix)
    }

    pub fn from_parts(addr: &str, prefix: &str) -> Result<Ipv6Prefix, Box<dyn Error>> {
        Ok(Ipv6Prefix {
            addr: parse_colon_hex(addr)?,
            prefix: parse_prefix(prefix)?,
        })
    }

    pub fn network(&self) -> Ipv6Addr {
        network_addr(self.addr, self.prefix.min(MAX_PREFIX)).unwrap_or(self.addr)
    }

    pub fn last(&self) -> Ipv6Addr {
        last_addr(self.addr, self.prefix.min(MAX_PREFIX)).unwrap_or(self.addr)
    }

    /// Number of addresses covered by the prefix.
    pub fn size(&self) -> AddressCount {
        AddressCount::power_of_two(u32::from(MAX_PREFIX - self.prefix.min(MAX_PREFIX)))
    }
}

impl fmt::Display for Ipv6Prefix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", abbreviated(self.addr), self.prefix)
    }
}

impl Serialize for Ipv6Prefix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Ipv6Prefix {
    fn deserialize<D>(deserializer: D) -> Result<Ipv6Prefix, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv6Prefix::new(&s).map_err(|e| de::Error::custom(format!("invalid prefix {s:?}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> Ipv6Addr {
        parse_colon_hex(s).unwrap()
    }

    #[test]
    fn test_expand() {
        assert_eq!(
            expanded(addr("::")),
            "0000:0000:0000:0000:0000:0000:0000:0000"
        );
        assert_eq!(
            expanded(addr("::1")),
            "0000:0000:0000:0000:0000:0000:0000:0001"
        );
        assert_eq!(
            expanded(addr("2001:DB8::1")),
            "2001:0db8:0000:0000:0000:0000:0000:0001"
        );
        assert_eq!(
            expanded(addr("fe80::")),
            "fe80:0000:0000:0000:0000:0000:0000:0000"
        );
        assert_eq!(
            expanded(addr("1:2:3:4:5:6:7:8")),
            "0001:0002:0003:0004:0005:0006:0007:0008"
        );
        assert_eq!(
            expanded(addr("1:2:3::5:6:7:8")),
            "0001:0002:0003:0000:0005:0006:0007:0008"
        );
    }

    #[test]
    fn test_parse_rejects() {
        assert!(parse_colon_hex("").is_err());
        assert!(parse_colon_hex("2001:db8::g").is_err());
        assert!(parse_colon_hex("1::2::3").is_err());
        assert!(parse_colon_hex(":::").is_err());
        assert!(parse_colon_hex("1:::2").is_err());
        assert!(parse_colon_hex(":1::").is_err());
        assert!(parse_colon_hex("1:2:3:4:5:6:7:8::").is_err());
        assert!(parse_colon_hex("1:2:3:4::5:6:7:8").is_err());
        assert!(parse_colon_hex("1:2:3:4:5:6:7").is_err());
        assert!(parse_colon_hex("1:2:3:4:5:6:7:8:9").is_err());
        assert!(parse_colon_hex("12345::").is_err());
        assert!(parse_colon_hex("::ffff:1.2.3.4").is_err());
    }

    #[test]
    fn test_parse_prefix() {
        assert_eq!(parse_prefix("64").unwrap(), 64);
        assert_eq!(parse_prefix("/128").unwrap(), 128);
        assert!(parse_prefix("129").is_err());
        assert!(parse_prefix("x").is_err());
        assert!(parse_prefix("+64").is_err());
    }

    #[test]
    fn test_abbreviate() {
        assert_eq!(abbreviated(addr("::")), "::");
        assert_eq!(abbreviated(addr("::1")), "::1");
        assert_eq!(abbreviated(addr("1::")), "1::");
        assert_eq!(abbreviated(addr("2001:0db8:0000:0000:0000:0000:0000:0000")), "2001:db8::");
        assert_eq!(abbreviated(addr("2001:db8:0:1:0:0:0:1")), "2001:db8:0:1::1");
        // single zero group stays
        assert_eq!(abbreviated(addr("2001:db8:0:1:1:1:1:1")), "2001:db8:0:1:1:1:1:1");
        // equal runs: first wins
        assert_eq!(abbreviated(addr("1:0:0:2:3:0:0:4")), "1::2:3:0:0:4");
        // longer later run wins
        assert_eq!(abbreviated(addr("1:0:0:2:0:0:0:4")), "1:0:0:2::4");
    }

    #[test]
    fn test_abbreviate_idempotent() {
        for text in [
            "::",
            "::1",
            "fe80::1:0:0:1",
            "2001:db8:0:0:1:0:0:1",
            "ff02::2",
            "1:2:3:4:5:6:7:8",
            "0:0:1:0:0:0:1:0",
        ] {
            let once = abbreviated(addr(text));
            let twice = abbreviated(addr(&once));
            assert_eq!(once, twice, "input {text}");
        }
    }

    #[test]
    fn test_network_addr() {
        let a = addr("2001:db8:abcd:1234::1");
        assert_eq!(abbreviated(network_addr(a, 32).unwrap()), "2001:db8::");
        assert_eq!(abbreviated(network_addr(a, 48).unwrap()), "2001:db8:abcd::");
        assert_eq!(abbreviated(network_addr(a, 52).unwrap()), "2001:db8:abcd:1000::");
        assert_eq!(abbreviated(network_addr(a, 0).unwrap()), "::");
        assert_eq!(network_addr(a, 128).unwrap(), a);
        assert!(network_addr(a, 129).is_err());
    }

    #[test]
    fn test_last_addr() {
        let a = addr("2001:db8::1");
        assert_eq!(
            abbreviated(last_addr(a, 32).unwrap()),
            "2001:db8:ffff:ffff:ffff:ffff:ffff:ffff"
        );
        assert_eq!(last_addr(a, 128).unwrap(), a);
        assert_eq!(
            abbreviated(last_addr(a, 0).unwrap()),
            "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff"
        );
    }

    #[test]
    fn test_ipv6_prefix() {
        let p = Ipv6Prefix::new("2001:db8::1/32").unwrap();
        assert_eq!(p.to_string(), "2001:db8::1/32");
        assert_eq!(abbreviated(p.network()), "2001:db8::");
        assert_eq!(p.size(), AddressCount::Exact(1u128 << 96));
        assert!(Ipv6Prefix::new("2001:db8::1").is_err());
        assert!(Ipv6Prefix::new("2001:db8::1/129").is_err());

        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "\"2001:db8::1/32\"");
        assert_eq!(serde_json::from_str::<Ipv6Prefix>(&json).unwrap(), p);
    }
}
