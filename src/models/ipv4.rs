//! IPv4 address and CIDR notation utilities.
//!
//! Provides [`Ipv4`] struct for representing IPv4 addresses with subnet masks,
//! along with the parsing and mask helpers the subnet calculator builds on.

use regex::Regex;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::OnceLock;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Regex for four dot separated decimal octets.
static DOTTED_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_dotted_regex() -> &'static Regex {
    DOTTED_REGEX.get_or_init(|| {
        Regex::new(r"^([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})$")
            .expect("Invalid Regex")
    })
}

/// Parse a dotted-decimal string into an address.
///
/// Leading zeros are read as decimal (`010` is 10), every octet must be in 0-255.
///
/// # Examples
/// ```
/// use ip_subnet_calc::models::parse_dotted;
/// assert_eq!(parse_dotted("192.168.1.1").unwrap().octets(), [192, 168, 1, 1]);
/// assert!(parse_dotted("192.168.1.256").is_err());
/// ```
pub fn parse_dotted(input: &str) -> Result<Ipv4Addr, Box<dyn Error>> {
    let input = input.trim();
    let caps = get_dotted_regex()
        .captures(input)
        .ok_or_else(|| format!("Invalid dotted address {input:?}"))?;

    let mut octets = [0u8; 4];
    for (i, octet) in octets.iter_mut().enumerate() {
        let part = &caps[i + 1];
        *octet = part
            .parse::<u8>()
            .map_err(|_| format!("Octet {part} out of range in {input}"))?;
    }
    Ok(Ipv4Addr::from(octets))
}

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use ip_subnet_calc::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, Box<dyn Error>> {
    match len {
        // a shift by 32 would overflow
        0 => Ok(0),
        1..=MAX_LENGTH => Ok(u32::MAX << (MAX_LENGTH - len)),
        _ => Err("Network length is too long".into()),
    }
}

/// Convert a subnet mask to its prefix length.
///
/// Fails unless the mask is a contiguous run of high-order one bits.
pub fn mask_to_cidr(mask: u32) -> Result<u8, Box<dyn Error>> {
    let host_span = u64::from(!mask) + 1;
    if !host_span.is_power_of_two() {
        return Err(format!("Mask {} is not contiguous", Ipv4Addr::from(mask)).into());
    }
    Ok(mask.leading_ones() as u8)
}

/// Parse a CIDR prefix length such as `24` or `/24`.
pub fn parse_cidr_len(input: &str) -> Result<u8, Box<dyn Error>> {
    let input = input.trim();
    let digits = input.strip_prefix('/').unwrap_or(input);
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("Invalid prefix length {input:?}").into());
    }
    let len: u8 = digits
        .parse()
        .map_err(|_| format!("Invalid prefix length {input:?}"))?;
    if len > MAX_LENGTH {
        return Err("Network length is too long".into());
    }
    Ok(len)
}

/// Parse a dotted-decimal subnet mask into (mask, prefix length).
pub fn parse_dotted_mask(input: &str) -> Result<(u32, u8), Box<dyn Error>> {
    let mask = u32::from(parse_dotted(input)?);
    let len = mask_to_cidr(mask)?;
    Ok((mask, len))
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from(u32::from(addr) & mask))
}

/// Calculate the broadcast address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    let mask = get_cidr_mask(len)?;
    if len == MAX_LENGTH {
        // host route
        return Ok(addr);
    }
    let network_bits = u32::from(addr) & mask;
    Ok(Ipv4Addr::from(network_bits | !mask))
}

/// How the mask text of a request is interpreted.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MaskMode {
    /// Prefix length, e.g. `24`.
    #[default]
    Cidr,
    /// Dotted-decimal subnet mask, e.g. `255.255.255.0`.
    Dotted,
}

impl MaskMode {
    /// Guess the mode from the mask text.
    pub fn detect(mask: &str) -> MaskMode {
        if mask.contains('.') {
            MaskMode::Dotted
        } else {
            MaskMode::Cidr
        }
    }

    /// The other mode.
    pub fn toggled(self) -> MaskMode {
        match self {
            MaskMode::Cidr => MaskMode::Dotted,
            MaskMode::Dotted => MaskMode::Cidr,
        }
    }

    /// Resolve mask text to (mask, prefix length) under this mode.
    pub fn resolve(self, mask: &str) -> Result<(u32, u8), Box<dyn Error>> {
        match self {
            MaskMode::Cidr => {
                let len = parse_cidr_len(mask)?;
                Ok((get_cidr_mask(len)?, len))
            }
            MaskMode::Dotted => parse_dotted_mask(mask),
        }
    }
}

impl fmt::Display for MaskMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaskMode::Cidr => write!(f, "cidr"),
            MaskMode::Dotted => write!(f, "dotted"),
        }
    }
}

impl FromStr for MaskMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cidr" | "prefix" => Ok(MaskMode::Cidr),
            "dotted" | "mask" => Ok(MaskMode::Dotted),
            other => Err(format!("unknown mask mode {other:?}")),
        }
    }
}

/// IPv4 address with CIDR notation support.
#[derive(Eq, Ord, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    /// The IPv4 address as entered (host bits kept).
    pub addr: Ipv4Addr,
    /// The subnet mask length (0-32).
    pub mask: u8,
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Ipv4 {
    fn deserialize<D>(deserializer: D) -> Result<Ipv4, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv4::new(&s).map_err(|e| de::Error::custom(format!("invalid CIDR {s:?}: {e}")))
    }
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g., "10.0.0.0/24").
    pub fn new(addr_cidr: &str) -> Result<Ipv4, Box<dyn Error>> {
        let (addr, mask) = addr_cidr
            .trim()
            .split_once('/')
            .ok_or("Invalid address/mask")?;
        Ipv4::from_parts(addr, mask, MaskMode::Cidr)
    }

    /// Create a new [`Ipv4`] from separate address and mask text.
    pub fn from_parts(addr: &str, mask: &str, mode: MaskMode) -> Result<Ipv4, Box<dyn Error>> {
        let addr = parse_dotted(addr)?;
        let (_, mask) = mode.resolve(mask)?;
        Ok(Ipv4 { addr, mask })
    }

    /// Subnet mask as u32.
    pub fn netmask_bits(&self) -> u32 {
        get_cidr_mask(self.mask).unwrap_or(u32::MAX)
    }

    /// Subnet mask in dotted form.
    pub fn netmask(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.netmask_bits())
    }

    /// Wildcard (inverse) mask.
    pub fn wildcard(&self) -> Ipv4Addr {
        Ipv4Addr::from(!self.netmask_bits())
    }

    /// Get the lowest (network) address in the subnet.
    pub fn lo(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) & self.netmask_bits())
    }

    /// Get the highest (broadcast) address in the subnet.
    pub fn hi(&self) -> Ipv4Addr {
        if self.mask >= MAX_LENGTH {
            return self.lo();
        }
        Ipv4Addr::from(u32::from(self.lo()) | !self.netmask_bits())
    }

    /// Number of addresses in the subnet, network and broadcast included.
    pub fn size(&self) -> u64 {
        1u64 << (MAX_LENGTH - self.mask.min(MAX_LENGTH))
    }
}

impl fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

impl PartialEq for Ipv4 {
    fn eq(&self, other: &Ipv4) -> bool {
        self.addr == other.addr && self.mask == other.mask
    }
}

impl PartialOrd for Ipv4 {
    fn partial_cmp(&self, other: &Ipv4) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
