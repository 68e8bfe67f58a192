//! Address classification.
//!
//! Classful and special-range labels for IPv4, category labels for IPv6.
//! All checks work on the address as entered, independent of any mask.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Classful network class of an IPv4 address, from its first octet.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Ipv4Class {
    A,
    B,
    C,
    #[serde(rename = "D (Multicast)")]
    D,
    #[serde(rename = "E (Reserved)")]
    E,
    /// 0.x.x.x
    Reserved,
    /// 127.x.x.x
    Loopback,
}

impl Ipv4Class {
    pub fn of(ip: Ipv4Addr) -> Ipv4Class {
        match ip.octets()[0] {
            0 => Ipv4Class::Reserved,
            1..=126 => Ipv4Class::A,
            127 => Ipv4Class::Loopback,
            128..=191 => Ipv4Class::B,
            192..=223 => Ipv4Class::C,
            224..=239 => Ipv4Class::D,
            240..=255 => Ipv4Class::E,
        }
    }
}

impl fmt::Display for Ipv4Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Ipv4Class::A => "A",
            Ipv4Class::B => "B",
            Ipv4Class::C => "C",
            Ipv4Class::D => "D (Multicast)",
            Ipv4Class::E => "E (Reserved)",
            Ipv4Class::Reserved => "Reserved",
            Ipv4Class::Loopback => "Loopback",
        };
        f.write_str(label)
    }
}

/// True for the RFC 1918 ranges 10/8, 172.16/12 and 192.168/16.
pub fn is_rfc1918(ip: Ipv4Addr) -> bool {
    match ip.octets() {
        [10, ..] => true,
        [172, b, ..] => (16..=31).contains(&b),
        [192, 168, ..] => true,
        _ => false,
    }
}

/// Usage category of an IPv4 address.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AddressType {
    Private,
    #[serde(rename = "Link-local")]
    LinkLocal,
    Loopback,
    Multicast,
    Reserved,
    #[serde(rename = "This Network")]
    ThisNetwork,
    Public,
}

impl AddressType {
    pub fn of(ip: Ipv4Addr) -> AddressType {
        if is_rfc1918(ip) {
            return AddressType::Private;
        }
        match ip.octets() {
            [0, ..] => AddressType::ThisNetwork,
            [127, ..] => AddressType::Loopback,
            [169, 254, ..] => AddressType::LinkLocal,
            [224..=239, ..] => AddressType::Multicast,
            [240..=255, ..] => AddressType::Reserved,
            _ => AddressType::Public,
        }
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AddressType::Private => "Private",
            AddressType::LinkLocal => "Link-local",
            AddressType::Loopback => "Loopback",
            AddressType::Multicast => "Multicast",
            AddressType::Reserved => "Reserved",
            AddressType::ThisNetwork => "This Network",
            AddressType::Public => "Public",
        };
        f.write_str(label)
    }
}

/// Category of an IPv6 address.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Ipv6Category {
    Unspecified,
    Loopback,
    #[serde(rename = "Link-Local")]
    LinkLocal,
    #[serde(rename = "Unique Local")]
    UniqueLocal,
    Multicast,
    #[serde(rename = "6to4")]
    SixToFour,
    Teredo,
    Documentation,
    #[serde(rename = "Global Unicast")]
    GlobalUnicast,
    #[serde(rename = "Reserved or Special Use")]
    Reserved,
}

impl Ipv6Category {
    /// Classify an address. The first matching rule wins.
    pub fn of(ip: Ipv6Addr) -> Ipv6Category {
        let seg = ip.segments();
        let first_byte = seg[0] >> 8;

        if ip == Ipv6Addr::UNSPECIFIED {
            Ipv6Category::Unspecified
        } else if ip == Ipv6Addr::LOCALHOST {
            Ipv6Category::Loopback
        } else if seg[0] == 0xfe80 {
            Ipv6Category::LinkLocal
        } else if first_byte == 0xfc || first_byte == 0xfd {
            Ipv6Category::UniqueLocal
        } else if first_byte == 0xff {
            Ipv6Category::Multicast
        } else if seg[0] == 0x2002 {
            Ipv6Category::SixToFour
        } else if seg[0] == 0x2001 && seg[1] == 0x0000 {
            Ipv6Category::Teredo
        } else if seg[0] == 0x2001 && seg[1] == 0x0db8 {
            Ipv6Category::Documentation
        } else if matches!(seg[0] >> 12, 0x2 | 0x3) {
            Ipv6Category::GlobalUnicast
        } else {
            Ipv6Category::Reserved
        }
    }
}

impl fmt::Display for Ipv6Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Ipv6Category::Unspecified => "Unspecified",
            Ipv6Category::Loopback => "Loopback",
            Ipv6Category::LinkLocal => "Link-Local",
            Ipv6Category::UniqueLocal => "Unique Local",
            Ipv6Category::Multicast => "Multicast",
            Ipv6Category::SixToFour => "6to4",
            Ipv6Category::Teredo => "Teredo",
            Ipv6Category::Documentation => "Documentation",
            Ipv6Category::GlobalUnicast => "Global Unicast",
            Ipv6Category::Reserved => "Reserved or Special Use",
        };
        f.write_str(label)
    }
}

/// Example private networks offered as a starting point, one per class.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ClassSuggestion {
    A,
    B,
    C,
}

impl ClassSuggestion {
    /// Address and prefix pre-filled for this class.
    pub fn example(self) -> (&'static str, &'static str) {
        match self {
            ClassSuggestion::A => ("10.0.0.1", "8"),
            ClassSuggestion::B => ("172.16.0.1", "16"),
            ClassSuggestion::C => ("192.168.1.1", "24"),
        }
    }
}

impl FromStr for ClassSuggestion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(ClassSuggestion::A),
            "B" => Ok(ClassSuggestion::B),
            "C" => Ok(ClassSuggestion::C),
            other => Err(format!("no example network for class {other:?}")),
        }
    }
}
