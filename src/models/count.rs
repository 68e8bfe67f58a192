//! Address counts that may exceed any primitive integer.

use crate::config::EXACT_DISPLAY_BITS;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of addresses in a prefix.
///
/// Values up to 2^127 are held exactly; only the full IPv6 space (2^128)
/// falls back to a decimal mantissa and exponent.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AddressCount {
    Exact(u128),
    Approximate { mantissa: f64, exponent: i32 },
}

impl AddressCount {
    /// 2^bits.
    pub fn power_of_two(bits: u32) -> AddressCount {
        if bits < u128::BITS {
            return AddressCount::Exact(1u128 << bits);
        }
        let value = 2f64.powi(bits as i32);
        let exponent = value.log10().floor() as i32;
        AddressCount::Approximate {
            mantissa: value / 10f64.powi(exponent),
            exponent,
        }
    }

    /// The exact value, if it is known.
    pub fn exact(&self) -> Option<u128> {
        match self {
            AddressCount::Exact(n) => Some(*n),
            AddressCount::Approximate { .. } => None,
        }
    }
}

impl fmt::Display for AddressCount {
    /// Exact digits up to 2^32, scientific notation beyond.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            AddressCount::Exact(n) if n <= 1u128 << EXACT_DISPLAY_BITS => {
                f.write_str(&group_digits(n))
            }
            AddressCount::Exact(n) => write!(f, "{:.2e}", n as f64),
            AddressCount::Approximate { mantissa, exponent } => {
                write!(f, "{mantissa:.2}e{exponent}")
            }
        }
    }
}

/// Format an integer with `,` every three digits.
pub fn group_digits(n: u128) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
