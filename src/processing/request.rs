//! Request dispatch between the IPv4 and IPv6 calculators.

use super::ipv4_subnet::calculate_ipv4;
use super::ipv6_subnet::calculate_ipv6;
use crate::models::{MaskMode, SubnetResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One calculation request: an address plus its mask or prefix text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct SubnetRequest {
    pub address: String,
    /// Prefix length, or a dotted mask for IPv4.
    #[serde(default)]
    pub mask: String,
    /// Mask interpretation for IPv4; detected from the text when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<MaskMode>,
}

impl SubnetRequest {
    pub fn new(address: &str, mask: &str) -> SubnetRequest {
        SubnetRequest {
            address: address.trim().to_string(),
            mask: mask.trim().to_string(),
            mode: None,
        }
    }

    /// Split `address/mask` text. Without a `/` the mask is left empty.
    pub fn parse(input: &str) -> SubnetRequest {
        match input.trim().split_once('/') {
            Some((address, mask)) => SubnetRequest::new(address, mask),
            None => SubnetRequest::new(input, ""),
        }
    }

    pub fn with_mode(mut self, mode: MaskMode) -> SubnetRequest {
        self.mode = Some(mode);
        self
    }

    pub fn is_ipv6(&self) -> bool {
        self.address.contains(':')
    }

    pub fn calculate(&self, host_limit: u64) -> SubnetResult {
        calculate(&self.address, &self.mask, self.mode, host_limit)
    }
}

impl fmt::Display for SubnetRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mask.is_empty() {
            write!(f, "{}", self.address)
        } else {
            write!(f, "{}/{}", self.address, self.mask)
        }
    }
}

/// Route an address to the matching calculator.
///
/// Anything containing `:` is treated as IPv6 and `mask` as its prefix length.
pub fn calculate(
    address: &str,
    mask: &str,
    mode: Option<MaskMode>,
    host_limit: u64,
) -> SubnetResult {
    if address.contains(':') {
        return calculate_ipv6(address, mask).into();
    }
    let mode = mode.unwrap_or_else(|| MaskMode::detect(mask));
    calculate_ipv4(address, mask, mode, host_limit).into()
}
