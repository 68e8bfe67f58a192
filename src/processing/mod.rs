//! Subnet calculation logic.
//!
//! This module contains the calculators and the code that feeds them:
//! - [`ipv4_subnet`] - IPv4 network, broadcast, host range and classification
//! - [`ipv6_subnet`] - IPv6 network, expansion and categorisation
//! - [`hosts`] - bounded enumeration of IPv4 subnet addresses
//! - [`request`] - dispatch of a request to the right calculator
//! - [`batch`] - JSON batch files of requests

mod batch;
mod hosts;
mod ipv4_subnet;
mod ipv6_subnet;
mod request;

// Re-export public functions
pub use batch::{parse_batch, read_batch_file, run_batch};
pub use hosts::enumerate_hosts;
pub use ipv4_subnet::{calculate_ipv4, describe_ipv4};
pub use ipv6_subnet::{calculate_ipv6, describe_ipv6};
pub use request::{calculate, SubnetRequest};
