//! IPv4/IPv6 subnet calculator.
//!
//! This crate provides:
//! - IPv4 subnet descriptors from an address plus prefix length or dotted mask
//! - IPv6 prefix descriptors with RFC 4291 expansion and RFC 5952 abbreviation
//! - A form view-model ([`Calculator`]) and text, CSV and JSON renderings
//!
//! # Architecture
//!
//! - [`config`] - Settings and constants
//! - [`models`] - Domain types (addresses, classes, descriptors)
//! - [`processing`] - The calculators and request handling
//! - [`output`] - Output formatting (terminal, copy text, CSV, JSON)

pub mod calculator;
pub mod config;
pub mod models;
pub mod output;
pub mod processing;

pub use calculator::Calculator;
pub use models::SubnetResult;
pub use processing::{calculate, calculate_ipv4, calculate_ipv6, SubnetRequest};
