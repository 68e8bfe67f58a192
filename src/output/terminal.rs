//! Terminal output.
//!
//! Prints a result as labelled, colour-highlighted lines.

use super::report::{ipv4_fields, ipv6_fields};
use crate::models::{group_digits, HostList, SubnetResult};
use colored::Colorize;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// Render one `label: value` line with the label padded to `width`.
pub fn format_line(label: &str, value: &str, width: usize) -> String {
    let label = format!("{label}:");
    format!("{label:<width$} {}", value.bold())
}

/// Print a result to stdout.
pub fn print_result(result: &SubnetResult, show_hosts: bool) {
    let (title, fields) = match result {
        SubnetResult::Ipv4(info) => ("IPv4 subnet", ipv4_fields(info)),
        SubnetResult::Ipv6(info) => ("IPv6 subnet", ipv6_fields(info)),
        SubnetResult::Invalid => {
            println!("{}", "Invalid input: check the address and mask".on_red());
            return;
        }
    };

    println!("{}", title.on_blue());
    for (label, value) in &fields {
        println!("{}", format_line(label, value, 18));
    }

    if let (true, Some(info)) = (show_hosts, result.ipv4()) {
        match &info.hosts {
            HostList::Listed { addresses } => {
                println!("{}", format!("Addresses ({})", addresses.len()).on_blue());
                for addr in addresses {
                    println!("  {addr}");
                }
            }
            HostList::Omitted { count, limit } => {
                println!(
                    "#{}# {} addresses not listed, display limit is {}",
                    "NOTE".on_red(),
                    group_digits(u128::from(*count)),
                    group_digits(u128::from(*limit))
                );
            }
        }
    }
}
