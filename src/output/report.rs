//! Plain-text rendering of a result, used for copy/paste.

use crate::models::{group_digits, HostList, Ipv4SubnetInfo, Ipv6SubnetInfo, SubnetResult};
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Width of the label column, colon included.
const LABEL_WIDTH: usize = 19;

/// Labelled values of an IPv4 descriptor, in display order.
pub fn ipv4_fields(info: &Ipv4SubnetInfo) -> Vec<(&'static str, String)> {
    vec![
        ("Network Address", info.network_address.to_string()),
        ("Broadcast Address", info.broadcast_address.to_string()),
        ("Subnet Mask", info.subnet_mask.to_string()),
        ("Wildcard Mask", info.wildcard_mask.to_string()),
        ("CIDR Notation", format!("/{}", info.cidr)),
        ("Total Hosts", group_digits(u128::from(info.total_hosts))),
        ("Usable Hosts", group_digits(u128::from(info.usable_hosts))),
        ("First Usable IP", info.first_usable_ip.to_string()),
        ("Last Usable IP", info.last_usable_ip.to_string()),
        ("IP Class", info.ip_class.to_string()),
        ("Private", if info.is_private { "Yes" } else { "No" }.to_string()),
        ("Address Type", info.address_type.to_string()),
    ]
}

/// Labelled values of an IPv6 descriptor, in display order.
pub fn ipv6_fields(info: &Ipv6SubnetInfo) -> Vec<(&'static str, String)> {
    vec![
        ("Network Address", info.network_address.clone()),
        ("Last Address", info.last_address.clone()),
        ("Prefix Length", format!("/{}", info.prefix_length)),
        ("Expanded Form", info.expanded_form.clone()),
        ("Address Category", info.address_category.to_string()),
        ("Total Addresses", info.total_addresses.to_string()),
    ]
}

fn push_fields(out: &mut String, fields: &[(&'static str, String)]) {
    for (label, value) in fields {
        let label = format!("{label}:");
        // writing to a String cannot fail
        let _ = writeln!(out, "{label:<width$}{value}", width = LABEL_WIDTH);
    }
}

fn push_hosts(out: &mut String, hosts: &HostList) {
    match hosts {
        HostList::Listed { addresses } => {
            let _ = writeln!(out, "\nAll Addresses ({}):", addresses.len());
            for addr in addresses {
                let _ = writeln!(out, "{addr}");
            }
        }
        HostList::Omitted { count, limit } => {
            let _ = writeln!(
                out,
                "\nAll Addresses: {} addresses, over the display limit of {}",
                group_digits(u128::from(*count)),
                group_digits(u128::from(*limit))
            );
        }
    }
}

/// Render a result as a human-readable text block.
///
/// The address list is appended only when `include_hosts` is set. A
/// `Generated:` line is written only when `generated` is given, so the
/// same result always renders to the same text otherwise.
pub fn render_report(
    result: &SubnetResult,
    include_hosts: bool,
    generated: Option<DateTime<Utc>>,
) -> String {
    let title = match result {
        SubnetResult::Ipv4(_) => "IPv4 Subnet Calculation",
        SubnetResult::Ipv6(_) => "IPv6 Subnet Calculation",
        SubnetResult::Invalid => return "Invalid input: check the address and mask\n".to_string(),
    };

    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    if let Some(at) = generated {
        let _ = writeln!(out, "Generated: {}", at.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    out.push('\n');

    match result {
        SubnetResult::Ipv4(info) => {
            push_fields(&mut out, &ipv4_fields(info));
            if include_hosts {
                push_hosts(&mut out, &info.hosts);
            }
        }
        SubnetResult::Ipv6(info) => push_fields(&mut out, &ipv6_fields(info)),
        SubnetResult::Invalid => {}
    }
    out
}
