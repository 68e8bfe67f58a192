//! CSV output of the enumerated address list.

use super::terminal::format_field;
use crate::models::{HostList, Ipv4SubnetInfo, SubnetResult};
use crate::processing::SubnetRequest;
use std::error::Error;

const CNT_WIDTH: usize = 6;
const ADDRESS_WIDTH: usize = 17;
const ROLE_WIDTH: usize = 11;
const REQUEST_WIDTH: usize = 22;

fn host_header() -> String {
    format!(
        "{cnt},{address},{role}",
        cnt = format_field("cnt", CNT_WIDTH),
        address = format_field("address", ADDRESS_WIDTH),
        role = format_field("role", ROLE_WIDTH),
    )
}

fn address_rows(info: &Ipv4SubnetInfo) -> Result<Vec<String>, Box<dyn Error>> {
    let addresses = match &info.hosts {
        HostList::Listed { addresses } => addresses,
        HostList::Omitted { count, limit } => {
            return Err(format!("{count} addresses exceed the display limit of {limit}").into());
        }
    };

    let last = addresses.len().saturating_sub(1);
    let rows = addresses
        .iter()
        .enumerate()
        .map(|(i, addr)| {
            let role = match (i, info.cidr) {
                (_, 31..=32) => "host",
                (0, _) => "network",
                (i, _) if i == last => "broadcast",
                _ => "host",
            };
            format!(
                "{cnt},{address},{role}",
                cnt = format_field(i + 1, CNT_WIDTH),
                address = format_field(addr, ADDRESS_WIDTH),
                role = format_field(role, ROLE_WIDTH),
            )
        })
        .collect();
    Ok(rows)
}

/// Build the CSV rows (header first) for a subnet's address list.
///
/// Fails when the list was not materialised because it exceeds the limit.
pub fn host_csv_rows(info: &Ipv4SubnetInfo) -> Result<Vec<String>, Box<dyn Error>> {
    let mut rows = vec![host_header()];
    rows.extend(address_rows(info)?);
    Ok(rows)
}

/// Build one CSV table for a batch, each row prefixed with its request.
///
/// IPv6, invalid and over-limit entries are logged and skipped.
pub fn batch_csv_rows(results: &[(SubnetRequest, SubnetResult)]) -> Vec<String> {
    let mut rows = vec![format!(
        "{request},{header}",
        request = format_field("request", REQUEST_WIDTH),
        header = host_header()
    )];
    for (request, result) in results {
        let info = match result {
            SubnetResult::Ipv4(info) => info,
            SubnetResult::Ipv6(_) => {
                log::warn!("Skipping {request}: CSV output lists IPv4 addresses only");
                continue;
            }
            SubnetResult::Invalid => {
                log::warn!("Skipping {request}: invalid input");
                continue;
            }
        };
        match address_rows(info) {
            Ok(addresses) => {
                let prefix = format_field(request, REQUEST_WIDTH);
                rows.extend(addresses.into_iter().map(|row| format!("{prefix},{row}")));
            }
            Err(e) => log::warn!("Skipping {request}: {e}"),
        }
    }
    rows
}

/// Print the address list of a subnet as CSV to stdout.
pub fn print_hosts_csv(info: &Ipv4SubnetInfo) -> Result<(), Box<dyn Error>> {
    log::info!(
        "#Start print_hosts_csv() {}/{}",
        info.network_address,
        info.cidr
    );
    for row in host_csv_rows(info)? {
        println!("{row}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MaskMode;
    use crate::processing::{calculate_ipv4, run_batch};

    #[test]
    fn test_host_csv_rows() {
        let info = calculate_ipv4("192.168.7.1", "30", MaskMode::Cidr, 1000).unwrap();
        let rows = host_csv_rows(&info).unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], r#" "cnt",        "address",     "role""#);
        assert_eq!(
            rows[1],
            r#"   "1",    "192.168.7.0",  "network""#
        );
        assert_eq!(rows[0].len(), rows[1].len());
        assert!(rows[2].ends_with(r#""host""#));
        assert!(rows[4].ends_with(r#""broadcast""#));
    }

    #[test]
    fn test_host_csv_rows_point_to_point() {
        let info = calculate_ipv4("192.168.7.1", "31", MaskMode::Cidr, 1000).unwrap();
        let rows = host_csv_rows(&info).unwrap();
        assert!(rows[1..].iter().all(|r| r.ends_with(r#""host""#)));
    }

    #[test]
    fn test_host_csv_rows_over_limit() {
        let info = calculate_ipv4("10.0.0.0", "16", MaskMode::Cidr, 1000).unwrap();
        assert!(host_csv_rows(&info).is_err());
    }

    #[test]
    fn test_batch_csv_rows_skip_non_ipv4() {
        let requests = vec![
            SubnetRequest::parse("2001:db8::1/32"),
            SubnetRequest::parse("10.0.0.1/30"),
            SubnetRequest::parse("10.0.0.1"),
            SubnetRequest::parse("10.0.0.0/8"),
            SubnetRequest::parse("192.168.1.9/31"),
        ];
        let rows = batch_csv_rows(&run_batch(requests, 1000));
        // header + 4 rows for the /30 + 2 rows for the /31
        assert_eq!(rows.len(), 7);
        assert!(rows[0].starts_with(r#"             "request","#));
        assert!(rows[1].starts_with(r#"         "10.0.0.1/30","#));
        assert!(rows[1].ends_with(r#""network""#));
        assert!(rows[6].starts_with(r#"      "192.168.1.9/31","#));
        assert!(rows.iter().all(|r| !r.contains("2001:db8")));
    }
}
