//! Output formatting for calculator results.
//!
//! This module handles formatting and outputting results:
//! - [`terminal`] - Terminal output with colors
//! - [`report`] - Plain text block for copy/paste
//! - [`csv`] - CSV listing of subnet addresses
//! - [`json`] - JSON rendering

mod csv;
mod json;
mod report;
mod terminal;

pub use csv::{batch_csv_rows, host_csv_rows, print_hosts_csv};
pub use json::{print_json, to_json};
pub use report::{ipv4_fields, ipv6_fields, render_report};
pub use terminal::{format_field, format_line, print_result};
