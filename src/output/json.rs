//! JSON output.

use crate::models::SubnetResult;
use serde::Serialize;
use std::error::Error;

/// Pretty JSON for any serialisable value.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, Box<dyn Error>> {
    serde_json::to_string_pretty(value).map_err(|e| format!("Error serializing JSON: {e}").into())
}

/// Print a result as pretty JSON to stdout.
pub fn print_json(result: &SubnetResult) -> Result<(), Box<dyn Error>> {
    println!("{}", to_json(result)?);
    Ok(())
}
