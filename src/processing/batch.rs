//! Batch calculation from a JSON request file.

use super::request::SubnetRequest;
use crate::models::SubnetResult;
use std::error::Error;
use std::path::Path;

/// Parse a JSON array of requests, reporting the JSON path of any error.
pub fn parse_batch(json: &str) -> Result<Vec<SubnetRequest>, Box<dyn Error>> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let requests: Vec<SubnetRequest> = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| format!("Error parsing batch JSON: path={} error={}", e.path(), e))?;
    Ok(requests)
}

/// Read a JSON array of requests from a file.
///
/// # Arguments
/// * `batch_file` - Path of the file to read
///
/// # Returns
/// * `Ok(Vec<SubnetRequest>)` - The requests in file order
/// * `Err` - If the file is missing or is not a valid request list
pub fn read_batch_file(batch_file: &str) -> Result<Vec<SubnetRequest>, Box<dyn Error>> {
    if !Path::new(batch_file).exists() {
        return Err(format!("Batch file does not exist: {batch_file}").into());
    }
    log::info!("Reading batch file: {batch_file}");
    let json = std::fs::read_to_string(batch_file)
        .map_err(|e| format!("Error reading batch file {batch_file}: {e}"))?;
    let requests = parse_batch(&json)?;
    log::info!("Got {} request(s) from {batch_file}", requests.len());
    Ok(requests)
}

/// Calculate every request, keeping the request alongside its result.
pub fn run_batch(
    requests: Vec<SubnetRequest>,
    host_limit: u64,
) -> Vec<(SubnetRequest, SubnetResult)> {
    requests
        .into_iter()
        .map(|req| {
            let result = req.calculate(host_limit);
            if result.is_invalid() {
                log::warn!("Invalid request: {req}");
            }
            (req, result)
        })
        .collect()
}
