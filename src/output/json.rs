use serde::Serialize;

use crate::api::QueryBin;
use crate::error::Result;

/// Format bins as JSON
pub fn format_bins(bins: &[QueryBin]) -> Result<String> {
    Ok(serde_json::to_string_pretty(bins)?)
}

/// Format a single bin as JSON
pub fn format_bin(bin: &QueryBin) -> Result<String> {
    Ok(serde_json::to_string_pretty(bin)?)
}

/// Format any serializable value as JSON
pub fn format_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
