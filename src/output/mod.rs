pub mod json;
pub mod pretty;

use crate::api::QueryBin;
use crate::cli::OutputFormat;
use crate::error::Result;

/// Format a list of bin names based on output format
pub fn format_bin_names(names: &[String], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_bin_names(names)),
        OutputFormat::Json => json::format_json(&names),
    }
}

/// Format a list of bins based on output format
pub fn format_bins(bins: &[QueryBin], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_bins(bins)),
        OutputFormat::Json => json::format_bins(bins),
    }
}

/// Format a single bin based on output format
pub fn format_bin(bin: &QueryBin, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_bin(bin)),
        OutputFormat::Json => json::format_bin(bin),
    }
}
