use colored::Colorize;

use crate::api::Tcat;
use crate::cli::args::OutputFormat;
use crate::error::Result;

/// Handle the ping command
///
/// Connecting already performed the handshake, so this only reports it.
pub fn ping(tcat: &Tcat, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(format!(
            "{} Connected to {}",
            "✓".green(),
            tcat.endpoint()
        )),
        OutputFormat::Json => {
            let result = serde_json::json!({
                "success": true,
                "endpoint": tcat.endpoint().as_str(),
            });
            Ok(serde_json::to_string_pretty(&result)?)
        }
    }
}
