use crate::api::Tcat;
use crate::cli::args::{BinArgs, OutputFormat};
use crate::error::Result;
use crate::output;

/// Handle the bin command
pub fn bin(tcat: &mut Tcat, args: &BinArgs, format: OutputFormat) -> Result<String> {
    let bin = tcat.get_bin(&args.name, false)?;
    output::format_bin(bin, format)
}
