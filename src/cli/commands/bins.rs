use crate::api::Tcat;
use crate::cli::args::{BinsArgs, OutputFormat};
use crate::error::Result;
use crate::output;

/// Handle the bins command
pub fn bins(tcat: &mut Tcat, args: &BinsArgs, format: OutputFormat) -> Result<String> {
    let names: Vec<String> = match args.filter {
        Some(ref filter) => {
            let filter_lower = filter.to_lowercase();
            tcat.bins(false)?
                .iter()
                .filter(|name| name.to_lowercase().contains(&filter_lower))
                .cloned()
                .collect()
        }
        None => tcat.bins(false)?.to_vec(),
    };

    if !args.details {
        return output::format_bin_names(&names, format);
    }

    let mut bins = Vec::with_capacity(names.len());
    for name in &names {
        bins.push(tcat.get_bin(name, false)?.clone());
    }

    output::format_bins(&bins, format)
}
