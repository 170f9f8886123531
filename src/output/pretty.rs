use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::api::QueryBin;

/// Safely truncate a string to n characters, appending "..." if truncated.
/// Works correctly with multi-byte UTF-8 characters.
fn truncate_str(s: &str, max_chars: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() > max_chars {
        let truncated: String = chars.iter().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

fn format_time(time: Option<&DateTime<Utc>>) -> String {
    time.map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn format_period(bin: &QueryBin) -> String {
    match bin.period() {
        Some(d) => {
            let days = d.num_days();
            if days > 0 {
                format!("{}d {}h", days, d.num_hours() % 24)
            } else {
                format!("{}h {}m", d.num_hours(), d.num_minutes() % 60)
            }
        }
        None => "-".to_string(),
    }
}

/// Format a list of bin names for pretty output
pub fn format_bin_names(names: &[String]) -> String {
    if names.is_empty() {
        return "No bins found.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{} ({})\n", "Bins".bold(), names.len()));
    output.push_str(&"─".repeat(40));
    output.push('\n');

    for name in names {
        output.push_str(name);
        output.push('\n');
    }

    output.trim_end().to_string()
}

/// Format a list of bins for pretty output
pub fn format_bins(bins: &[QueryBin]) -> String {
    if bins.is_empty() {
        return "No bins found.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{}\n", "Bins".bold()));
    output.push_str(&"─".repeat(80));
    output.push('\n');

    for bin in bins {
        let status = if bin.active {
            bin.status_display().green()
        } else {
            bin.status_display().dimmed()
        };

        output.push_str(&format!(
            "{:30} {:10} {:8} {:>12} tweets\n",
            truncate_str(&bin.bin, 30).bold(),
            status,
            bin.bin_type,
            bin.notweets
        ));
        output.push_str(&format!(
            "  {} {} → {}\n",
            "Period:".cyan(),
            format_time(bin.mintime.as_ref()),
            format_time(bin.maxtime.as_ref())
        ));

        if !bin.comments.is_empty() {
            output.push_str(&format!("  {}\n", truncate_str(&bin.comments, 70).dimmed()));
        }
    }

    output.trim_end().to_string()
}

/// Format a single bin for pretty output
pub fn format_bin(bin: &QueryBin) -> String {
    let mut output = String::new();

    let status_upper = bin.status_display().to_uppercase();
    let status_colored = if bin.active {
        status_upper.green().bold()
    } else {
        status_upper.dimmed()
    };

    output.push_str(&format!("{} [{}]\n", bin.bin.bold(), status_colored));
    output.push_str(&"─".repeat(60));
    output.push('\n');

    output.push_str(&format!("{} {}\n", "Type:".cyan(), bin.bin_type));
    output.push_str(&format!("{} {}\n", "Tweets:".cyan(), bin.notweets));
    output.push_str(&format!("{} {}\n", "Hashtags:".cyan(), bin.nohashtags));
    output.push_str(&format!("{} {}\n", "Mentions:".cyan(), bin.nomentions));

    if !bin.comments.is_empty() {
        output.push_str(&format!("{} {}\n", "Comments:".cyan(), bin.comments));
    }

    output.push_str(&format!("\n{} {}\n", "First tweet:".cyan(), format_time(bin.mintime.as_ref())));
    output.push_str(&format!("{} {}\n", "Last tweet:".cyan(), format_time(bin.maxtime.as_ref())));
    output.push_str(&format!("{} {}\n", "Period:".cyan(), format_period(bin)));

    let keywords: Vec<&str> = bin
        .keywords
        .iter()
        .map(String::as_str)
        .filter(|k| !k.is_empty())
        .collect();
    if !keywords.is_empty() {
        output.push_str(&format!("\n{} ({})\n", "Keywords".cyan(), keywords.len()));
        for keyword in keywords {
            output.push_str(&format!("  {}\n", keyword));
        }
    }

    output.trim_end().to_string()
}
