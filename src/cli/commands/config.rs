use std::io::{self, Write};

use colored::Colorize;

use crate::cli::args::{ConfigArgs, ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::{Result, TcatError};

const MASKED: &str = "****";

/// Handle the config command
pub fn config(config: &mut Config, args: &ConfigArgs, format: OutputFormat) -> Result<String> {
    match &args.command {
        ConfigCommands::Show => config_show(config, format),
        ConfigCommands::Set { key, value } => config_set(config, key, value, format),
        ConfigCommands::Path => config_path(format),
        ConfigCommands::Init => config_init(config, format),
    }
}

/// Show current configuration
fn config_show(config: &Config, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => {
            let not_set = || "(not set)".dimmed().to_string();

            let mut output = String::new();
            output.push_str(&format!("{}\n", "Configuration".bold()));
            output.push_str(&"─".repeat(40));
            output.push('\n');

            output.push_str(&format!("\n{}\n", "[instance]".cyan()));
            output.push_str(&format!(
                "  url = {}\n",
                config.instance.url.clone().unwrap_or_else(not_set)
            ));
            output.push_str(&format!(
                "  username = {}\n",
                config.instance.username.clone().unwrap_or_else(not_set)
            ));
            output.push_str(&format!(
                "  password = {}\n",
                config
                    .instance
                    .password
                    .as_ref()
                    .map(|_| MASKED.to_string())
                    .unwrap_or_else(not_set)
            ));

            output.push_str(&format!("\n{}\n", "[client]".cyan()));
            output.push_str(&format!("  timeout_secs = {}\n", config.client.timeout_secs));

            output.push_str(&format!("\n{}\n", "[output]".cyan()));
            output.push_str(&format!("  format = {}\n", config.output.format));

            Ok(output)
        }
        OutputFormat::Json => {
            // Never print the password itself
            let mut safe_config = config.clone();
            if safe_config.instance.password.is_some() {
                safe_config.instance.password = Some(MASKED.to_string());
            }
            Ok(serde_json::to_string_pretty(&safe_config)?)
        }
    }
}

/// Set a configuration value
fn config_set(config: &mut Config, key: &str, value: &str, format: OutputFormat) -> Result<String> {
    config.set(key, value)?;
    config.save()?;

    let shown = if key == "instance.password" { MASKED } else { value };

    match format {
        OutputFormat::Pretty => Ok(format!("{} Set {} = {}", "✓".green(), key, shown)),
        OutputFormat::Json => {
            let result = serde_json::json!({
                "success": true,
                "key": key,
                "value": shown
            });
            Ok(serde_json::to_string_pretty(&result)?)
        }
    }
}

/// Show configuration file path
fn config_path(format: OutputFormat) -> Result<String> {
    let paths = Paths::new()?;

    match format {
        OutputFormat::Pretty => {
            let mut output = String::new();
            output.push_str(&format!("Config file: {}\n", paths.config_file.display()));
            output.push_str(&format!(
                "Exists: {}\n",
                if paths.config_exists() {
                    "yes".green()
                } else {
                    "no".yellow()
                }
            ));
            Ok(output)
        }
        OutputFormat::Json => {
            let result = serde_json::json!({
                "path": paths.config_file.display().to_string(),
                "exists": paths.config_exists()
            });
            Ok(serde_json::to_string_pretty(&result)?)
        }
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let line = line.trim().to_string();

    if line.is_empty() {
        return Err(TcatError::InvalidArgument(format!("{label} cannot be empty")));
    }
    Ok(line)
}

/// Initialize configuration interactively
fn config_init(config: &mut Config, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Err(TcatError::InvalidArgument(
            "config init requires interactive mode (--output pretty)".to_string(),
        ));
    }

    println!("{}", "TCAT Configuration".bold());
    println!("{}", "─".repeat(40));
    println!();

    let url = prompt("TCAT URL (e.g. https://tcat.example.org)")?;
    let username = prompt("Username")?;
    let password = rpassword::prompt_password("Password: ")?;
    if password.is_empty() {
        return Err(TcatError::InvalidArgument(
            "Password cannot be empty".to_string(),
        ));
    }

    config.apply_overrides(Some(&url), Some(&username), Some(&password));
    config.save()?;

    let paths = Paths::new()?;

    Ok(format!(
        "\n{} Configuration saved to: {}\n\nRun '{}' to check the connection.",
        "✓".green(),
        paths.config_file.display(),
        "tcat ping".cyan()
    ))
}
