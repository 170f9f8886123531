use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Inspect the query bins of a DMI-TCAT instance
#[derive(Parser)]
#[command(name = "tcat")]
#[command(version, propagate_version = true)]
#[command(about = "Inspect the query bins of a DMI-TCAT instance")]
pub struct Cli {
    /// Output format for command results [default: output.format from config, else pretty]
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Base URL of the TCAT deployment (overrides config)
    #[arg(long, env = "TCAT_URL", global = true)]
    pub url: Option<String>,

    /// Username for basic auth (overrides config)
    #[arg(long, env = "TCAT_USERNAME", global = true)]
    pub username: Option<String>,

    /// Password for basic auth (overrides config)
    #[arg(long, env = "TCAT_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Print shell completions to stdout
    pub fn print_completions(shell: Shell) {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
    }

    /// The `--output` flag, falling back to the configured default
    pub fn output_format(&self, config: &Config) -> OutputFormat {
        self.output.unwrap_or_else(|| {
            OutputFormat::from_str(&config.output.format, true).unwrap_or_default()
        })
    }
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored, human-readable output
    #[default]
    Pretty,
    /// JSON output for scripting
    Json,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Check connectivity and credentials
    Ping,

    /// List the query bins of the instance
    #[command(alias = "ls")]
    Bins(BinsArgs),

    /// Show metadata for one query bin
    #[command(alias = "show")]
    Bin(BinArgs),

    /// Manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the bins command
#[derive(Args)]
pub struct BinsArgs {
    /// Load and show every bin's metadata
    #[arg(short, long)]
    pub details: bool,

    /// Only show bins whose name contains this text
    #[arg(short, long)]
    pub filter: Option<String>,
}

/// Arguments for the bin command
#[derive(Args)]
pub struct BinArgs {
    /// Bin name
    pub name: String,
}

/// Arguments for the config command
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (e.g., instance.url)
        key: String,
        /// Value to set
        value: String,
    },
    /// Show configuration file path
    Path,
    /// Initialize configuration interactively
    Init,
}

/// Arguments for the completions command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
