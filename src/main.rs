use clap::Parser;
use colored::{control::set_override, Colorize};
use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

use tcat::api::Tcat;
use tcat::cli::args::{Cli, Commands, CompletionsArgs};
use tcat::cli::commands;
use tcat::config::Config;
use tcat::error::TcatError;

fn main() {
    // Respect NO_COLOR environment variable (https://no-color.org/)
    // Also disable colors when stdout is not a terminal (for piping)
    if std::env::var("NO_COLOR").is_ok() || !std::io::stdout().is_terminal() {
        set_override(false);
    }

    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

/// Install the stderr log subscriber; `RUST_LOG` wins over `-v`
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "tcat=debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<(), TcatError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Handle completions command early (no config or connection needed)
    if let Commands::Completions(CompletionsArgs { shell }) = &cli.command {
        Cli::print_completions(*shell);
        return Ok(());
    }

    let mut config = Config::load()?;
    let format = cli.output_format(&config);

    let output = match &cli.command {
        Commands::Completions(_) => unreachable!(), // Handled above
        Commands::Config(args) => commands::config(&mut config, args, format)?,

        // Everything else talks to the instance
        _ => {
            config.apply_overrides(
                cli.url.as_deref(),
                cli.username.as_deref(),
                cli.password.as_deref(),
            );

            let load_bins = matches!(&cli.command, Commands::Bins(args) if args.details && args.filter.is_none());
            let mut tcat = Tcat::from_config(&config, load_bins)?;

            match &cli.command {
                Commands::Ping => commands::ping(&tcat, format)?,
                Commands::Bins(args) => commands::bins(&mut tcat, args, format)?,
                Commands::Bin(args) => commands::bin(&mut tcat, args, format)?,
                Commands::Config(_) | Commands::Completions(_) => unreachable!(),
            }
        }
    };

    if !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}
