use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use emdia_cli::cli::{run_command, CliContext, Commands};
use emdia_cli::config::{EmDiaPaths, Settings};
use emdia_cli::session::Session;
use emdia_cli::storage::Storage;

#[derive(Parser)]
#[command(
    name = "emdia",
    version,
    about = "Terminal-based rental property management",
    long_about = "EmDia keeps track of rental properties, tenants and monthly rent \
                  charges. It sorts the billing ledger into paid, pending, overdue \
                  and scheduled charges, and renders message templates into \
                  (simulated) WhatsApp reminders with PIX payment links."
)]
struct Cli {
    /// Settings file (JSON or YAML)
    #[arg(long, global = true, env = "EMDIA_CONFIG")]
    config: Option<PathBuf>,

    /// Seed the session from a JSON or YAML snapshot instead of the demo data
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Date to compute reminders and the dashboard for (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_tracing(verbose: u8, settings: &Settings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match verbose {
            0 => settings.log_level.as_str(),
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        EnvFilter::new(level)
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let mut paths = EmDiaPaths::new()?;
    if let Some(config) = &cli.config {
        paths = paths.with_config_file(config);
    }
    let settings = Settings::load_or_create(&paths)?;

    init_tracing(cli.verbose, &settings);
    debug!(settings = %paths.settings_file().display(), "Configuration resolved");

    let Some(command) = cli.command else {
        println!("EmDia - Rental property management");
        println!();
        println!("Run 'emdia --help' for usage information.");
        println!("Run 'emdia shell' to work interactively.");
        return Ok(());
    };

    let storage = match &cli.data {
        Some(path) => Storage::load(path)?,
        None => Storage::seeded(),
    };
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

    let mut session = Session::new(storage, settings, today);
    let ctx = CliContext {
        paths,
        data_file: cli.data,
    };

    run_command(&mut session, &ctx, command)?;

    Ok(())
}
