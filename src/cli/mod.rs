//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod billing;
pub mod config;
pub mod dashboard;
pub mod export;
pub mod message;
pub mod property;
pub mod settings;
pub mod shell;
pub mod tenant;

use std::io;
use std::path::PathBuf;

use clap::Subcommand;

pub use billing::{handle_billing_command, BillingCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use dashboard::{handle_dashboard_command, DashboardArgs};
pub use export::{handle_export_command, ExportCommands};
pub use message::{handle_message_command, MessageCommands};
pub use property::{handle_property_command, PropertyCommands};
pub use settings::{handle_settings_command, SettingsCommands};
pub use shell::run_shell;
pub use tenant::{handle_tenant_command, TenantCommands};

use crate::config::EmDiaPaths;
use crate::error::EmDiaResult;
use crate::models::{Money, TenantStatus};
use crate::session::Session;

/// Top-level commands, shared by the binary and the shell
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the dashboard cards and recent payments
    #[command(alias = "home")]
    Dashboard(DashboardArgs),

    /// Property management commands
    #[command(subcommand, alias = "imovel")]
    Property(PropertyCommands),

    /// Tenant management commands
    #[command(subcommand, alias = "inquilino")]
    Tenant(TenantCommands),

    /// Billing ledger commands
    #[command(subcommand, alias = "cobranca")]
    Billing(BillingCommands),

    /// Message template commands
    #[command(subcommand, alias = "template")]
    Message(MessageCommands),

    /// Show or change settings for this session
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Export data as JSON, YAML or CSV
    #[command(subcommand)]
    Export(ExportCommands),

    /// Settings file and path commands
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Run commands interactively against one session
    Shell,
}

/// Process-level context the handlers need besides the session
#[derive(Debug, Clone)]
pub struct CliContext {
    pub paths: EmDiaPaths,
    /// Snapshot the session was seeded from, if any
    pub data_file: Option<PathBuf>,
}

/// Run one command, then print the notices it queued
pub fn run_command(session: &mut Session, ctx: &CliContext, command: Commands) -> EmDiaResult<()> {
    let result = match command {
        Commands::Dashboard(args) => handle_dashboard_command(session, args),
        Commands::Property(cmd) => handle_property_command(session, cmd),
        Commands::Tenant(cmd) => handle_tenant_command(session, cmd),
        Commands::Billing(cmd) => handle_billing_command(session, cmd),
        Commands::Message(cmd) => handle_message_command(session, cmd),
        Commands::Settings(cmd) => handle_settings_command(session, cmd),
        Commands::Export(cmd) => handle_export_command(session, cmd),
        Commands::Config(cmd) => handle_config_command(session, ctx, cmd),
        Commands::Shell => run_shell(session, ctx, io::stdin().lock()),
    };

    for notice in session.drain_notices() {
        println!("{}", notice);
    }

    result
}

/// Parse a pt-BR or plain amount for clap
pub(crate) fn parse_money(s: &str) -> Result<Money, String> {
    Money::parse(s).map_err(|e| e.to_string())
}

pub(crate) fn parse_tenant_status(s: &str) -> Result<TenantStatus, String> {
    TenantStatus::parse(s).ok_or_else(|| format!("invalid status '{}' (expected active or late)", s))
}
