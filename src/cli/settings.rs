//! Settings CLI commands
//!
//! `set` changes the running session only; the settings file is written by
//! `config init` and otherwise edited by hand.

use clap::Subcommand;

use crate::display::format_settings;
use crate::error::EmDiaResult;
use crate::services::SettingsService;
use crate::session::Session;

/// Settings subcommands
#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Show all settings, or one section
    Show {
        /// general, notifications, payment, whatsapp, display or templates
        section: Option<String>,
    },
    /// Change one setting for this session
    Set {
        /// Setting key as section.field (e.g. notifications.days_before_due)
        key: String,
        /// New value
        value: String,
    },
}

/// Handle a settings command
pub fn handle_settings_command(session: &mut Session, cmd: SettingsCommands) -> EmDiaResult<()> {
    let mut service = SettingsService::new(session);

    match cmd {
        SettingsCommands::Show { section } => {
            print!("{}", format_settings(service.show(), section.as_deref())?);
        }

        SettingsCommands::Set { key, value } => {
            let section = service.set(&key, &value)?;
            print!("{}", format_settings(service.show(), Some(section))?);
        }
    }

    Ok(())
}
