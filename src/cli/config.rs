//! Config CLI commands

use clap::Subcommand;

use super::CliContext;
use crate::config::Settings;
use crate::error::{EmDiaError, EmDiaResult};
use crate::session::Session;

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a settings file with the default values
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
    /// Show the resolved paths and key settings
    Show,
}

/// Handle a config command
pub fn handle_config_command(
    session: &Session,
    ctx: &CliContext,
    cmd: ConfigCommands,
) -> EmDiaResult<()> {
    let settings_file = ctx.paths.settings_file();

    match cmd {
        ConfigCommands::Init { force } => {
            if ctx.paths.is_initialized() && !force {
                return Err(EmDiaError::Config(format!(
                    "Settings file already exists at {} (use --force to overwrite)",
                    settings_file.display()
                )));
            }

            Settings::default().save(&ctx.paths)?;
            println!("Wrote default settings to {}", settings_file.display());
            println!();
            println!("Edit the file, or try values first with 'emdia settings set <key> <value>'.");
        }

        ConfigCommands::Show => {
            let settings = &session.settings;
            let status = if ctx.paths.is_initialized() {
                "loaded"
            } else {
                "not found, using defaults"
            };

            println!("EmDia Configuration");
            println!("===================");
            println!("Config directory: {}", ctx.paths.base_dir().display());
            println!("Settings file:    {} ({})", settings_file.display(), status);
            match &ctx.data_file {
                Some(path) => println!("Data:             {}", path.display()),
                None => println!("Data:             demo data"),
            }
            println!();
            println!("Settings:");
            println!("  Company:          {}", settings.general.company_name);
            println!("  Reminder lead:    {} days", settings.notifications.days_before_due);
            println!("  Late notices on:  {:?}", settings.notifications.late_notice_days);
            println!(
                "  PIX key:          {} ({})",
                settings.payment.pix_key, settings.payment.pix_key_type
            );
            println!("  WhatsApp:         {}", on_off(settings.whatsapp.use_whatsapp));
            println!("  Placeholders:     {}", settings.templates.unresolved);
            println!("  Log level:        {}", settings.log_level);
        }
    }

    Ok(())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "enabled"
    } else {
        "disabled"
    }
}
