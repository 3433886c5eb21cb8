//! Message template CLI commands

use clap::Subcommand;

use crate::display::{format_template_details, format_template_list, format_variables};
use crate::error::EmDiaResult;
use crate::models::{BillingId, TemplateUpdate};
use crate::services::TemplateService;
use crate::session::Session;
use crate::templates::{PlaceholderPolicy, TemplateValues};

/// Message template subcommands
#[derive(Subcommand, Debug)]
pub enum MessageCommands {
    /// List message templates
    #[command(alias = "ls")]
    List,
    /// Show a template and its placeholders
    Show {
        /// Template ID or name
        template: String,
    },
    /// Save a new template
    Add {
        /// Template name
        name: String,
        /// Body; use {nome}, {valor}, {vencimento}, {imovel} or {link_pix}
        body: String,
    },
    /// Edit a template
    Edit {
        /// Template ID or name
        template: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        body: Option<String>,
    },
    /// Remove a template
    #[command(alias = "rm")]
    Delete {
        /// Template ID or name
        template: String,
    },
    /// Render a template as it would be sent
    Render {
        /// Template ID or name
        template: String,
        /// Fill placeholders from this billing record
        #[arg(short = 'b', long)]
        billing: Option<BillingId>,
        /// Extra values as key=value (repeatable)
        #[arg(long = "set", value_parser = parse_key_value)]
        values: Vec<(String, String)>,
        /// Fail on placeholders left without a value
        #[arg(long)]
        strict: bool,
    },
    /// List the standard placeholders
    Variables,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err("placeholder name cannot be empty".to_string());
    }
    Ok((key.to_string(), value.to_string()))
}

/// Handle a message template command
pub fn handle_message_command(session: &mut Session, cmd: MessageCommands) -> EmDiaResult<()> {
    let configured_policy = session.settings.templates.unresolved;
    let mut service = TemplateService::new(session);

    match cmd {
        MessageCommands::List => {
            let templates = service.list();
            println!("{}", format_template_list(templates));
        }

        MessageCommands::Show { template } => {
            print!("{}", format_template_details(service.require(&template)?));
        }

        MessageCommands::Add { name, body } => {
            let template = service.create(&name, &body)?;
            println!("Saved template '{}' ({})", template.name, template.id);
        }

        MessageCommands::Edit {
            template,
            name,
            body,
        } => {
            let id = service.require(&template)?.id;
            let updated = service.update(id, &TemplateUpdate { name, body })?;
            print!("{}", format_template_details(&updated));
        }

        MessageCommands::Delete { template } => {
            let id = service.require(&template)?.id;
            let removed = service.delete(id)?;
            println!("Removed template '{}'", removed.name);
        }

        MessageCommands::Render {
            template,
            billing,
            values,
            strict,
        } => {
            let overrides: TemplateValues = values.into_iter().collect();
            let policy = if strict {
                PlaceholderPolicy::Reject
            } else {
                configured_policy
            };
            let text = service.render(&template, billing, &overrides, policy)?;
            println!("{}", text);
        }

        MessageCommands::Variables => {
            print!("{}", format_variables(service.variables()));
        }
    }

    Ok(())
}

