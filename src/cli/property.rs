//! Property CLI commands

use clap::Subcommand;

use super::parse_money;
use crate::display::{format_property_details, format_property_list};
use crate::error::EmDiaResult;
use crate::models::{Money, PropertyUpdate};
use crate::services::PropertyService;
use crate::session::Session;

/// Property subcommands
#[derive(Subcommand, Debug)]
pub enum PropertyCommands {
    /// Register a new (vacant) property
    Add {
        /// Full address, e.g. "Rua das Flores, 123 - Centro"
        address: String,
        /// Property type (Apartamento, Casa, Kitnet...)
        #[arg(short = 't', long = "type")]
        kind: String,
        /// Number of rooms
        #[arg(short, long, default_value = "1")]
        rooms: u32,
        /// Monthly rent (e.g. 1.200,00)
        #[arg(long, value_parser = parse_money)]
        rent: Money,
    },
    /// List all properties
    #[command(alias = "ls")]
    List,
    /// Show property details
    Show {
        /// Property ID or address
        property: String,
    },
    /// Edit a property
    Edit {
        /// Property ID or address
        property: String,
        #[arg(long)]
        address: Option<String>,
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        #[arg(short, long)]
        rooms: Option<u32>,
        #[arg(long, value_parser = parse_money)]
        rent: Option<Money>,
    },
    /// Remove a property
    #[command(alias = "rm")]
    Delete {
        /// Property ID or address
        property: String,
    },
}

/// Handle a property command
pub fn handle_property_command(session: &mut Session, cmd: PropertyCommands) -> EmDiaResult<()> {
    let display = session.settings.display.clone();
    let mut service = PropertyService::new(session);

    match cmd {
        PropertyCommands::Add {
            address,
            kind,
            rooms,
            rent,
        } => {
            let property = service.create(&address, &kind, rooms, rent)?;
            println!("Registered {} ({})", property.address, property.id);
        }

        PropertyCommands::List => {
            let properties = service.list();
            println!("{}", format_property_list(properties, &display));
            if !properties.is_empty() {
                println!("\nTotal: {} properties", properties.len());
            }
        }

        PropertyCommands::Show { property } => {
            let property = service.require(&property)?;
            print!("{}", format_property_details(property, &display));
        }

        PropertyCommands::Edit {
            property,
            address,
            kind,
            rooms,
            rent,
        } => {
            let id = service.require(&property)?.id;
            let update = PropertyUpdate {
                address,
                kind,
                rooms,
                rent,
            };
            let updated = service.update(id, &update)?;
            print!("{}", format_property_details(&updated, &display));
        }

        PropertyCommands::Delete { property } => {
            let id = service.require(&property)?.id;
            let removed = service.delete(id)?;
            println!("Removed {} ({})", removed.address, removed.id);
        }
    }

    Ok(())
}
