//! Tenant CLI commands

use clap::Subcommand;

use super::{parse_money, parse_tenant_status};
use crate::display::{format_tenant_details, format_tenant_list};
use crate::error::EmDiaResult;
use crate::models::{Money, TenantStatus, TenantUpdate};
use crate::services::{NewTenant, TenantService};
use crate::session::Session;

/// Tenant subcommands
#[derive(Subcommand, Debug)]
pub enum TenantCommands {
    /// Register a tenant in a vacant property
    Add {
        /// Full name
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        phone: String,
        /// Property ID or address (must be vacant)
        #[arg(long)]
        property: String,
        /// Monthly rent; defaults to the property's rent
        #[arg(long, value_parser = parse_money)]
        rent: Option<Money>,
        /// Day of the month rent is due
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=31))]
        due_day: u8,
    },
    /// List all tenants
    #[command(alias = "ls")]
    List,
    /// Show tenant details
    Show {
        /// Tenant ID or name
        tenant: String,
    },
    /// Edit a tenant
    Edit {
        /// Tenant ID or name
        tenant: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long)]
        phone: Option<String>,
        #[arg(long, value_parser = parse_money)]
        rent: Option<Money>,
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=31))]
        due_day: Option<u8>,
        /// active or late
        #[arg(long, value_parser = parse_tenant_status)]
        status: Option<TenantStatus>,
    },
    /// Contact a tenant over (simulated) WhatsApp
    Message {
        /// Tenant ID or name
        tenant: String,
        /// Message text to send
        #[arg(short, long)]
        text: Option<String>,
    },
}

/// Handle a tenant command
pub fn handle_tenant_command(session: &mut Session, cmd: TenantCommands) -> EmDiaResult<()> {
    let display = session.settings.display.clone();
    let mut service = TenantService::new(session);

    match cmd {
        TenantCommands::Add {
            name,
            email,
            phone,
            property,
            rent,
            due_day,
        } => {
            let tenant = service.create(&NewTenant {
                name,
                email,
                phone,
                property,
                rent,
                due_day,
            })?;
            println!("Registered {} ({}) at {}", tenant.name, tenant.id, tenant.property);
        }

        TenantCommands::List => {
            let tenants = service.list();
            println!("{}", format_tenant_list(tenants, &display));
            if !tenants.is_empty() {
                println!("\nTotal: {} tenants", tenants.len());
            }
        }

        TenantCommands::Show { tenant } => {
            let tenant = service.require(&tenant)?;
            print!("{}", format_tenant_details(tenant, &display));
        }

        TenantCommands::Edit {
            tenant,
            name,
            email,
            phone,
            rent,
            due_day,
            status,
        } => {
            let id = service.require(&tenant)?.id;
            let update = TenantUpdate {
                name,
                email,
                phone,
                rent,
                due_day,
                status,
            };
            let updated = service.update(id, &update)?;
            print!("{}", format_tenant_details(&updated, &display));
        }

        TenantCommands::Message { tenant, text } => {
            if let Some(delivery) = service.message(&tenant, text.as_deref())? {
                println!(
                    "Delivered to {} via {} (#{})",
                    delivery.recipient, delivery.channel, delivery.sequence
                );
            }
        }
    }

    Ok(())
}
