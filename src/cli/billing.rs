//! Billing CLI commands
//!
//! The dashboard's "Cobranças" tab: the ledger filtered by status, the summary
//! cards, and the PIX / reminder / receipt actions for a single charge.

use chrono::NaiveDate;
use clap::Subcommand;

use super::parse_money;
use crate::display::{
    format_billing_details, format_billing_list, format_due_list, format_pix_charge,
    format_summary_cards,
};
use crate::error::EmDiaResult;
use crate::ledger::StatusFilter;
use crate::models::{BillingId, BillingStatus, Money};
use crate::services::{BillingService, NewCharge};
use crate::session::Session;

/// Billing subcommands
#[derive(Subcommand, Debug)]
pub enum BillingCommands {
    /// List charges, optionally filtered by status
    #[command(alias = "ls")]
    List {
        /// all, paid, pending, overdue or scheduled
        #[arg(short, long, default_value = "all")]
        status: StatusFilter,
    },
    /// Show the summary cards (counts per status and totals)
    Summary,
    /// Show one charge
    Show {
        /// Billing ID (e.g. 3 or bil-3)
        id: BillingId,
    },
    /// Add a charge for a tenant
    Add {
        /// Tenant name
        tenant: String,
        /// Amount (e.g. 850,00)
        #[arg(value_parser = parse_money)]
        amount: Money,
        /// Due date (YYYY-MM-DD)
        #[arg(short, long)]
        due: NaiveDate,
        /// Property label; defaults to the tenant's property
        #[arg(long)]
        property: Option<String>,
        /// pending or scheduled
        #[arg(short, long, default_value = "pending")]
        status: BillingStatus,
    },
    /// Generate a PIX charge for an unpaid record
    Pix {
        /// Billing ID
        id: BillingId,
    },
    /// Send a WhatsApp reminder for one charge
    Remind {
        /// Billing ID
        id: BillingId,
    },
    /// Send every reminder due today
    RemindAll,
    /// Send a payment confirmation for a paid charge
    Receipt {
        /// Billing ID
        id: BillingId,
    },
    /// List charges due a reminder today
    Due,
}

/// Handle a billing command
pub fn handle_billing_command(session: &mut Session, cmd: BillingCommands) -> EmDiaResult<()> {
    let display = session.settings.display.clone();
    let mut service = BillingService::new(session);

    match cmd {
        BillingCommands::List { status } => {
            let records = service.list(status);
            println!("{}", format_billing_list(&records, status, &display));
            if !records.is_empty() {
                println!("\n{} charges", records.len());
            }
        }

        BillingCommands::Summary => {
            print!("{}", format_summary_cards(&service.summary(), &display));
        }

        BillingCommands::Show { id } => {
            let record = service.require(id)?;
            print!("{}", format_billing_details(record, &display));
        }

        BillingCommands::Add {
            tenant,
            amount,
            due,
            property,
            status,
        } => {
            let record = service.create(&NewCharge {
                tenant_name: tenant,
                property_label: property,
                amount,
                due_date: due,
                status,
            })?;
            print!("{}", format_billing_details(&record, &display));
        }

        BillingCommands::Pix { id } => {
            let charge = service.generate_pix(id)?;
            print!("{}", format_pix_charge(&charge, &display));
        }

        BillingCommands::Remind { id } => {
            let delivery = service.send_reminder(id)?;
            println!(
                "Reminder for {} delivered to {} via {}",
                id, delivery.recipient, delivery.channel
            );
        }

        BillingCommands::Receipt { id } => {
            let delivery = service.send_receipt(id)?;
            println!(
                "Receipt for {} delivered to {} via {}",
                id, delivery.recipient, delivery.channel
            );
        }

        BillingCommands::RemindAll => {
            let deliveries = service.send_all_reminders()?;
            if deliveries.is_empty() {
                println!("No reminders due today.");
            } else {
                println!("Sent {} reminders", deliveries.len());
            }
        }

        BillingCommands::Due => {
            println!("{}", format_due_list(&service.due(), &display));
        }
    }

    Ok(())
}
