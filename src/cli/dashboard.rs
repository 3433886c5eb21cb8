//! Dashboard CLI command

use clap::Args;

use crate::display::format_due_list;
use crate::error::EmDiaResult;
use crate::ledger::due_reminders;
use crate::reports::DashboardReport;
use crate::session::Session;

/// Dashboard options
#[derive(Args, Debug, Default)]
pub struct DashboardArgs {
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Handle the dashboard command
pub fn handle_dashboard_command(session: &Session, args: DashboardArgs) -> EmDiaResult<()> {
    let report = DashboardReport::generate(
        &session.storage,
        session.today,
        &session.settings.notifications,
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print!("{}", report.format_terminal(&session.settings.display));

    let due = due_reminders(
        session.storage.billings.all(),
        session.today,
        &session.settings.notifications,
    );
    if !due.is_empty() {
        println!();
        println!("Reminders due");
        print!("{}", format_due_list(&due, &session.settings.display));
    }

    Ok(())
}
