//! Billing display formatting
//!
//! Ledger table, summary cards, due reminders and PIX charges.

use tabled::Tabled;

use super::{money, render_table};
use crate::channels::PixCharge;
use crate::config::DisplaySettings;
use crate::ledger::{BillingSummary, DueReminder, ReminderKind, StatusFilter};
use crate::models::{BillingRecord, BillingStatus};
use crate::templates::format_date;

#[derive(Tabled)]
struct BillingRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Tenant")]
    tenant: String,
    #[tabled(rename = "Property")]
    property: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Reminder")]
    reminder: &'static str,
}

fn reminder_label(record: &BillingRecord) -> &'static str {
    match (record.status, record.reminder_sent) {
        (BillingStatus::Paid, _) => "-",
        (BillingStatus::Overdue, _) => "urgent",
        (_, true) => "sent",
        (_, false) => "not sent",
    }
}

/// Format ledger records as a table
pub fn format_billing_list(
    records: &[&BillingRecord],
    filter: StatusFilter,
    display: &DisplaySettings,
) -> String {
    if records.is_empty() {
        return match filter {
            StatusFilter::All => "No charges found.".to_string(),
            StatusFilter::Only(status) => format!("No {} charges.", status.to_string().to_lowercase()),
        };
    }

    render_table(records.iter().map(|r| BillingRow {
        id: r.id.to_string(),
        tenant: r.tenant_name.clone(),
        property: r.property_label.clone(),
        amount: money(r.amount, display),
        due: format_date(r.due_date, &display.date_format),
        status: r.status.to_string(),
        reminder: reminder_label(r),
    }))
}

/// Format one charge
pub fn format_billing_details(record: &BillingRecord, display: &DisplaySettings) -> String {
    let mut output = String::new();
    output.push_str(&format!("Charge {}\n", record.id));
    output.push_str(&format!("  Tenant:   {}\n", record.tenant_name));
    output.push_str(&format!("  Property: {}\n", record.property_label));
    output.push_str(&format!("  Amount:   {}\n", money(record.amount, display)));
    output.push_str(&format!(
        "  Due:      {}\n",
        format_date(record.due_date, &display.date_format)
    ));
    output.push_str(&format!(
        "  Status:   {} ({})\n",
        record.status,
        record.status.label_pt()
    ));
    if let Some(paid_on) = record.payment_date {
        output.push_str(&format!(
            "  Paid on:  {}\n",
            format_date(paid_on, &display.date_format)
        ));
    }
    output.push_str(&format!("  Reminder: {}\n", reminder_label(record)));
    output
}

/// Format the summary cards shown above the ledger
pub fn format_summary_cards(summary: &BillingSummary, display: &DisplaySettings) -> String {
    let mut output = String::new();
    for status in BillingStatus::ALL {
        output.push_str(&format!("{:<12} {:>4}\n", format!("{}:", status), summary.count(status)));
    }
    output.push_str(&"-".repeat(30));
    output.push('\n');
    output.push_str(&format!("{:<12} {:>16}\n", "Total:", money(summary.total, display)));
    output.push_str(&format!(
        "{:<12} {:>16}\n",
        "Outstanding:",
        money(summary.outstanding, display)
    ));
    output
}

/// Format the records due for a reminder today
pub fn format_due_list(due: &[DueReminder<'_>], display: &DisplaySettings) -> String {
    if due.is_empty() {
        return "No reminders due today.".to_string();
    }

    let mut output = String::new();
    for item in due {
        let kind = match item.kind {
            ReminderKind::Upcoming => "upcoming",
            ReminderKind::Late => "late notice",
        };
        output.push_str(&format!(
            "{:<7} {:<12} {:<16} {:>14}  due {}\n",
            item.record.id,
            kind,
            item.record.tenant_name,
            money(item.record.amount, display),
            format_date(item.record.due_date, &display.date_format),
        ));
    }
    output
}

/// Format a generated PIX charge
pub fn format_pix_charge(charge: &PixCharge, display: &DisplaySettings) -> String {
    format!(
        "PIX charge for {}\n  Amount: {}\n  Key:    {} ({})\n  Link:   {}\n",
        charge.billing_id,
        money(charge.amount, display),
        charge.key,
        charge.key_type,
        charge.link
    )
}
