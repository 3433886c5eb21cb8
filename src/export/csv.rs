//! CSV Export functionality
//!
//! One row per billing record, spreadsheet-friendly.

use std::io::Write;

use serde::Serialize;

use crate::error::{EmDiaError, EmDiaResult};
use crate::models::BillingRecord;

#[derive(Debug, Serialize)]
struct LedgerRow<'a> {
    id: String,
    tenant: &'a str,
    property: &'a str,
    amount: String,
    due_date: String,
    status: String,
    payment_date: String,
    reminder_sent: bool,
}

impl<'a> From<&'a BillingRecord> for LedgerRow<'a> {
    fn from(record: &'a BillingRecord) -> Self {
        Self {
            id: record.id.to_string(),
            tenant: &record.tenant_name,
            property: &record.property_label,
            amount: format!("{}.{:02}", record.amount.reais(), record.amount.cents_part()),
            due_date: record.due_date.to_string(),
            status: record.status.to_string(),
            payment_date: record
                .payment_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
            reminder_sent: record.reminder_sent,
        }
    }
}

/// Export billing records to CSV, in the order given
pub fn export_ledger_csv<'a, I, W>(records: I, writer: W) -> EmDiaResult<()>
where
    I: IntoIterator<Item = &'a BillingRecord>,
    W: Write,
{
    let mut csv_writer = csv::Writer::from_writer(writer);

    for record in records {
        csv_writer
            .serialize(LedgerRow::from(record))
            .map_err(|e| EmDiaError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| EmDiaError::Export(e.to_string()))
}
