//! Aggregate counts and sums for the billing summary cards

use serde::Serialize;

use crate::models::{BillingRecord, BillingStatus, Money};

/// Counts per status and amount totals over a set of records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BillingSummary {
    pub paid: usize,
    pub pending: usize,
    pub overdue: usize,
    pub scheduled: usize,
    /// Sum of every record's amount
    pub total: Money,
    /// Sum of amounts not yet paid
    pub outstanding: Money,
}

impl BillingSummary {
    /// Number of records in a status bucket
    pub fn count(&self, status: BillingStatus) -> usize {
        match status {
            BillingStatus::Paid => self.paid,
            BillingStatus::Pending => self.pending,
            BillingStatus::Overdue => self.overdue,
            BillingStatus::Scheduled => self.scheduled,
        }
    }

    /// Number of records summarized
    pub fn record_count(&self) -> usize {
        self.paid + self.pending + self.overdue + self.scheduled
    }
}

/// Summarize a set of records
pub fn summarize<'a, I>(records: I) -> BillingSummary
where
    I: IntoIterator<Item = &'a BillingRecord>,
{
    records
        .into_iter()
        .fold(BillingSummary::default(), |mut acc, record| {
            match record.status {
                BillingStatus::Paid => acc.paid += 1,
                BillingStatus::Pending => acc.pending += 1,
                BillingStatus::Overdue => acc.overdue += 1,
                BillingStatus::Scheduled => acc.scheduled += 1,
            }
            acc.total += record.amount;
            if !record.is_paid() {
                acc.outstanding += record.amount;
            }
            acc
        })
}
