//! Reminder planning
//!
//! Decides which records a reminder run should message on a given day,
//! according to the notification settings. Nothing here changes a record.

use chrono::NaiveDate;

use crate::config::NotificationSettings;
use crate::models::{BillingRecord, BillingStatus};

/// Which message a record is due for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderKind {
    /// Rent falls due within the reminder lead time
    Upcoming,
    /// Rent is overdue by one of the configured late-notice offsets
    Late,
}

impl std::fmt::Display for ReminderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upcoming => write!(f, "upcoming"),
            Self::Late => write!(f, "late"),
        }
    }
}

/// A record that should be messaged today
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DueReminder<'a> {
    pub record: &'a BillingRecord,
    pub kind: ReminderKind,
}

/// Classify a single record for `today`, if it is due for a message
pub fn reminder_kind(
    record: &BillingRecord,
    today: NaiveDate,
    settings: &NotificationSettings,
) -> Option<ReminderKind> {
    let days_past_due = record.days_past_due(today);

    match record.status {
        BillingStatus::Paid => None,
        BillingStatus::Pending | BillingStatus::Scheduled => {
            let days_until_due = -days_past_due;
            let in_window =
                (0..=i64::from(settings.days_before_due)).contains(&days_until_due);
            (settings.send_reminders && !record.reminder_sent && in_window)
                .then_some(ReminderKind::Upcoming)
        }
        BillingStatus::Overdue => {
            let on_offset = settings
                .late_notice_days
                .iter()
                .any(|d| i64::from(*d) == days_past_due);
            (settings.send_late_notices && on_offset).then_some(ReminderKind::Late)
        }
    }
}

/// Records due for a reminder on `today`, in ledger order
pub fn due_reminders<'a>(
    records: &'a [BillingRecord],
    today: NaiveDate,
    settings: &NotificationSettings,
) -> Vec<DueReminder<'a>> {
    records
        .iter()
        .filter_map(|record| {
            reminder_kind(record, today, settings).map(|kind| DueReminder { record, kind })
        })
        .collect()
}
