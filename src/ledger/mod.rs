//! Billing ledger logic
//!
//! Pure functions over slices of [`BillingRecord`](crate::models::BillingRecord):
//!
//! - `filter`: status buckets (`all`, paid, pending, overdue, scheduled)
//! - `summary`: counts per status and amount totals
//! - `reminders`: which records a reminder run should message today
//!
//! Results borrow from the input slice and never modify it.

pub mod filter;
pub mod reminders;
pub mod summary;

pub use filter::{filter_by_status, StatusFilter};
pub use reminders::{due_reminders, reminder_kind, DueReminder, ReminderKind};
pub use summary::{summarize, BillingSummary};
