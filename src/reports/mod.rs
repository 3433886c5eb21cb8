//! Reports module for EmDia
//!
//! Derived, read-only views over a session's records.

pub mod dashboard;

pub use dashboard::{DashboardReport, RECENT_PAYMENTS};
