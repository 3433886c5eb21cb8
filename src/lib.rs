//! EmDia - Terminal-based rental property management
//!
//! This library provides the core functionality behind the `emdia` command:
//! properties, tenants, a billing ledger with status buckets, and message
//! templates rendered into WhatsApp reminders. Payments and sends are
//! simulated; all state lives in a [`session::Session`] for one run.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (properties, tenants, billing records, templates)
//! - `ledger`: Status filtering, summaries and reminder selection
//! - `templates`: Placeholder substitution for message templates
//! - `storage`: In-memory repositories, demo data and snapshots
//! - `services`: Business logic layer
//! - `channels`: Simulated WhatsApp and PIX
//! - `display`, `reports`, `export`: Output formatting
//! - `cli`: clap command tree and the interactive shell
//!
//! # Example
//!
//! ```rust,ignore
//! use emdia_cli::ledger::{filter_by_status, summarize, StatusFilter};
//! use emdia_cli::models::BillingStatus;
//! use emdia_cli::storage::Storage;
//!
//! let storage = Storage::seeded();
//! let overdue = filter_by_status(storage.billings.all(), BillingStatus::Overdue.into());
//! let summary = summarize(storage.billings.all());
//! ```

pub mod channels;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod ledger;
pub mod models;
pub mod notice;
pub mod reports;
pub mod services;
pub mod session;
pub mod storage;
pub mod templates;

pub use error::{EmDiaError, EmDiaResult};
