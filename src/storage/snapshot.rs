//! Serializable picture of a whole session's records
//!
//! Written by `export json|yaml` and accepted by `--data` to start a session
//! from something other than the demo data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{BillingRecord, MessageTemplate, Property, Tenant};

/// Current snapshot schema version
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SNAPSHOT_SCHEMA_VERSION
}

/// Every record held by a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// When the snapshot was taken; absent in hand-written data files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub properties: Vec<Property>,

    #[serde(default)]
    pub tenants: Vec<Tenant>,

    #[serde(default)]
    pub billings: Vec<BillingRecord>,

    #[serde(default)]
    pub templates: Vec<MessageTemplate>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            exported_at: None,
            properties: Vec::new(),
            tenants: Vec::new(),
            billings: Vec::new(),
            templates: Vec::new(),
        }
    }
}

impl Snapshot {
    /// Total number of records across all collections
    pub fn record_count(&self) -> usize {
        self.properties.len() + self.tenants.len() + self.billings.len() + self.templates.len()
    }
}
