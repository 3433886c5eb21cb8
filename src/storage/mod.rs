//! In-memory storage for EmDia
//!
//! A session's records live in ordered repositories for its whole lifetime.
//! Nothing is written back: sessions start from the demo data or from a
//! snapshot file, and `export` is the only way records leave the process.

pub mod file_io;
pub mod repository;
pub mod seed;
pub mod snapshot;

pub use file_io::{read_structured, write_atomic, write_json_atomic};
pub use repository::{Record, Repository};
pub use snapshot::{Snapshot, SNAPSHOT_SCHEMA_VERSION};

use std::path::Path;

use chrono::Utc;
use tracing::debug;

use crate::error::{EmDiaError, EmDiaResult};
use crate::models::{BillingRecord, MessageTemplate, Property, Tenant};

/// All repositories of one session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Storage {
    pub properties: Repository<Property>,
    pub tenants: Repository<Tenant>,
    pub billings: Repository<BillingRecord>,
    pub templates: Repository<MessageTemplate>,
}

impl Storage {
    /// Storage with no records
    pub fn empty() -> Self {
        Self::default()
    }

    /// Storage holding the demo data
    pub fn seeded() -> Self {
        seed::demo_storage()
    }

    /// Build storage from a snapshot, validating every record
    pub fn from_snapshot(snapshot: Snapshot) -> EmDiaResult<Self> {
        for property in &snapshot.properties {
            property
                .validate()
                .map_err(|e| invalid_record("Property", property.id, e))?;
        }
        for tenant in &snapshot.tenants {
            tenant
                .validate()
                .map_err(|e| invalid_record("Tenant", tenant.id, e))?;
        }
        for record in &snapshot.billings {
            record
                .validate()
                .map_err(|e| invalid_record("Billing", record.id, e))?;
        }
        for template in &snapshot.templates {
            template
                .validate()
                .map_err(|e| invalid_record("Template", template.id, e))?;
        }

        Ok(Self {
            properties: Repository::from_vec(snapshot.properties)?,
            tenants: Repository::from_vec(snapshot.tenants)?,
            billings: Repository::from_vec(snapshot.billings)?,
            templates: Repository::from_vec(snapshot.templates)?,
        })
    }

    /// Load a JSON or YAML snapshot file as the starting data
    pub fn load(path: &Path) -> EmDiaResult<Self> {
        let snapshot: Snapshot = read_structured(path)?;
        debug!(
            path = %path.display(),
            records = snapshot.record_count(),
            "Loaded snapshot"
        );
        Self::from_snapshot(snapshot)
    }

    /// Copy of every record, stamped with the current time
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            exported_at: Some(Utc::now()),
            properties: self.properties.all().to_vec(),
            tenants: self.tenants.all().to_vec(),
            billings: self.billings.all().to_vec(),
            templates: self.templates.all().to_vec(),
        }
    }
}

fn invalid_record(entity: &str, id: impl std::fmt::Display, err: impl std::fmt::Display) -> EmDiaError {
    EmDiaError::Validation(format!("{} {}: {}", entity, id, err))
}
