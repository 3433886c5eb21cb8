//! Export module for EmDia
//!
//! - JSON / YAML: the full session snapshot, loadable with `--data`
//! - CSV: the billing ledger only

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_ledger_csv;
pub use json::{export_json, write_snapshot_json};
pub use yaml::export_yaml;

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use tracing::info;

use crate::error::{EmDiaError, EmDiaResult};
use crate::storage::{write_atomic, Storage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Yaml,
    Csv,
}

impl ExportFormat {
    /// Write the export for `storage` to any writer
    pub fn write<W: Write>(&self, storage: &Storage, writer: &mut W) -> EmDiaResult<()> {
        match self {
            Self::Json => export_json(storage, writer),
            Self::Yaml => export_yaml(storage, writer),
            Self::Csv => export_ledger_csv(storage.billings.all(), writer),
        }
    }

    /// Write the export to a file, atomically
    pub fn write_to_path(&self, storage: &Storage, path: &Path) -> EmDiaResult<()> {
        write_atomic(path, |writer| self.write(storage, writer))?;
        info!(format = %self, path = %path.display(), "Export written");
        Ok(())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = EmDiaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "csv" => Ok(Self::Csv),
            other => Err(EmDiaError::Export(format!("Unknown export format: {}", other))),
        }
    }
}
