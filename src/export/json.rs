//! JSON Export functionality
//!
//! Writes the whole session as a snapshot that `--data` can load again.

use std::io::Write;

use crate::error::{EmDiaError, EmDiaResult};
use crate::storage::{Snapshot, Storage};

/// Export every record as pretty-printed JSON
pub fn export_json<W: Write>(storage: &Storage, writer: &mut W) -> EmDiaResult<()> {
    write_snapshot_json(&storage.snapshot(), writer)
}

pub fn write_snapshot_json<W: Write>(snapshot: &Snapshot, writer: &mut W) -> EmDiaResult<()> {
    serde_json::to_writer_pretty(&mut *writer, snapshot)
        .map_err(|e| EmDiaError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| EmDiaError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_export_reloads() {
        let storage = Storage::seeded();
        let mut buffer = Vec::new();
        export_json(&storage, &mut buffer).unwrap();

        let snapshot: Snapshot = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(Storage::from_snapshot(snapshot).unwrap(), storage);
    }

    #[test]
    fn test_json_export_shape() {
        let mut buffer = Vec::new();
        export_json(&Storage::seeded(), &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(value["schema_version"], 1);
        assert_eq!(value["billings"][0]["status"], "paid");
        assert_eq!(value["billings"][0]["amount"], 85000);
        assert_eq!(value["billings"][0]["payment_date"], "2024-03-04");
        assert!(value["exported_at"].is_string());
    }
}
